use std::fs;
use std::path::Path;

use ampt_core::errors::{AmptError, ErrorInfo};
use ampt_core::ZERO_TOLERANCE;
use ampt_hepmc::OutputFormat;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters of a conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Beam pseudo-particles attached to every event.
    #[serde(default)]
    pub beam: BeamConfig,
    /// Transverse momentum tolerance of the beam-line filter.
    #[serde(default = "default_beam_tolerance")]
    pub beam_tolerance: f64,
    /// Value written for heavy-ion quantities AMPT does not provide.
    #[serde(default = "default_sentinel")]
    pub sentinel: i32,
    /// The single weight attached to each event.
    #[serde(default = "default_event_weight")]
    pub event_weight: f64,
    /// Particle sampling interval of the tracing observer.
    #[serde(default = "default_particle_log_interval")]
    pub particle_log_interval: usize,
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_beam_tolerance() -> f64 {
    ZERO_TOLERANCE
}

fn default_sentinel() -> i32 {
    -1
}

fn default_event_weight() -> f64 {
    1.0
}

fn default_particle_log_interval() -> usize {
    1000
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            beam: BeamConfig::default(),
            beam_tolerance: default_beam_tolerance(),
            sentinel: default_sentinel(),
            event_weight: default_event_weight(),
            particle_log_interval: default_particle_log_interval(),
            format: OutputFormat::default(),
        }
    }
}

/// Beam pseudo-particle settings, shared by both beams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// PDG code of the beam particles.
    #[serde(default = "default_beam_pdg_id")]
    pub pdg_id: i32,
    /// Longitudinal momentum in GeV/c.
    #[serde(default = "default_beam_pz")]
    pub pz: f64,
    /// Generated mass in GeV.
    #[serde(default = "default_beam_mass")]
    pub mass: f64,
}

fn default_beam_pdg_id() -> i32 {
    2212
}

fn default_beam_pz() -> f64 {
    140.0
}

fn default_beam_mass() -> f64 {
    0.940
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            pdg_id: default_beam_pdg_id(),
            pz: default_beam_pz(),
            mass: default_beam_mass(),
        }
    }
}

impl ConversionConfig {
    /// Reads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, AmptError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AmptError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            AmptError::Config(info) => {
                AmptError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Parses and validates a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, AmptError> {
        let config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(contents).map_err(|err| {
                AmptError::Config(ErrorInfo::new("config-parse", err.to_string()))
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the converter cannot honour.
    pub fn validate(&self) -> Result<(), AmptError> {
        let finite = [
            ("beam.pz", self.beam.pz),
            ("beam.mass", self.beam.mass),
            ("beam_tolerance", self.beam_tolerance),
            ("event_weight", self.event_weight),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, value.to_string(), "value must be finite"));
            }
        }
        if self.beam_tolerance <= 0.0 {
            return Err(invalid(
                "beam_tolerance",
                self.beam_tolerance.to_string(),
                "tolerance must be positive",
            ));
        }
        if self.beam.mass < 0.0 {
            return Err(invalid(
                "beam.mass",
                self.beam.mass.to_string(),
                "mass must not be negative",
            ));
        }
        if self.particle_log_interval == 0 {
            return Err(invalid(
                "particle_log_interval",
                "0".to_string(),
                "interval must be at least 1",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: String, message: &str) -> AmptError {
    AmptError::Config(
        ErrorInfo::new("config-invalid", message)
            .with_context("field", field)
            .with_context("value", value),
    )
}

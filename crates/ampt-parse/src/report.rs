use std::fs;
use std::path::Path;

use ampt_core::errors::{AmptError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Events handed to the writer.
    pub events_written: u32,
    /// Event number of the last decoded header, if any header was decoded.
    pub events_expected: Option<u32>,
    /// Final-state particles written across all events.
    pub particles_written: u64,
    /// Particle lines dropped as AMPT beam lines across all written events.
    pub beam_lines_filtered: u64,
    /// The error that stopped the run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<AmptError>,
}

impl RunReport {
    /// True iff nothing failed and every expected event was written.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
            && self
                .events_expected
                .map_or(true, |expected| expected == self.events_written)
    }

    /// One-line human readable summary, e.g. `converted 1 of 2 events`.
    pub fn summary_line(&self) -> String {
        let expected = self.events_expected.unwrap_or(self.events_written);
        format!("converted {} of {expected} events", self.events_written)
    }

    /// Writes the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), AmptError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                AmptError::Write(
                    ErrorInfo::new("report-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            AmptError::Write(
                ErrorInfo::new("report-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            AmptError::Write(
                ErrorInfo::new("report-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a report written by [`write_json`](Self::write_json).
    pub fn load(path: &Path) -> Result<Self, AmptError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AmptError::Read(
                ErrorInfo::new("report-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            AmptError::Decode(
                ErrorInfo::new("report-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

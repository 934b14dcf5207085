use ampt_core::{AmptError, EventHeader, ParticleRecord};
use ampt_hepmc::EventGraph;

/// Hooks invoked while events are assembled. Every method defaults to a no-op.
pub trait ConversionObserver {
    /// A header line was decoded.
    fn on_header(&mut self, _header: &EventHeader) {}

    /// A particle line was decoded; `index` counts from zero within the event.
    fn on_particle(&mut self, _index: usize, _particle: &ParticleRecord) {}

    /// A decoded particle line was dropped as an AMPT beam line.
    fn on_beam_line(&mut self, _particle: &ParticleRecord) {}

    /// An event was handed to the writer.
    fn on_event_written(&mut self, _event: &EventGraph) {}

    /// An event failed validation and was not written.
    fn on_event_rejected(&mut self, _header: &EventHeader, _error: &AmptError) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ConversionObserver for NullObserver {}

/// Reports assembly progress through `tracing`.
///
/// Headers are logged in full at debug level, every `particle_interval`-th
/// particle at trace level.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    particle_interval: usize,
    beam_lines: usize,
}

impl TracingObserver {
    /// Creates an observer sampling one particle out of `particle_interval`.
    pub fn new(particle_interval: usize) -> Self {
        Self {
            particle_interval: particle_interval.max(1),
            beam_lines: 0,
        }
    }

    /// Beam lines seen since construction.
    pub fn beam_lines(&self) -> usize {
        self.beam_lines
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl ConversionObserver for TracingObserver {
    fn on_header(&mut self, header: &EventHeader) {
        tracing::debug!(
            event = header.event_number,
            test = header.test_number,
            particles = header.particle_count,
            impact_parameter = header.impact_parameter,
            projectile_participants = header.projectile_participants,
            target_participants = header.target_participants,
            projectile_elastic = header.projectile_elastic,
            projectile_inelastic = header.projectile_inelastic,
            target_elastic = header.target_elastic,
            target_inelastic = header.target_inelastic,
            trailing = %header.trailing_token,
            "event header"
        );
    }

    fn on_particle(&mut self, index: usize, particle: &ParticleRecord) {
        if index % self.particle_interval == 0 {
            tracing::trace!(
                index,
                pid = particle.pid,
                px = particle.px,
                py = particle.py,
                pz = particle.pz,
                mass = particle.mass,
                "particle"
            );
        }
    }

    fn on_beam_line(&mut self, particle: &ParticleRecord) {
        self.beam_lines += 1;
        tracing::trace!(pid = particle.pid, pz = particle.pz, "dropped beam line");
    }

    fn on_event_written(&mut self, event: &EventGraph) {
        tracing::debug!(
            event = event.event_number(),
            particles = event.final_state().count(),
            "event written"
        );
    }

    fn on_event_rejected(&mut self, header: &EventHeader, error: &AmptError) {
        tracing::warn!(event = header.event_number, %error, "event rejected");
    }
}

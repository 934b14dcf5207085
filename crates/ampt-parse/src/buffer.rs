use ampt_core::errors::{AmptError, ErrorInfo};
use ampt_core::{EventHeader, ParticleRecord};

/// Per-event accumulator, created from a decoded header and dropped with the event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBuffer {
    header: EventHeader,
    counts: usize,
    beam_lines: usize,
    last_particle: Option<ParticleRecord>,
}

impl EventBuffer {
    /// Starts a fresh event with a zero count.
    pub fn new(header: EventHeader) -> Self {
        Self {
            header,
            counts: 0,
            beam_lines: 0,
            last_particle: None,
        }
    }

    /// Header of the event being built.
    pub fn header(&self) -> &EventHeader {
        &self.header
    }

    /// Particle lines decoded so far, beam lines included.
    pub fn counts(&self) -> usize {
        self.counts
    }

    /// Particle lines recognised as AMPT beam lines.
    pub fn beam_lines(&self) -> usize {
        self.beam_lines
    }

    /// The most recently decoded particle.
    pub fn last_particle(&self) -> Option<&ParticleRecord> {
        self.last_particle.as_ref()
    }

    /// Counts a decoded particle line. Every line counts, filtered or not.
    pub fn record(&mut self, particle: ParticleRecord) {
        self.counts += 1;
        self.last_particle = Some(particle);
    }

    /// Marks the last recorded line as a filtered beam line.
    pub fn note_beam_line(&mut self) {
        self.beam_lines += 1;
    }

    /// Accepts the event iff the count equals the declared total and is not zero.
    pub fn validate(&self) -> Result<(), AmptError> {
        let declared = self.header.particle_count;
        if self.counts != declared {
            return Err(AmptError::ParticleCountMismatch(
                ErrorInfo::new(
                    "count-mismatch",
                    format!("header declares {declared} particles, read {}", self.counts),
                )
                .with_context("event", self.header.event_number.to_string())
                .with_context("declared", declared.to_string())
                .with_context("read", self.counts.to_string())
                .with_hint("the declared count includes AMPT participant lines"),
            ));
        }
        if self.counts == 0 {
            return Err(AmptError::EmptyEvent(
                ErrorInfo::new("empty-event", "event carries no particle lines")
                    .with_context("event", self.header.event_number.to_string()),
            ));
        }
        Ok(())
    }

    /// Consumes the buffer and returns the header.
    pub fn into_header(self) -> EventHeader {
        self.header
    }
}

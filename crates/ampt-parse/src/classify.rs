use ampt_core::{EventHeader, ParticleRecord};

/// Shape of a line, decided by its whitespace separated token count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Eleven tokens.
    Header,
    /// Nine tokens.
    Particle,
    /// Anything else, blank lines included.
    Other,
}

/// Counts whitespace separated tokens.
pub fn token_count(line: &str) -> usize {
    line.split_whitespace().count()
}

/// Classifies a line by token count.
pub fn classify(line: &str) -> LineKind {
    match token_count(line) {
        EventHeader::FIELD_COUNT => LineKind::Header,
        ParticleRecord::FIELD_COUNT => LineKind::Particle,
        _ => LineKind::Other,
    }
}

/// True iff the line has exactly eleven tokens.
pub fn is_header(line: &str) -> bool {
    classify(line) == LineKind::Header
}

/// True iff the line has exactly nine tokens.
pub fn is_particle(line: &str) -> bool {
    classify(line) == LineKind::Particle
}

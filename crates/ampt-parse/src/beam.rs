use ampt_core::{is_equal_to_zero, ParticleRecord, ZERO_TOLERANCE};

/// True iff both transverse momentum components lie within 1e-5 of zero.
///
/// AMPT lists participant nucleons as purely longitudinal entries. Their
/// rapidity is unbounded, so they never reach the final-state record.
pub fn is_beam_particle(record: &ParticleRecord) -> bool {
    is_beam_particle_within(record, ZERO_TOLERANCE)
}

/// [`is_beam_particle`] with an explicit tolerance.
pub fn is_beam_particle_within(record: &ParticleRecord, tolerance: f64) -> bool {
    is_equal_to_zero(record.px, tolerance) && is_equal_to_zero(record.py, tolerance)
}

//! Small kinematic helpers shared by the parser and the event builder.

/// Default absolute tolerance used when testing transverse momenta against zero.
pub const ZERO_TOLERANCE: f64 = 1e-5;

/// Returns true when `value` lies strictly within `tolerance` of zero.
pub fn is_equal_to_zero(value: f64, tolerance: f64) -> bool {
    value.abs() < tolerance
}

/// Energy `sqrt(px² + py² + pz² + m²)`, clamped to zero when the radicand is not positive.
///
/// A NaN radicand also yields zero, so the result is never negative or NaN.
pub fn mass_shell_energy(px: f64, py: f64, pz: f64, mass: f64) -> f64 {
    let energy_squared = px * px + py * py + pz * pz + mass * mass;
    if energy_squared > 0.0 {
        energy_squared.sqrt()
    } else {
        0.0
    }
}

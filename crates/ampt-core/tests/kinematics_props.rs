use ampt_core::{is_equal_to_zero, mass_shell_energy, ParticleRecord, ZERO_TOLERANCE};
use proptest::prelude::*;

#[test]
fn energy_of_simple_vectors() {
    assert_eq!(mass_shell_energy(3.0, 4.0, 0.0, 0.0), 5.0);
    assert_eq!(mass_shell_energy(0.0, 0.0, 0.0, 0.0), 0.0);
    assert!((mass_shell_energy(0.0, 0.0, 140.0, 0.94) - 140.003_155_678_6).abs() < 1e-6);
}

#[test]
fn nan_radicand_clamps_to_zero() {
    assert_eq!(mass_shell_energy(f64::NAN, 0.0, 0.0, 0.0), 0.0);
}

#[test]
fn particle_energy_uses_mass_shell() {
    let record = ParticleRecord {
        pid: 211,
        px: 0.3,
        py: 0.4,
        pz: 1.2,
        mass: 0.0,
        x: 1.0,
        y: 2.0,
        z: 3.0,
        t: 4.0,
    };
    assert!((record.energy() - 1.3).abs() < 1e-12);
}

#[test]
fn zero_tolerance_is_strict() {
    assert!(is_equal_to_zero(0.0, ZERO_TOLERANCE));
    assert!(is_equal_to_zero(-9e-6, ZERO_TOLERANCE));
    assert!(!is_equal_to_zero(1e-5, ZERO_TOLERANCE));
    assert!(!is_equal_to_zero(1e-3, ZERO_TOLERANCE));
}

proptest! {
    #[test]
    fn energy_is_finite_and_non_negative(
        px in -1.0e3f64..1.0e3,
        py in -1.0e3f64..1.0e3,
        pz in -1.0e4f64..1.0e4,
        mass in -10.0f64..10.0,
    ) {
        let energy = mass_shell_energy(px, py, pz, mass);
        prop_assert!(energy >= 0.0);
        prop_assert!(energy.is_finite());
        prop_assert!(energy + 1e-9 >= pz.abs());
    }
}

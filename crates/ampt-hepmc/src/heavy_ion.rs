use ampt_core::EventHeader;
use serde::{Deserialize, Serialize};

/// Heavy-ion metadata block in the HepMC2 thirteen-field layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeavyIon {
    /// Number of hard scatterings.
    pub hard_scatterings: i32,
    /// Number of projectile participants.
    pub projectile_participants: i32,
    /// Number of target participants.
    pub target_participants: i32,
    /// Number of nucleon-nucleon collisions.
    pub nn_collisions: i32,
    /// Number of spectator neutrons.
    pub spectator_neutrons: i32,
    /// Number of spectator protons.
    pub spectator_protons: i32,
    /// Number of N-Nwounded collisions.
    pub n_nwounded_collisions: i32,
    /// Number of Nwounded-N collisions.
    pub nwounded_n_collisions: i32,
    /// Number of Nwounded-Nwounded collisions.
    pub nwounded_nwounded_collisions: i32,
    /// Impact parameter in fm.
    pub impact_parameter: f64,
    /// Azimuthal angle of the event plane.
    pub event_plane_angle: f64,
    /// Eccentricity of the participating nucleons in the transverse plane.
    pub eccentricity: f64,
    /// Nucleon-nucleon inelastic cross section, diffractive included.
    pub sigma_inel_nn: f64,
}

impl HeavyIon {
    /// Block where every quantity is unknown and carries `sentinel`.
    ///
    /// The event-plane angle is the exception and stays at zero.
    pub fn unavailable(sentinel: i32) -> Self {
        Self {
            hard_scatterings: sentinel,
            projectile_participants: sentinel,
            target_participants: sentinel,
            nn_collisions: sentinel,
            spectator_neutrons: sentinel,
            spectator_protons: sentinel,
            n_nwounded_collisions: sentinel,
            nwounded_n_collisions: sentinel,
            nwounded_nwounded_collisions: sentinel,
            impact_parameter: f64::from(sentinel),
            event_plane_angle: 0.0,
            eccentricity: f64::from(sentinel),
            sigma_inel_nn: f64::from(sentinel),
        }
    }

    /// Fills the quantities AMPT provides (participants and impact parameter) from a header.
    pub fn from_header(header: &EventHeader, sentinel: i32) -> Self {
        Self {
            projectile_participants: saturating_i32(header.projectile_participants),
            target_participants: saturating_i32(header.target_participants),
            impact_parameter: header.impact_parameter,
            ..Self::unavailable(sentinel)
        }
    }
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

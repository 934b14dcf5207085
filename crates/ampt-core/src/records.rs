use serde::{Deserialize, Serialize};

use crate::kinematics::mass_shell_energy;

/// Event header line of an AMPT dump (eleven whitespace separated fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Sequential event number assigned by AMPT.
    pub event_number: u32,
    /// Test-particle index of the event.
    pub test_number: u32,
    /// Number of particle lines that follow, AMPT's participant lines included.
    pub particle_count: usize,
    /// Impact parameter of the collision in fm.
    pub impact_parameter: f64,
    /// Total number of participant nucleons in the projectile.
    pub projectile_participants: u32,
    /// Total number of participant nucleons in the target.
    pub target_participants: u32,
    /// Projectile participants due to elastic collisions.
    pub projectile_elastic: u32,
    /// Projectile participants due to inelastic collisions.
    pub projectile_inelastic: u32,
    /// Target participants due to elastic collisions.
    pub target_elastic: u32,
    /// Target participants due to inelastic collisions.
    pub target_inelastic: u32,
    /// Numeric value of the undocumented trailing field.
    pub trailing_value: f64,
    /// The trailing field exactly as it appeared in the input.
    pub trailing_token: String,
}

impl EventHeader {
    /// Number of whitespace separated tokens on a header line.
    pub const FIELD_COUNT: usize = 11;

    /// Renders the header back into AMPT's field order.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {} {} {}",
            self.event_number,
            self.test_number,
            self.particle_count,
            self.impact_parameter,
            self.projectile_participants,
            self.target_participants,
            self.projectile_elastic,
            self.projectile_inelastic,
            self.target_elastic,
            self.target_inelastic,
            self.trailing_token,
        )
    }
}

/// Particle line of an AMPT dump (nine whitespace separated fields).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    /// Particle identifier in the PDG numbering scheme.
    pub pid: i32,
    /// Momentum x component in GeV/c.
    pub px: f64,
    /// Momentum y component in GeV/c.
    pub py: f64,
    /// Momentum z component in GeV/c.
    pub pz: f64,
    /// Rest mass in GeV.
    pub mass: f64,
    /// Freeze-out x coordinate in fm.
    pub x: f64,
    /// Freeze-out y coordinate in fm.
    pub y: f64,
    /// Freeze-out z coordinate in fm.
    pub z: f64,
    /// Freeze-out time in fm/c.
    pub t: f64,
}

impl ParticleRecord {
    /// Number of whitespace separated tokens on a particle line.
    pub const FIELD_COUNT: usize = 9;

    /// Energy from the mass-shell relation.
    pub fn energy(&self) -> f64 {
        mass_shell_energy(self.px, self.py, self.pz, self.mass)
    }

    /// Renders the record back into AMPT's field order.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {}",
            self.pid, self.px, self.py, self.pz, self.mass, self.x, self.y, self.z, self.t
        )
    }
}

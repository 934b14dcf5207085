#![deny(missing_docs)]
#![doc = "Record types, kinematics and the shared error surface of the AMPT to HepMC converter."]

pub mod errors;
pub mod kinematics;
mod records;

pub use errors::{AmptError, ErrorInfo};
pub use kinematics::{is_equal_to_zero, mass_shell_energy, ZERO_TOLERANCE};
pub use records::{EventHeader, ParticleRecord};

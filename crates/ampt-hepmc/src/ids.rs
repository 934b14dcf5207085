use serde::{Deserialize, Serialize};

/// Handle of a vertex stored in an [`EventGraph`](crate::EventGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u32);

impl VertexId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }

    /// HepMC2 barcode of the vertex (-1, -2, ...).
    pub fn barcode(&self) -> i64 {
        -(i64::from(self.0) + 1)
    }
}

/// Handle of a particle stored in an [`EventGraph`](crate::EventGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(u32);

impl ParticleId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }

    /// HepMC2 barcode of the particle (10001, 10002, ...).
    pub fn barcode(&self) -> i64 {
        10_001 + i64::from(self.0)
    }
}

pub(crate) fn vertex_index(id: VertexId) -> usize {
    id.as_raw() as usize
}

pub(crate) fn particle_index(id: ParticleId) -> usize {
    id.as_raw() as usize
}

pub(crate) fn make_vertex(index: usize) -> VertexId {
    VertexId::from_raw(index as u32)
}

pub(crate) fn make_particle(index: usize) -> ParticleId {
    ParticleId::from_raw(index as u32)
}

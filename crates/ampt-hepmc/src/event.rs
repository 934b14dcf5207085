use ampt_core::errors::{AmptError, ErrorInfo};
use ampt_core::mass_shell_energy;
use serde::{Deserialize, Serialize};

use crate::heavy_ion::HeavyIon;
use crate::ids::{make_particle, make_vertex, particle_index, vertex_index, ParticleId, VertexId};

/// Momentum unit label carried by every event (GeV).
pub const MOMENTUM_UNIT: &str = "GEV";
/// Length unit label carried by every event (mm).
pub const LENGTH_UNIT: &str = "MM";

/// Lorentz four-vector `(x, y, z, t)`, used for momenta `(px, py, pz, e)` and positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourVector {
    /// x / px component.
    pub x: f64,
    /// y / py component.
    pub y: f64,
    /// z / pz component.
    pub z: f64,
    /// t / energy component.
    pub t: f64,
}

impl FourVector {
    /// Creates a four-vector from its components.
    pub const fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }

    /// The origin / null vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Momentum four-vector whose energy follows the mass-shell relation.
    pub fn on_shell(px: f64, py: f64, pz: f64, mass: f64) -> Self {
        Self::new(px, py, pz, mass_shell_energy(px, py, pz, mass))
    }
}

/// Role of a particle in the event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleStatus {
    /// Outgoing final-state particle.
    Final,
    /// Incoming beam pseudo-particle.
    Beam,
}

impl ParticleStatus {
    /// Numeric status code written to HepMC records.
    ///
    /// Beam entries use 2, which is what AliRoot's HepMC reader expects for them.
    pub fn code(&self) -> i32 {
        match self {
            ParticleStatus::Final => 1,
            ParticleStatus::Beam => 2,
        }
    }
}

/// A particle owned by an [`EventGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// PDG particle identifier.
    pub pdg_id: i32,
    /// Four-momentum `(px, py, pz, e)` in GeV.
    pub momentum: FourVector,
    /// Generated (rest) mass in GeV.
    pub generated_mass: f64,
    /// Status of the particle.
    pub status: ParticleStatus,
    production_vertex: Option<VertexId>,
    end_vertex: Option<VertexId>,
}

impl Particle {
    /// Creates a detached particle; the generated mass defaults to zero.
    pub fn new(momentum: FourVector, pdg_id: i32, status: ParticleStatus) -> Self {
        Self {
            pdg_id,
            momentum,
            generated_mass: 0.0,
            status,
            production_vertex: None,
            end_vertex: None,
        }
    }

    /// Sets the generated mass.
    pub fn with_generated_mass(mut self, mass: f64) -> Self {
        self.generated_mass = mass;
        self
    }

    /// Vertex that produced the particle, if any.
    pub fn production_vertex(&self) -> Option<VertexId> {
        self.production_vertex
    }

    /// Vertex the particle flows into, if any.
    pub fn end_vertex(&self) -> Option<VertexId> {
        self.end_vertex
    }
}

/// An interaction vertex owned by an [`EventGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Spacetime position in mm.
    pub position: FourVector,
    incoming: Vec<ParticleId>,
    outgoing: Vec<ParticleId>,
}

impl Vertex {
    fn new(position: FourVector) -> Self {
        Self {
            position,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Particles flowing into the vertex, in insertion order.
    pub fn incoming(&self) -> &[ParticleId] {
        &self.incoming
    }

    /// Particles produced at the vertex, in insertion order.
    pub fn outgoing(&self) -> &[ParticleId] {
        &self.outgoing
    }
}

/// One event record: an arena of vertices and particles plus event-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGraph {
    event_number: u32,
    weights: Vec<f64>,
    heavy_ion: Option<HeavyIon>,
    vertices: Vec<Vertex>,
    particles: Vec<Particle>,
    beam_particles: Option<[ParticleId; 2]>,
}

impl EventGraph {
    /// Creates an empty event with the given number.
    pub fn new(event_number: u32) -> Self {
        Self {
            event_number,
            weights: Vec::new(),
            heavy_ion: None,
            vertices: Vec::new(),
            particles: Vec::new(),
            beam_particles: None,
        }
    }

    /// Event number of the record.
    pub fn event_number(&self) -> u32 {
        self.event_number
    }

    /// Event weights in insertion order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Appends an event weight.
    pub fn push_weight(&mut self, weight: f64) {
        self.weights.push(weight);
    }

    /// Heavy-ion block, if set.
    pub fn heavy_ion(&self) -> Option<&HeavyIon> {
        self.heavy_ion.as_ref()
    }

    /// Attaches the heavy-ion block.
    pub fn set_heavy_ion(&mut self, heavy_ion: HeavyIon) {
        self.heavy_ion = Some(heavy_ion);
    }

    /// Adds a vertex at `position` and returns its handle.
    pub fn add_vertex(&mut self, position: FourVector) -> VertexId {
        self.vertices.push(Vertex::new(position));
        make_vertex(self.vertices.len() - 1)
    }

    /// Adds `particle` as an incoming particle of `vertex`.
    pub fn add_particle_in(
        &mut self,
        vertex: VertexId,
        mut particle: Particle,
    ) -> Result<ParticleId, AmptError> {
        self.vertex(vertex)?;
        particle.end_vertex = Some(vertex);
        let id = self.push_particle(particle);
        self.vertices[vertex_index(vertex)].incoming.push(id);
        Ok(id)
    }

    /// Adds `particle` as an outgoing particle of `vertex`.
    pub fn add_particle_out(
        &mut self,
        vertex: VertexId,
        mut particle: Particle,
    ) -> Result<ParticleId, AmptError> {
        self.vertex(vertex)?;
        particle.production_vertex = Some(vertex);
        let id = self.push_particle(particle);
        self.vertices[vertex_index(vertex)].outgoing.push(id);
        Ok(id)
    }

    /// Marks two stored particles as the event's beam particles.
    pub fn set_beam_particles(
        &mut self,
        first: ParticleId,
        second: ParticleId,
    ) -> Result<(), AmptError> {
        self.particle(first)?;
        self.particle(second)?;
        self.beam_particles = Some([first, second]);
        Ok(())
    }

    /// Handles of the two beam particles, if set.
    pub fn beam_particle_ids(&self) -> Option<[ParticleId; 2]> {
        self.beam_particles
    }

    /// Returns the vertex stored under `id`.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, AmptError> {
        self.vertices.get(vertex_index(id)).ok_or_else(|| {
            AmptError::Graph(
                ErrorInfo::new("unknown-vertex", "vertex is not part of the event")
                    .with_context("vertex", id.as_raw().to_string())
                    .with_context("event", self.event_number.to_string()),
            )
        })
    }

    /// Returns the particle stored under `id`.
    pub fn particle(&self, id: ParticleId) -> Result<&Particle, AmptError> {
        self.particles.get(particle_index(id)).ok_or_else(|| {
            AmptError::Graph(
                ErrorInfo::new("unknown-particle", "particle is not part of the event")
                    .with_context("particle", id.as_raw().to_string())
                    .with_context("event", self.event_number.to_string()),
            )
        })
    }

    /// Iterates over all vertices with their handles.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, vertex)| (make_vertex(idx), vertex))
    }

    /// Iterates over all particles with their handles.
    pub fn particles(&self) -> impl ExactSizeIterator<Item = (ParticleId, &Particle)> + '_ {
        self.particles
            .iter()
            .enumerate()
            .map(|(idx, particle)| (make_particle(idx), particle))
    }

    /// Iterates over final-state particles.
    pub fn final_state(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles
            .iter()
            .filter(|particle| particle.status == ParticleStatus::Final)
    }

    /// Number of stored vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of stored particles.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Checks that every stored handle points inside the arena.
    pub fn validate(&self) -> Result<(), AmptError> {
        for (_, vertex) in self.vertices() {
            for id in vertex.incoming.iter().chain(vertex.outgoing.iter()) {
                self.particle(*id)?;
            }
        }
        for (_, particle) in self.particles() {
            for id in particle.production_vertex.iter().chain(particle.end_vertex.iter()) {
                self.vertex(*id)?;
            }
        }
        if let Some([first, second]) = self.beam_particles {
            self.particle(first)?;
            self.particle(second)?;
        }
        Ok(())
    }

    fn push_particle(&mut self, particle: Particle) -> ParticleId {
        self.particles.push(particle);
        make_particle(self.particles.len() - 1)
    }
}

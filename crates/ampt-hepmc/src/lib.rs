#![deny(missing_docs)]
#![doc = "Arena-backed HepMC event records and the writers that persist them."]

pub mod ascii;
mod event;
mod heavy_ion;
mod ids;
mod jsonl;
mod serialization;
mod writer;

pub use ascii::{format_double, render_event, AsciiWriter};
pub use event::{
    EventGraph, FourVector, Particle, ParticleStatus, Vertex, LENGTH_UNIT, MOMENTUM_UNIT,
};
pub use heavy_ion::HeavyIon;
pub use ids::{ParticleId, VertexId};
pub use jsonl::JsonLinesWriter;
pub use serialization::{graph_from_json, graph_to_json, graph_to_json_line, read_json_lines};
pub use writer::{open_writer, EventWriter, MemoryWriter, OutputFormat};

#![deny(missing_docs)]
#![doc = include_str!("../docs/ampt-format.md")]

mod assembler;
mod beam;
mod buffer;
mod classify;
mod config;
mod cursor;
mod decode;
mod observer;
mod report;
mod session;

pub use assembler::{AssembledEvent, Assembly, EventAssembler};
pub use beam::{is_beam_particle, is_beam_particle_within};
pub use buffer::EventBuffer;
pub use classify::{classify, is_header, is_particle, token_count, LineKind};
pub use config::{BeamConfig, ConversionConfig};
pub use cursor::{CursorLine, Fetch, LineCursor};
pub use decode::{decode_header, decode_particle};
pub use observer::{ConversionObserver, NullObserver, TracingObserver};
pub use report::RunReport;
pub use session::{convert, Session};

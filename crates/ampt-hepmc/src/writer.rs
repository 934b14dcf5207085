use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use ampt_core::errors::{AmptError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::ascii::AsciiWriter;
use crate::event::EventGraph;
use crate::jsonl::JsonLinesWriter;

/// Sink for completed events, called once per accepted event in input order.
pub trait EventWriter {
    /// Persists one event.
    fn write_event(&mut self, event: &EventGraph) -> Result<(), AmptError>;

    /// Writes any trailer and flushes buffered output.
    fn finish(&mut self) -> Result<(), AmptError> {
        Ok(())
    }
}

impl<T: EventWriter + ?Sized> EventWriter for Box<T> {
    fn write_event(&mut self, event: &EventGraph) -> Result<(), AmptError> {
        (**self).write_event(event)
    }

    fn finish(&mut self) -> Result<(), AmptError> {
        (**self).finish()
    }
}

/// On-disk formats supported by [`open_writer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HepMC2 `IO_GenEvent` ASCII.
    #[default]
    Hepmc2,
    /// One JSON document per line.
    Jsonl,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Hepmc2 => write!(f, "hepmc2"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AmptError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "hepmc2" | "hepmc" => Ok(OutputFormat::Hepmc2),
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            other => Err(AmptError::Config(
                ErrorInfo::new("unknown-format", format!("unknown output format `{other}`"))
                    .with_hint("expected `hepmc2` or `jsonl`"),
            )),
        }
    }
}

/// Creates `path` and returns a buffered writer for `format`.
pub fn open_writer(path: &Path, format: OutputFormat) -> Result<Box<dyn EventWriter>, AmptError> {
    let file = File::create(path).map_err(|err| {
        AmptError::OutputOpen(
            ErrorInfo::new("output-open", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let out = BufWriter::new(file);
    tracing::debug!(path = %path.display(), %format, "opened event writer");
    Ok(match format {
        OutputFormat::Hepmc2 => Box::new(AsciiWriter::new(out)),
        OutputFormat::Jsonl => Box::new(JsonLinesWriter::new(out)),
    })
}

/// Keeps every written event in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    events: Vec<EventGraph>,
    finished: bool,
}

impl MemoryWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written so far, in order.
    pub fn events(&self) -> &[EventGraph] {
        &self.events
    }

    /// Whether [`EventWriter::finish`] was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes the writer and returns the collected events.
    pub fn into_events(self) -> Vec<EventGraph> {
        self.events
    }
}

impl EventWriter for MemoryWriter {
    fn write_event(&mut self, event: &EventGraph) -> Result<(), AmptError> {
        if self.finished {
            return Err(AmptError::Write(
                ErrorInfo::new("writer-finished", "event written after finish")
                    .with_context("event", event.event_number().to_string()),
            ));
        }
        self.events.push(event.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), AmptError> {
        self.finished = true;
        Ok(())
    }
}

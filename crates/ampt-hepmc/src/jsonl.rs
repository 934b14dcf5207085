use std::io::Write;

use ampt_core::errors::{AmptError, ErrorInfo};

use crate::event::EventGraph;
use crate::serialization::graph_to_json_line;
use crate::writer::EventWriter;

/// Writes one compact JSON document per event.
pub struct JsonLinesWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Wraps `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventWriter for JsonLinesWriter<W> {
    fn write_event(&mut self, event: &EventGraph) -> Result<(), AmptError> {
        let line = graph_to_json_line(event)?;
        writeln!(self.out, "{line}").map_err(|err| {
            AmptError::Write(
                ErrorInfo::new("write-event", err.to_string())
                    .with_context("event", event.event_number().to_string()),
            )
        })
    }

    fn finish(&mut self) -> Result<(), AmptError> {
        self.out
            .flush()
            .map_err(|err| AmptError::Write(ErrorInfo::new("flush", err.to_string())))
    }
}

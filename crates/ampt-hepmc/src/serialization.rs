use std::io::BufRead;

use ampt_core::errors::{AmptError, ErrorInfo};

use crate::event::EventGraph;

/// Serializes an event to a pretty-printed JSON document.
pub fn graph_to_json(event: &EventGraph) -> Result<String, AmptError> {
    serde_json::to_string_pretty(event)
        .map_err(|err| AmptError::Write(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Serializes an event to a single-line JSON document.
pub fn graph_to_json_line(event: &EventGraph) -> Result<String, AmptError> {
    serde_json::to_string(event)
        .map_err(|err| AmptError::Write(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores an event from JSON and checks its internal handles.
pub fn graph_from_json(json: &str) -> Result<EventGraph, AmptError> {
    let event: EventGraph = serde_json::from_str(json)
        .map_err(|err| AmptError::Decode(ErrorInfo::new("deserialize-json", err.to_string())))?;
    event.validate()?;
    Ok(event)
}

/// Reads every event of a JSON-lines stream, skipping blank lines.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<EventGraph>, AmptError> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| {
            AmptError::Read(
                ErrorInfo::new("read-json-lines", err.to_string())
                    .with_context("line", (idx + 1).to_string()),
            )
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let event = graph_from_json(&line).map_err(|err| match err {
            AmptError::Decode(info) => {
                AmptError::Decode(info.with_context("line", (idx + 1).to_string()))
            }
            other => other,
        })?;
        events.push(event);
    }
    Ok(events)
}

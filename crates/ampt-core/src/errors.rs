//! Structured error types shared across the converter crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`AmptError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (line numbers, paths, counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum AmptError {
    /// The AMPT input could not be opened.
    #[error("input error: {0}")]
    InputOpen(ErrorInfo),
    /// The output destination could not be created.
    #[error("output error: {0}")]
    OutputOpen(ErrorInfo),
    /// Reading from an already opened input failed.
    #[error("read error: {0}")]
    Read(ErrorInfo),
    /// A classified line carried a malformed numeric token.
    #[error("decode error: {0}")]
    Decode(ErrorInfo),
    /// The particle lines read disagree with the header's declared count.
    #[error("particle count mismatch: {0}")]
    ParticleCountMismatch(ErrorInfo),
    /// An event carried no particle lines at all.
    #[error("empty event: {0}")]
    EmptyEvent(ErrorInfo),
    /// Event graph construction errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// The event writer failed after it was opened.
    #[error("write error: {0}")]
    Write(ErrorInfo),
    /// Configuration loading and validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl AmptError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            AmptError::InputOpen(info)
            | AmptError::OutputOpen(info)
            | AmptError::Read(info)
            | AmptError::Decode(info)
            | AmptError::ParticleCountMismatch(info)
            | AmptError::EmptyEvent(info)
            | AmptError::Graph(info)
            | AmptError::Write(info)
            | AmptError::Config(info) => info,
        }
    }

    /// Returns true when the error aborts a run before any event is processed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AmptError::InputOpen(_) | AmptError::OutputOpen(_) | AmptError::Config(_)
        )
    }

    /// Returns true when the error rejects a single event rather than the run setup.
    pub fn is_event_level(&self) -> bool {
        matches!(
            self,
            AmptError::Decode(_) | AmptError::ParticleCountMismatch(_) | AmptError::EmptyEvent(_)
        )
    }
}

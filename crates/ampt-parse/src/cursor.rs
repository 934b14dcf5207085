use std::io::BufRead;

use ampt_core::errors::{AmptError, ErrorInfo};

/// Which line a [`LineCursor::line`] call should look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// The line already buffered (reads the first line on the very first call).
    Current,
    /// Advance one line, then look at it.
    Next,
}

/// A line handed out by the cursor together with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLine<'a> {
    /// Line number within the input.
    pub number: usize,
    /// Line text without its terminator.
    pub text: &'a str,
}

/// Buffered single-line lookahead over a text stream.
pub struct LineCursor<R> {
    reader: R,
    current: String,
    number: usize,
    started: bool,
    exhausted: bool,
}

impl<R: BufRead> LineCursor<R> {
    /// Wraps `reader`; nothing is read until the first [`line`](Self::line) call.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: String::new(),
            number: 0,
            started: false,
            exhausted: false,
        }
    }

    /// Returns the buffered line or advances first, depending on `fetch`.
    ///
    /// `Ok(None)` means the input is exhausted.
    pub fn line(&mut self, fetch: Fetch) -> Result<Option<CursorLine<'_>>, AmptError> {
        if fetch == Fetch::Next || !self.started {
            self.advance()?;
        }
        if self.exhausted {
            return Ok(None);
        }
        Ok(Some(CursorLine {
            number: self.number,
            text: &self.current,
        }))
    }

    /// Whether the end of input has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.number
    }

    fn advance(&mut self) -> Result<(), AmptError> {
        self.started = true;
        if self.exhausted {
            return Ok(());
        }
        self.current.clear();
        let read = self.reader.read_line(&mut self.current).map_err(|err| {
            AmptError::Read(
                ErrorInfo::new("read-line", err.to_string())
                    .with_context("line", (self.number + 1).to_string()),
            )
        })?;
        if read == 0 {
            self.exhausted = true;
            return Ok(());
        }
        self.number += 1;
        while self.current.ends_with(&['\n', '\r'][..]) {
            self.current.pop();
        }
        Ok(())
    }
}

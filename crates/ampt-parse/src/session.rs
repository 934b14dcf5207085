use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ampt_core::errors::{AmptError, ErrorInfo};
use ampt_hepmc::{open_writer, EventWriter};

use crate::assembler::{AssembledEvent, Assembly, EventAssembler};
use crate::config::ConversionConfig;
use crate::cursor::LineCursor;
use crate::observer::ConversionObserver;
use crate::report::RunReport;

/// Drives the assembler over one input and feeds accepted events to a writer.
pub struct Session<R, W> {
    cursor: LineCursor<R>,
    writer: W,
    assembler: EventAssembler,
}

impl<R: BufRead, W: EventWriter> Session<R, W> {
    /// Creates a session reading AMPT text from `reader`.
    pub fn new(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            cursor: LineCursor::new(reader),
            writer,
            assembler: EventAssembler::new(config),
        }
    }

    /// Converts events until the input ends or an event fails, then finishes the writer.
    ///
    /// The writer is finished on every path, so a session runs once.
    pub fn run<O: ConversionObserver + ?Sized>(&mut self, observer: &mut O) -> RunReport {
        let mut report = RunReport::default();
        let mut failure = loop {
            match self.assembler.next_event(&mut self.cursor, observer) {
                Ok(Assembly::Exhausted) => break None,
                Ok(Assembly::Event(event)) => {
                    report.events_expected = Some(event.header.event_number);
                    if let Err(err) = self.emit(&event, observer, &mut report) {
                        break Some(err);
                    }
                }
                Ok(Assembly::Rejected { header, error }) => {
                    report.events_expected = Some(header.event_number);
                    observer.on_event_rejected(&header, &error);
                    break Some(error);
                }
                Err(err) => break Some(err),
            }
        };

        if let Err(err) = self.writer.finish() {
            tracing::warn!(error = %err, "finishing the writer failed");
            failure.get_or_insert(err);
        }
        if let Some(err) = &failure {
            tracing::warn!(
                line = self.cursor.line_number(),
                error = %err,
                "conversion stopped"
            );
        }
        report.failure = failure;
        report
    }

    /// The writer receiving events.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes the session and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit<O: ConversionObserver + ?Sized>(
        &mut self,
        event: &AssembledEvent,
        observer: &mut O,
        report: &mut RunReport,
    ) -> Result<(), AmptError> {
        self.writer.write_event(&event.graph)?;
        report.events_written = report.events_written.saturating_add(1);
        report.particles_written += event.graph.final_state().count() as u64;
        report.beam_lines_filtered += event.beam_lines as u64;
        observer.on_event_written(&event.graph);
        tracing::debug!(
            event = event.header.event_number,
            written = report.events_written,
            "event emitted"
        );
        Ok(())
    }
}

/// Converts the AMPT file at `input` into `output` using `config.format`.
///
/// Returns `Err` only when the configuration is invalid or either file
/// cannot be opened; every other failure is carried by the report.
pub fn convert(
    input: &Path,
    output: &Path,
    config: &ConversionConfig,
    observer: &mut dyn ConversionObserver,
) -> Result<RunReport, AmptError> {
    config.validate()?;
    let file = File::open(input).map_err(|err| {
        AmptError::InputOpen(
            ErrorInfo::new("input-open", err.to_string())
                .with_context("path", input.display().to_string()),
        )
    })?;
    tracing::info!(path = %input.display(), "opened AMPT input");
    let writer = open_writer(output, config.format)?;
    tracing::info!(path = %output.display(), format = %config.format, "opened output");

    let mut session = Session::new(BufReader::new(file), writer, config.clone());
    let report = session.run(observer);
    tracing::info!(
        written = report.events_written,
        expected = ?report.events_expected,
        particles = report.particles_written,
        beam_lines = report.beam_lines_filtered,
        complete = report.is_complete(),
        "conversion finished"
    );
    Ok(report)
}

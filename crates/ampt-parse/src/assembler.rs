use std::io::BufRead;

use ampt_core::errors::AmptError;
use ampt_core::EventHeader;
use ampt_hepmc::{EventGraph, FourVector, HeavyIon, Particle, ParticleStatus, VertexId};

use crate::beam::is_beam_particle_within;
use crate::buffer::EventBuffer;
use crate::classify::{classify, LineKind};
use crate::config::ConversionConfig;
use crate::cursor::{Fetch, LineCursor};
use crate::decode::{at_line, decode_header, decode_particle};
use crate::observer::ConversionObserver;

/// An event that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledEvent {
    /// Decoded header of the event.
    pub header: EventHeader,
    /// The finished event record.
    pub graph: EventGraph,
    /// Particle lines dropped as AMPT beam lines.
    pub beam_lines: usize,
}

/// Outcome of one [`EventAssembler::next_event`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembly {
    /// A complete event ready for the writer.
    Event(AssembledEvent),
    /// The event under `header` failed validation or decoding and was dropped.
    Rejected {
        /// Header of the rejected event.
        header: EventHeader,
        /// Reason for the rejection.
        error: AmptError,
    },
    /// No further header exists in the input.
    Exhausted,
}

/// Turns the lines of one event into an [`EventGraph`].
#[derive(Debug, Clone)]
pub struct EventAssembler {
    config: ConversionConfig,
}

impl EventAssembler {
    /// Creates an assembler using the beam and heavy-ion settings of `config`.
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Seeks the next header, then builds and validates its event.
    ///
    /// Read failures, a malformed header and graph errors are returned as
    /// `Err`; a malformed particle line or a failed count check yields
    /// [`Assembly::Rejected`].
    pub fn next_event<R: BufRead, O: ConversionObserver + ?Sized>(
        &self,
        cursor: &mut LineCursor<R>,
        observer: &mut O,
    ) -> Result<Assembly, AmptError> {
        let header = match self.seek_header(cursor)? {
            Some(header) => header,
            None => return Ok(Assembly::Exhausted),
        };
        observer.on_header(&header);

        let (mut graph, vertex) = self.skeleton(&header)?;
        let mut buffer = EventBuffer::new(header);

        loop {
            let line = match cursor.line(Fetch::Next)? {
                Some(line) if classify(line.text) == LineKind::Particle => line,
                _ => break,
            };
            let number = line.number;
            let record = match decode_particle(line.text) {
                Ok(record) => record,
                Err(err) => {
                    return Ok(Assembly::Rejected {
                        header: buffer.into_header(),
                        error: at_line(err, number),
                    })
                }
            };
            observer.on_particle(buffer.counts(), &record);
            buffer.record(record);
            if is_beam_particle_within(&record, self.config.beam_tolerance) {
                buffer.note_beam_line();
                observer.on_beam_line(&record);
                continue;
            }
            let momentum = FourVector::on_shell(record.px, record.py, record.pz, record.mass);
            graph.add_particle_out(
                vertex,
                Particle::new(momentum, record.pid, ParticleStatus::Final)
                    .with_generated_mass(record.mass),
            )?;
        }

        if let Err(error) = buffer.validate() {
            return Ok(Assembly::Rejected {
                header: buffer.into_header(),
                error,
            });
        }
        let beam_lines = buffer.beam_lines();
        Ok(Assembly::Event(AssembledEvent {
            header: buffer.into_header(),
            graph,
            beam_lines,
        }))
    }

    fn seek_header<R: BufRead>(
        &self,
        cursor: &mut LineCursor<R>,
    ) -> Result<Option<EventHeader>, AmptError> {
        let mut fetch = Fetch::Current;
        loop {
            let line = match cursor.line(fetch)? {
                Some(line) => line,
                None => return Ok(None),
            };
            if classify(line.text) == LineKind::Header {
                let number = line.number;
                return decode_header(line.text)
                    .map(Some)
                    .map_err(|err| at_line(err, number));
            }
            tracing::trace!(line = line.number, "skipping line outside an event");
            fetch = Fetch::Next;
        }
    }

    /// Event with its vertex, both beams and the heavy-ion block, before any particle is added.
    pub fn skeleton(&self, header: &EventHeader) -> Result<(EventGraph, VertexId), AmptError> {
        let mut graph = EventGraph::new(header.event_number);
        graph.push_weight(self.config.event_weight);
        graph.set_heavy_ion(HeavyIon::from_header(header, self.config.sentinel));
        let vertex = graph.add_vertex(FourVector::zero());
        let first = graph.add_particle_in(vertex, self.beam_particle())?;
        let second = graph.add_particle_in(vertex, self.beam_particle())?;
        graph.set_beam_particles(first, second)?;
        Ok((graph, vertex))
    }

    fn beam_particle(&self) -> Particle {
        let beam = &self.config.beam;
        let momentum = FourVector::on_shell(0.0, 0.0, beam.pz, beam.mass);
        Particle::new(momentum, beam.pdg_id, ParticleStatus::Beam).with_generated_mass(beam.mass)
    }
}

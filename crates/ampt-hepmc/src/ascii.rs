//! HepMC2 `IO_GenEvent` text output.
//!
//! Integers are written as-is. Doubles use 16-digit scientific notation with a
//! signed two-digit exponent, except exact zeros which are written as `0`.

use std::fmt::Write as _;
use std::io::Write;

use ampt_core::errors::{AmptError, ErrorInfo};

use crate::event::{EventGraph, Particle, LENGTH_UNIT, MOMENTUM_UNIT};
use crate::heavy_ion::HeavyIon;
use crate::ids::ParticleId;
use crate::writer::EventWriter;

const VERSION_LINE: &str = "HepMC::Version 2.06.09";
const START_LINE: &str = "HepMC::IO_GenEvent-START_EVENT_LISTING";
const END_LINE: &str = "HepMC::IO_GenEvent-END_EVENT_LISTING";

/// Streams events as HepMC2 `IO_GenEvent` records.
pub struct AsciiWriter<W: Write> {
    out: W,
    started: bool,
    finished: bool,
}

impl<W: Write> AsciiWriter<W> {
    /// Wraps `out`. The listing header is written with the first event.
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: false,
            finished: false,
        }
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str, event: Option<u32>) -> Result<(), AmptError> {
        self.out.write_all(text.as_bytes()).map_err(|err| {
            let mut info = ErrorInfo::new("write-event", err.to_string());
            if let Some(number) = event {
                info = info.with_context("event", number.to_string());
            }
            AmptError::Write(info)
        })
    }
}

impl<W: Write> EventWriter for AsciiWriter<W> {
    fn write_event(&mut self, event: &EventGraph) -> Result<(), AmptError> {
        if self.finished {
            return Err(AmptError::Write(
                ErrorInfo::new("writer-finished", "event written after the end of listing")
                    .with_context("event", event.event_number().to_string()),
            ));
        }
        if !self.started {
            self.emit(&format!("\n{VERSION_LINE}\n{START_LINE}\n"), None)?;
            self.started = true;
        }
        let record = render_event(event)?;
        self.emit(&record, Some(event.event_number()))
    }

    fn finish(&mut self) -> Result<(), AmptError> {
        if self.started && !self.finished {
            self.emit(&format!("{END_LINE}\n"), None)?;
        }
        self.finished = true;
        self.out
            .flush()
            .map_err(|err| AmptError::Write(ErrorInfo::new("flush", err.to_string())))
    }
}

/// Renders the `E`, `N`, `U`, `H`, `V` and `P` lines of one event.
pub fn render_event(event: &EventGraph) -> Result<String, AmptError> {
    let mut text = String::new();
    let beams = event.beam_particle_ids();

    text.push('E');
    push_int(&mut text, i64::from(event.event_number()));
    push_int(&mut text, -1); // multi parton interactions
    push_double(&mut text, -1.0); // event scale
    push_double(&mut text, -1.0); // alpha QCD
    push_double(&mut text, -1.0); // alpha QED
    push_int(&mut text, 0); // signal process id
    push_int(&mut text, 0); // signal process vertex
    push_int(&mut text, event.vertex_count() as i64);
    match beams {
        Some([first, second]) => {
            push_int(&mut text, first.barcode());
            push_int(&mut text, second.barcode());
        }
        None => {
            push_int(&mut text, 0);
            push_int(&mut text, 0);
        }
    }
    push_int(&mut text, 0); // random states
    push_int(&mut text, event.weights().len() as i64);
    for weight in event.weights() {
        push_double(&mut text, *weight);
    }
    text.push('\n');

    if !event.weights().is_empty() {
        text.push('N');
        push_int(&mut text, event.weights().len() as i64);
        for idx in 0..event.weights().len() {
            let _ = write!(text, " \"{idx}\"");
        }
        text.push('\n');
    }

    let _ = writeln!(text, "U {MOMENTUM_UNIT} {LENGTH_UNIT}");

    if let Some(heavy_ion) = event.heavy_ion() {
        push_heavy_ion(&mut text, heavy_ion);
    }

    for (vertex_id, vertex) in event.vertices() {
        let mut orphans = Vec::new();
        for id in vertex.incoming() {
            if event.particle(*id)?.production_vertex().is_none() {
                orphans.push(*id);
            }
        }
        text.push('V');
        push_int(&mut text, vertex_id.barcode());
        push_int(&mut text, 0);
        push_double(&mut text, vertex.position.x);
        push_double(&mut text, vertex.position.y);
        push_double(&mut text, vertex.position.z);
        push_double(&mut text, vertex.position.t);
        push_int(&mut text, orphans.len() as i64);
        push_int(&mut text, vertex.outgoing().len() as i64);
        push_int(&mut text, 0); // vertex weights
        text.push('\n');

        for id in orphans.iter().chain(vertex.outgoing().iter()) {
            push_particle(&mut text, event, *id, event.particle(*id)?)?;
        }
    }
    Ok(text)
}

fn push_heavy_ion(text: &mut String, heavy_ion: &HeavyIon) {
    text.push('H');
    for value in [
        heavy_ion.hard_scatterings,
        heavy_ion.projectile_participants,
        heavy_ion.target_participants,
        heavy_ion.nn_collisions,
        heavy_ion.spectator_neutrons,
        heavy_ion.spectator_protons,
        heavy_ion.n_nwounded_collisions,
        heavy_ion.nwounded_n_collisions,
        heavy_ion.nwounded_nwounded_collisions,
    ] {
        push_int(text, i64::from(value));
    }
    for value in [
        heavy_ion.impact_parameter,
        heavy_ion.event_plane_angle,
        heavy_ion.eccentricity,
        heavy_ion.sigma_inel_nn,
    ] {
        push_double(text, value);
    }
    text.push('\n');
}

fn push_particle(
    text: &mut String,
    event: &EventGraph,
    id: ParticleId,
    particle: &Particle,
) -> Result<(), AmptError> {
    let end_vertex = match particle.end_vertex() {
        Some(vertex) => {
            event.vertex(vertex)?;
            vertex.barcode()
        }
        None => 0,
    };
    text.push('P');
    push_int(text, id.barcode());
    push_int(text, i64::from(particle.pdg_id));
    push_double(text, particle.momentum.x);
    push_double(text, particle.momentum.y);
    push_double(text, particle.momentum.z);
    push_double(text, particle.momentum.t);
    push_double(text, particle.generated_mass);
    push_int(text, i64::from(particle.status.code()));
    push_double(text, 0.0); // polarization theta
    push_double(text, 0.0); // polarization phi
    push_int(text, end_vertex);
    push_int(text, 0); // flow entries
    text.push('\n');
    Ok(())
}

fn push_int(text: &mut String, value: i64) {
    let _ = write!(text, " {value}");
}

fn push_double(text: &mut String, value: f64) {
    text.push(' ');
    text.push_str(&format_double(value));
}

/// Formats a double the way a C++ stream in scientific mode with precision 16 does.
pub fn format_double(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string().to_ascii_lowercase();
    }
    let formatted = format!("{value:.16e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_follow_stream_layout() {
        assert_eq!(format_double(0.0), "0");
        assert_eq!(format_double(-0.0), "0");
        assert_eq!(format_double(1.0), "1.0000000000000000e+00");
        assert_eq!(format_double(140.0), "1.4000000000000000e+02");
        assert_eq!(format_double(-0.00125), "-1.2500000000000000e-03");
        assert_eq!(format_double(1.0e120), "1.0000000000000000e+120");
        assert_eq!(format_double(f64::INFINITY), "inf");
    }
}

use std::fs;
use std::io::{BufReader, Cursor};

use ampt_core::errors::AmptError;
use ampt_core::{EventHeader, ParticleRecord};
use ampt_hepmc::{read_json_lines, MemoryWriter, OutputFormat};
use ampt_parse::{convert, ConversionConfig, NullObserver, RunReport, Session, TracingObserver};
use tempfile::tempdir;

fn header_line(event: u32, count: usize) -> String {
    EventHeader {
        event_number: event,
        test_number: 1,
        particle_count: count,
        impact_parameter: 3.25,
        projectile_participants: 180,
        target_participants: 176,
        projectile_elastic: 2,
        projectile_inelastic: 178,
        target_elastic: 1,
        target_inelastic: 175,
        trailing_value: 0.0,
        trailing_token: "0".to_string(),
    }
    .to_line()
}

fn particle_line(pid: i32, px: f64, py: f64) -> String {
    ParticleRecord {
        pid,
        px,
        py,
        pz: 1.5,
        mass: 0.13957,
        x: 0.0,
        y: 0.0,
        z: 0.0,
        t: 0.0,
    }
    .to_line()
}

fn event_text(event: u32, declared: usize, real: usize, beams: usize) -> Vec<String> {
    let mut lines = vec![header_line(event, declared)];
    for idx in 0..real {
        lines.push(particle_line(211, 0.1 + idx as f64 * 0.01, -0.2));
    }
    for _ in 0..beams {
        lines.push(particle_line(2212, 0.0, 0.0));
    }
    lines
}

fn run_memory(text: String) -> (RunReport, MemoryWriter) {
    let mut session = Session::new(
        Cursor::new(text),
        MemoryWriter::new(),
        ConversionConfig::default(),
    );
    let report = session.run(&mut NullObserver);
    (report, session.into_writer())
}

#[test]
fn well_formed_input_is_complete() {
    let mut lines = event_text(1, 4, 3, 1);
    lines.extend(event_text(2, 2, 2, 0));
    let (report, writer) = run_memory(lines.join("\n") + "\n");

    assert!(report.is_complete());
    assert_eq!(report.events_written, 2);
    assert_eq!(report.events_expected, Some(2));
    assert_eq!(report.particles_written, 5);
    assert_eq!(report.beam_lines_filtered, 1);
    assert_eq!(report.summary_line(), "converted 2 of 2 events");
    assert!(writer.is_finished());
    let numbers: Vec<u32> = writer.events().iter().map(|event| event.event_number()).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn mismatch_in_second_event_stops_at_the_first() {
    let mut lines = event_text(1, 3, 3, 0);
    lines.extend(event_text(2, 5, 4, 0));
    let (report, writer) = run_memory(lines.join("\n"));

    assert!(!report.is_complete());
    assert_eq!(report.events_written, 1);
    assert_eq!(report.events_expected, Some(2));
    assert_eq!(report.summary_line(), "converted 1 of 2 events");
    assert!(matches!(report.failure, Some(AmptError::ParticleCountMismatch(_))));
    assert_eq!(writer.events().len(), 1);
    assert!(writer.is_finished());
}

#[test]
fn run_stops_at_first_failure_without_resync() {
    let mut lines = event_text(1, 2, 1, 0);
    lines.extend(event_text(2, 1, 1, 0));
    let (report, writer) = run_memory(lines.join("\n"));

    assert_eq!(report.events_written, 0);
    assert_eq!(report.events_expected, Some(1));
    assert!(writer.events().is_empty());
    assert!(writer.is_finished());
}

#[test]
fn empty_input_is_a_complete_run() {
    let (report, writer) = run_memory(String::new());
    assert!(report.is_complete());
    assert_eq!(report.events_written, 0);
    assert_eq!(report.events_expected, None);
    assert_eq!(report.summary_line(), "converted 0 of 0 events");
    assert!(writer.is_finished());
}

#[test]
fn trailing_lines_after_the_last_event_are_ignored() {
    let mut lines = event_text(1, 1, 1, 0);
    lines.push("end of run".to_string());
    lines.push(String::new());
    let (report, _) = run_memory(lines.join("\n"));
    assert!(report.is_complete());
    assert_eq!(report.events_written, 1);
}

#[test]
fn convert_writes_hepmc_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ampt.dat");
    let output = dir.path().join("events.hepmc");
    let mut lines = event_text(1, 3, 2, 1);
    lines.extend(event_text(2, 1, 1, 0));
    fs::write(&input, lines.join("\n") + "\n").unwrap();

    let config = ConversionConfig::default();
    let report = convert(&input, &output, &config, &mut TracingObserver::default()).unwrap();
    assert!(report.is_complete());

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("\nHepMC::Version 2.06.09\nHepMC::IO_GenEvent-START_EVENT_LISTING\n"));
    assert!(text.ends_with("HepMC::IO_GenEvent-END_EVENT_LISTING\n"));
    assert_eq!(text.lines().filter(|line| line.starts_with("E ")).count(), 2);
    // two beams per event plus three final-state particles in total
    assert_eq!(text.lines().filter(|line| line.starts_with("P ")).count(), 7);
    assert!(text.lines().any(|line| line.starts_with("E 2 ")));
}

#[test]
fn convert_writes_json_lines() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ampt.dat");
    let output = dir.path().join("events.jsonl");
    fs::write(&input, event_text(4, 2, 2, 0).join("\n")).unwrap();

    let config = ConversionConfig {
        format: OutputFormat::Jsonl,
        ..ConversionConfig::default()
    };
    let report = convert(&input, &output, &config, &mut NullObserver).unwrap();
    assert_eq!(report.events_written, 1);

    let file = fs::File::open(&output).unwrap();
    let events = read_json_lines(BufReader::new(file)).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_number(), 4);
    assert_eq!(events[0].final_state().count(), 2);
}

#[test]
fn missing_input_is_fatal_and_leaves_no_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("events.hepmc");
    let err = convert(
        &dir.path().join("absent.dat"),
        &output,
        &ConversionConfig::default(),
        &mut NullObserver,
    )
    .unwrap_err();
    assert!(matches!(err, AmptError::InputOpen(_)));
    assert!(err.is_fatal());
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_fatal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ampt.dat");
    fs::write(&input, event_text(1, 1, 1, 0).join("\n")).unwrap();
    let err = convert(
        &input,
        &dir.path().join("missing").join("events.hepmc"),
        &ConversionConfig::default(),
        &mut NullObserver,
    )
    .unwrap_err();
    assert!(matches!(err, AmptError::OutputOpen(_)));
}

#[test]
fn invalid_config_is_fatal() {
    let dir = tempdir().unwrap();
    let config = ConversionConfig {
        beam_tolerance: 0.0,
        ..ConversionConfig::default()
    };
    let err = convert(
        &dir.path().join("ampt.dat"),
        &dir.path().join("events.hepmc"),
        &config,
        &mut NullObserver,
    )
    .unwrap_err();
    assert!(matches!(err, AmptError::Config(_)));
}

#[test]
fn report_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let mut lines = event_text(1, 1, 1, 0);
    lines.extend(event_text(2, 3, 1, 0));
    let (report, _) = run_memory(lines.join("\n"));

    let path = dir.path().join("reports").join("summary.json");
    report.write_json(&path).unwrap();
    let loaded = RunReport::load(&path).unwrap();
    assert_eq!(loaded, report);

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["events_written"], 1);
    assert_eq!(value["failure"]["family"], "ParticleCountMismatch");
}

use ampt_core::errors::{AmptError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("line", "12")
        .with_context("event", "3")
}

#[test]
fn open_failures_are_fatal() {
    let input = AmptError::InputOpen(sample_info("input-open", "no such file"));
    let output = AmptError::OutputOpen(sample_info("output-open", "permission denied"));
    assert!(input.is_fatal());
    assert!(output.is_fatal());
    assert!(!input.is_event_level());
    assert_eq!(input.info().code, "input-open");
}

#[test]
fn event_level_failures_are_not_fatal() {
    let decode = AmptError::Decode(sample_info("particle-field", "bad token"));
    let mismatch = AmptError::ParticleCountMismatch(sample_info("count-mismatch", "3 != 4"));
    let empty = AmptError::EmptyEvent(sample_info("empty-event", "no particles"));
    for err in [decode, mismatch, empty] {
        assert!(!err.is_fatal());
        assert!(err.is_event_level());
        assert!(err.info().context.contains_key("line"));
    }
}

#[test]
fn display_includes_context_and_hint() {
    let err = AmptError::ParticleCountMismatch(
        ErrorInfo::new("count-mismatch", "declared 4 particles, read 3")
            .with_context("event", "2")
            .with_hint("the header count includes AMPT participant lines"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("particle count mismatch: declared 4 particles, read 3"));
    assert!(rendered.contains("code: count-mismatch"));
    assert!(rendered.contains("event=2"));
    assert!(rendered.contains("hint: the header count includes"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = AmptError::EmptyEvent(sample_info("empty-event", "no particles"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "EmptyEvent");
    assert_eq!(json["detail"]["code"], "empty-event");
    let decoded: AmptError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}

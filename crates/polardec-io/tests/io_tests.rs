//! Integration tests for polardec-io.

use polardec_core::DecompositionConfig;
use polardec_io::batch::run_batch;
use polardec_io::contract::{DecompositionInput, DecompositionOutput, LabeledMatrix, ResultStatus};
use polardec_io::validator::validate_input;
use polardec_optics::builders::{depolarizer, linear_diattenuator, linear_polarizer, linear_retarder};
use polardec_optics::MuellerMatrix;
use polardec_telemetry::{EventBus, EventKind, VecSink};

fn sample() -> MuellerMatrix {
    depolarizer(0.2, 0.8, 0.6, 0.5).unwrap()
        * linear_retarder(0.9, 0.4).unwrap()
        * linear_diattenuator(0.1, 0.3, 0.9).unwrap()
}

fn make_valid_input() -> DecompositionInput {
    DecompositionInput {
        matrices: vec![
            LabeledMatrix::new("sample", &sample()),
            LabeledMatrix::new("identity", &MuellerMatrix::IDENTITY),
        ],
        config: None,
    }
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn input_round_trip() {
    let input = make_valid_input();
    let json = input.to_json_string().unwrap();
    let recovered = DecompositionInput::from_json_str(&json).unwrap();
    assert_eq!(recovered.matrices.len(), 2);
    assert_eq!(recovered.matrices[1].rows, MuellerMatrix::IDENTITY.to_rows());
    assert!(recovered.config.is_none());
}

#[test]
fn input_with_partial_config() {
    let json = r#"{
        "matrices": [{"label": "a", "rows": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}],
        "config": {"fast_path": false}
    }"#;
    let input = DecompositionInput::from_json_str(json).unwrap();
    let config = input.config.unwrap();
    assert!(!config.fast_path);
    assert_eq!(config.singular_tolerance, DecompositionConfig::default().singular_tolerance);
}

#[test]
fn malformed_input_is_serialization_error() {
    let err = DecompositionInput::from_json_str("{\"matrices\": 3}").unwrap_err();
    assert!(err.to_string().contains("Serialization error"));
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_input_passes() {
    assert!(validate_input(&make_valid_input()).is_ok());
}

#[test]
fn empty_batch_rejected() {
    let input = DecompositionInput {
        matrices: Vec::new(),
        config: None,
    };
    assert!(validate_input(&input).is_err());
}

#[test]
fn duplicate_label_rejected() {
    let mut input = make_valid_input();
    input.matrices[1].label = "sample".into();
    assert!(validate_input(&input).is_err());
}

#[test]
fn blank_label_rejected() {
    let mut input = make_valid_input();
    input.matrices[0].label = "  ".into();
    assert!(validate_input(&input).is_err());
}

#[test]
fn invalid_config_rejected() {
    let mut input = make_valid_input();
    input.config = Some(DecompositionConfig {
        physical_tolerance: 0.0,
        ..Default::default()
    });
    assert!(validate_input(&input).is_err());
    assert!(run_batch(&input, None).is_err());
}

// ─── Batch Tests ──────────────────────────────────────────────

#[test]
fn batch_decomposes_every_matrix() {
    let input = make_valid_input();
    let output = run_batch(&input, None).unwrap();
    assert_eq!(output.results.len(), 2);
    assert_eq!(output.succeeded(), 2);

    let result = output.get("sample").unwrap();
    assert_eq!(result.status, ResultStatus::Ok);
    let rebuilt = result.depolarizer.unwrap() * result.retarder.unwrap() * result.diattenuator.unwrap();
    assert!(rebuilt.approx_eq(&sample(), 1e-10));
    assert!(result.residual.unwrap() < 1e-12);
    assert!(result.error.is_none());
}

#[test]
fn failed_matrix_does_not_abort_batch() {
    let mut input = make_valid_input();
    input
        .matrices
        .insert(1, LabeledMatrix::new("polarizer", &linear_polarizer(0.3).unwrap()));
    let output = run_batch(&input, None).unwrap();

    assert_eq!(output.results.len(), 3);
    assert_eq!(output.failed(), 1);
    let failed = &output.results[1];
    assert_eq!(failed.label, "polarizer");
    assert!(failed.is_failed());
    assert!(failed.error.as_deref().unwrap().contains("Non-physical"));
    assert!(failed.retarder.is_none());
    assert_eq!(output.results[2].label, "identity");
}

#[test]
fn degenerate_status_reported() {
    let m = depolarizer(0.0, 0.7, 0.4, 0.0).unwrap() * linear_retarder(0.5, 0.1).unwrap();
    let input = DecompositionInput {
        matrices: vec![LabeledMatrix::new("collapsed", &m)],
        config: None,
    };
    let output = run_batch(&input, None).unwrap();
    let result = &output.results[0];
    assert_eq!(result.status, ResultStatus::Degenerate);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn output_round_trip() {
    let output = run_batch(&make_valid_input(), None).unwrap();
    let json = output.to_json_string().unwrap();
    assert!(json.contains("\"status\": \"ok\""));
    let recovered = DecompositionOutput::from_json_str(&json).unwrap();
    assert_eq!(recovered.results.len(), 2);
    assert_eq!(recovered.results[0].label, "sample");
    assert!(recovered.results[0]
        .retarder
        .unwrap()
        .approx_eq(&output.results[0].retarder.unwrap(), 1e-12));
}

#[test]
fn output_written_to_file() {
    let output = run_batch(&make_valid_input(), None).unwrap();
    let path = std::env::temp_dir().join(format!("polardec-output-{}.json", std::process::id()));
    output.write_to(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let recovered = DecompositionOutput::from_json_str(&text).unwrap();
    assert_eq!(recovered.results.len(), output.results.len());
    assert_eq!(recovered.get("identity").unwrap().status, ResultStatus::Ok);
}

#[test]
fn write_to_missing_directory_is_io_error() {
    let output = DecompositionOutput::default();
    let path = std::env::temp_dir().join("polardec-no-such-dir").join("out.json");
    let err = output.write_to(&path).unwrap_err();
    assert!(matches!(err, polardec_types::PolarError::Io(_)));
}

#[test]
fn batch_emits_telemetry() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    let mut input = make_valid_input();
    input
        .matrices
        .push(LabeledMatrix::new("polarizer", &linear_polarizer(0.0).unwrap()));
    run_batch(&input, Some(&bus)).unwrap();
    bus.flush();

    let events = sink.events();
    let begins = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::DecompositionBegin { .. }))
        .count();
    assert_eq!(begins, 3);
    let failures: Vec<_> = events.iter().filter(|e| e.is_failure()).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 2);
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, EventKind::Reconstruction { .. })));
}

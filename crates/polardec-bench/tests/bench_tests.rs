//! Integration tests for polardec-bench.

use polardec_bench::metrics::BenchmarkMetrics;
use polardec_bench::runner::BenchmarkRunner;
use polardec_bench::scenarios::{Scenario, ScenarioKind};
use polardec_core::{DecompositionConfig, PolarDecomposer};
use polardec_optics::MuellerMatrix;

fn strict() -> PolarDecomposer {
    PolarDecomposer::new(DecompositionConfig::strict()).unwrap()
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn scenario_names_round_trip() {
    assert_eq!(ScenarioKind::all().len(), 4);
    for &kind in ScenarioKind::all() {
        assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(ScenarioKind::from_name("hanging_sheet"), None);
}

#[test]
fn scenario_kind_serializes_snake_case() {
    let json = serde_json::to_string(&ScenarioKind::NearSingular).unwrap();
    assert_eq!(json, "\"near_singular\"");
}

#[test]
fn generation_is_deterministic() {
    let a = Scenario::generate(ScenarioKind::FullDepolarizing, 10, 7).unwrap();
    let b = Scenario::generate(ScenarioKind::FullDepolarizing, 10, 7).unwrap();
    let c = Scenario::generate(ScenarioKind::FullDepolarizing, 10, 8).unwrap();
    assert_eq!(a.samples, b.samples);
    assert_ne!(a.samples, c.samples);
    assert_eq!(a.len(), 10);
}

#[test]
fn samples_are_products_of_factors() {
    let s = Scenario::generate(ScenarioKind::FullDepolarizing, 5, 1).unwrap();
    for sample in &s.samples {
        let product = sample.depolarizer * sample.retarder * sample.diattenuator;
        assert_eq!(product, sample.matrix);
        assert!(sample.matrix.m00() > 0.0);
        assert!(sample.matrix.diattenuation() < 1.0);
    }
}

#[test]
fn pure_diattenuator_has_identity_factors() {
    let s = Scenario::generate(ScenarioKind::PureDiattenuator, 5, 3).unwrap();
    for sample in &s.samples {
        assert_eq!(sample.depolarizer, MuellerMatrix::IDENTITY);
        assert_eq!(sample.retarder, MuellerMatrix::IDENTITY);
    }
}

#[test]
fn default_scenario_size() {
    let s = Scenario::from_kind(ScenarioKind::RetarderDiattenuator).unwrap();
    assert_eq!(s.len(), polardec_bench::scenarios::DEFAULT_SAMPLES);
    assert!(!s.is_empty());
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn every_scenario_recovers_factors() {
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::generate(kind, 40, 11).unwrap();
        let metrics = BenchmarkRunner::run(&scenario, &strict());
        assert_eq!(metrics.samples, 40);
        assert!(metrics.passes(1e-6), "{}: {:?}", kind.name(), metrics);
        assert!(metrics.max_residual < 1e-10);
    }
}

#[test]
fn near_singular_reports_degenerate_axes() {
    let scenario = Scenario::generate(ScenarioKind::NearSingular, 20, 5).unwrap();
    let metrics = BenchmarkRunner::run(&scenario, &PolarDecomposer::default());
    assert_eq!(metrics.failures, 0);
    assert_eq!(metrics.degenerate, 20);
}

#[test]
fn full_depolarizing_has_no_degenerate_axes() {
    let scenario = Scenario::generate(ScenarioKind::FullDepolarizing, 20, 5).unwrap();
    let metrics = BenchmarkRunner::run(&scenario, &PolarDecomposer::default());
    assert_eq!(metrics.degenerate, 0);
    assert!(metrics.max_time > 0.0);
}

#[test]
fn empty_scenario_metrics() {
    let scenario = Scenario::generate(ScenarioKind::PureDiattenuator, 0, 0).unwrap();
    let metrics = BenchmarkRunner::run(&scenario, &PolarDecomposer::default());
    assert_eq!(metrics.samples, 0);
    assert_eq!(metrics.min_time, 0.0);
    assert_eq!(metrics.avg_time, 0.0);
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn csv_output() {
    let m = BenchmarkMetrics {
        scenario: "full_depolarizing".into(),
        samples: 200,
        failures: 0,
        degenerate: 0,
        max_factor_error: 1.5e-14,
        max_residual: 2.0e-16,
        total_wall_time: 0.01,
        avg_time: 5e-5,
        min_time: 4e-5,
        max_time: 9e-5,
    };
    let csv = BenchmarkMetrics::to_csv(&[m.clone(), m]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("scenario,samples"));
    assert!(lines[1].starts_with("full_depolarizing,200,0,0,1.500e-14"));
    assert_eq!(
        lines[0].split(',').count(),
        lines[1].split(',').count()
    );
}

#[test]
fn passes_requires_no_failures() {
    let m = BenchmarkMetrics {
        scenario: "x".into(),
        samples: 1,
        failures: 1,
        degenerate: 0,
        max_factor_error: 0.0,
        max_residual: 0.0,
        total_wall_time: 0.0,
        avg_time: 0.0,
        min_time: 0.0,
        max_time: 0.0,
    };
    assert!(!m.passes(1.0));
}

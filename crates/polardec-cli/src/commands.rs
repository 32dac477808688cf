//! CLI command implementations.

use std::path::Path;

use polardec_bench::metrics::BenchmarkMetrics;
use polardec_bench::runner::BenchmarkRunner;
use polardec_bench::scenarios::{Scenario, ScenarioKind};
use polardec_core::{DecompositionConfig, PolarDecomposer};
use polardec_io::batch::run_batch;
use polardec_io::contract::{DecompositionInput, LabeledMatrix, ResultStatus};
use polardec_io::validator::validate_input;
use polardec_telemetry::{EventBus, TracingSink};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn parse_scenario(name: &str) -> Result<ScenarioKind, Box<dyn std::error::Error>> {
    ScenarioKind::from_name(name).ok_or_else(|| {
        let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
        format!("Unknown scenario: '{name}'. Available: {}", available.join(", ")).into()
    })
}

fn load_config(path: &str) -> Result<DecompositionConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(DecompositionConfig::from_toml_str(&text)?)
}

fn emit_text(text: &str, output_path: Option<&str>) -> CliResult {
    match output_path {
        Some(path) => {
            std::fs::write(path, text)?;
            eprintln!("Results written to: {path}");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Decompose a JSON batch.
pub fn decompose(input_path: &str, output_path: Option<&str>, config_path: Option<&str>) -> CliResult {
    let mut input = DecompositionInput::from_path(Path::new(input_path))?;
    if let Some(path) = config_path {
        input.config = Some(load_config(path)?);
    }

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));

    let output = run_batch(&input, Some(&bus))?;
    bus.finish();

    for result in &output.results {
        let status = match result.status {
            ResultStatus::Ok => "ok",
            ResultStatus::Degenerate => "degenerate",
            ResultStatus::Failed => "FAILED",
        };
        match (&result.parameters, &result.error) {
            (Some(p), _) => eprintln!(
                "  {:<20} {:<10} d={:.4} R={:.4} rad Δ={:.4}",
                result.label, status, p.diattenuation, p.retardance, p.depolarization_power
            ),
            (None, Some(e)) => eprintln!("  {:<20} {:<10} {e}", result.label, status),
            (None, None) => eprintln!("  {:<20} {status}", result.label),
        }
    }
    eprintln!(
        "{} decomposed, {} failed",
        output.succeeded(),
        output.failed()
    );

    match output_path {
        Some(path) => {
            output.write_to(Path::new(path))?;
            eprintln!("Results written to: {path}");
            Ok(())
        }
        None => emit_text(&output.to_json_string()?, None),
    }
}

/// Write a batch synthesized from a benchmark scenario.
pub fn synthesize(scenario_name: &str, count: usize, seed: u64, output_path: Option<&str>) -> CliResult {
    let kind = parse_scenario(scenario_name)?;
    let scenario = Scenario::generate(kind, count, seed)?;

    let input = DecompositionInput {
        matrices: scenario
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| LabeledMatrix::new(format!("{}-{i}", kind.name()), &s.matrix))
            .collect(),
        config: None,
    };
    emit_text(&input.to_json_string()?, output_path)
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    samples: usize,
    seed: u64,
    strict: bool,
    output_path: Option<&str>,
) -> CliResult {
    println!("polardec Benchmark Suite");
    println!("════════════════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![parse_scenario(scenario_name)?]
    };

    let config = if strict {
        DecompositionConfig::strict()
    } else {
        DecompositionConfig::default()
    };
    let decomposer = PolarDecomposer::new(config)?;

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let scenario = Scenario::generate(kind, samples, seed)?;
        println!("Running: {} ({} samples, seed {seed})", kind.name(), scenario.len());

        let metrics = BenchmarkRunner::run(&scenario, &decomposer);
        println!("  Failures:      {}", metrics.failures);
        println!("  Degenerate:    {}", metrics.degenerate);
        println!("  Factor error:  {:.3e}", metrics.max_factor_error);
        println!("  Residual:      {:.3e}", metrics.max_residual);
        println!("  Avg time:      {:.2}µs", metrics.avg_time * 1e6);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a config or batch input.
pub fn validate(path: &str) -> CliResult {
    println!("polardec Validator");
    println!("──────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = load_config(path)?;
        println!("✅ Config is valid (fast_path = {}).", config.fast_path);
    } else if path.ends_with(".json") {
        println!("Validating batch input: {path}");
        let input = DecompositionInput::from_path(Path::new(path))?;
        match validate_input(&input) {
            Ok(()) => println!("✅ Input is valid ({} matrices).", input.matrices.len()),
            Err(e) => println!("❌ Input validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (batch input).");
    }

    Ok(())
}

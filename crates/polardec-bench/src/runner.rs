//! Benchmark runner: decomposes scenario samples and collects metrics.

use std::time::Instant;

use polardec_core::PolarDecomposer;
use polardec_types::PolarResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Decomposes every sample of `scenario`.
    ///
    /// Failed decompositions are counted, not propagated.
    pub fn run(scenario: &Scenario, decomposer: &PolarDecomposer) -> BenchmarkMetrics {
        let mut times = Vec::with_capacity(scenario.len());
        let mut failures = 0;
        let mut degenerate = 0;
        let mut max_factor_error: f64 = 0.0;
        let mut max_residual: f64 = 0.0;

        let total_start = Instant::now();
        for (i, sample) in scenario.samples.iter().enumerate() {
            let start = Instant::now();
            let result = decomposer.decompose_depolarizer_all(&sample.matrix);
            times.push(start.elapsed().as_secs_f64());

            match result {
                Ok(d) => {
                    if d.has_degenerate_axes() {
                        degenerate += 1;
                    }
                    let error = d
                        .depolarizer
                        .max_abs_diff(&sample.depolarizer)
                        .max(d.retarder.max_abs_diff(&sample.retarder))
                        .max(d.diattenuator.max_abs_diff(&sample.diattenuator));
                    max_factor_error = max_factor_error.max(error);
                    max_residual = max_residual.max(d.residual);
                }
                Err(e) => {
                    tracing::warn!(scenario = scenario.kind.name(), sample = i, error = %e, "decomposition failed");
                    failures += 1;
                }
            }
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let avg_time = if times.is_empty() {
            0.0
        } else {
            times.iter().sum::<f64>() / times.len() as f64
        };
        let min_time = times.iter().copied().fold(f64::MAX, f64::min);
        let max_time = times.iter().copied().fold(0.0, f64::max);

        BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            samples: scenario.len(),
            failures,
            degenerate,
            max_factor_error,
            max_residual,
            total_wall_time,
            avg_time,
            min_time: if times.is_empty() { 0.0 } else { min_time },
            max_time,
        }
    }

    /// Runs every scenario kind at its default size.
    pub fn run_all(decomposer: &PolarDecomposer) -> PolarResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?;
            results.push(Self::run(&scenario, decomposer));
        }
        Ok(results)
    }
}

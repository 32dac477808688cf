//! Benchmark metrics: accuracy and timing collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Number of matrices decomposed.
    pub samples: usize,
    /// Decompositions that returned an error.
    pub failures: usize,
    /// Decompositions that reported at least one collapsed axis.
    pub degenerate: usize,
    /// Largest element-wise error over the recovered factors.
    pub max_factor_error: f64,
    /// Largest relative reconstruction residual.
    pub max_residual: f64,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average time per decomposition (seconds).
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
}

impl BenchmarkMetrics {
    /// CSV header line.
    pub fn to_csv_header() -> String {
        "scenario,samples,failures,degenerate,max_factor_error,max_residual,total_wall_time_s,avg_us,min_us,max_us".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.3e},{:.3e},{:.6},{:.3},{:.3},{:.3}",
            self.scenario,
            self.samples,
            self.failures,
            self.degenerate,
            self.max_factor_error,
            self.max_residual,
            self.total_wall_time,
            self.avg_time * 1e6,
            self.min_time * 1e6,
            self.max_time * 1e6,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    /// True when nothing failed and every factor was recovered within `tolerance`.
    pub fn passes(&self, tolerance: f64) -> bool {
        self.failures == 0 && self.max_factor_error <= tolerance
    }
}

//! # polardec-bench
//!
//! Benchmark suite for the polar decomposition.
//!
//! Synthesizes matrices from known factors (M = M_Δ·M_R·M_D), decomposes
//! them, and reports factor recovery error, reconstruction residual and
//! timing. Results export to CSV for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Sample, Scenario, ScenarioKind};

//! Error types for polardec.
//!
//! All crates return `PolarResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for polardec.
#[derive(Debug, Error)]
pub enum PolarError {
    /// Input or intermediate matrix violates a physical realizability constraint
    /// (M00 ≤ 0, diattenuation ≥ 1, depolarization outside [-1, 1]).
    #[error("Non-physical Mueller matrix: {0}")]
    NonPhysicalMatrix(String),

    /// A forward-builder parameter is outside its valid physical range.
    #[error("Parameter out of domain: {0}")]
    Domain(String),

    /// The factors do not multiply back to the input within tolerance.
    #[error("Reconstruction residual {residual:.3e} exceeds tolerance {tolerance:.3e}")]
    ReconstructionMismatch {
        residual: f64,
        tolerance: f64,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PolarError {
    /// Returns true if this error reports a physically impossible input.
    pub fn is_non_physical(&self) -> bool {
        matches!(self, PolarError::NonPhysicalMatrix(_))
    }
}

/// Convenience alias for `Result<T, PolarError>`.
pub type PolarResult<T> = Result<T, PolarError>;

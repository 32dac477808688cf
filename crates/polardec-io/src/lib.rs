//! # polardec-io
//!
//! Batch input/output contract, input validation and the batch runner.
//!
//! Defines the boundary types that external callers (CLI, scripts) use to
//! submit Mueller matrices and read back their decompositions.

pub mod batch;
pub mod contract;
pub mod validator;

pub use batch::run_batch;
pub use contract::{DecompositionInput, DecompositionOutput, LabeledMatrix, MatrixResult, ResultStatus};
pub use validator::validate_input;

//! # polardec-types
//!
//! Shared error types and numerical tolerances for the polardec
//! Mueller-matrix decomposition workspace.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other polardec crates share.

pub mod constants;
pub mod error;

pub use error::{PolarError, PolarResult};

//! # polardec-math
//!
//! Linear algebra primitives for the polardec decomposition pipeline.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DMat3`, `DMat4`, `DVec3`, `DVec4`)
//! - Block view of a 4×4 Mueller-shaped matrix (scalar, row, column, 3×3 sub-block)
//! - Cyclic Jacobi eigen-solver for symmetric 3×3 matrices
//! - Signed matrix square roots, pseudo-inverses and frame completion
//!   used by the depolarizer/retarder split

pub mod block;
pub mod decomposition;
pub mod eigen;

// Re-export glam types as the canonical math types for polardec.
pub use glam::{DMat3, DMat4, DVec3, DVec4};

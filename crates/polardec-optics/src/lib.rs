//! # polardec-optics
//!
//! Polarization vocabulary: Mueller matrices, Stokes vectors, and the
//! closed-form forward builders for ideal optical elements.
//!
//! ## Key Types
//!
//! - [`MuellerMatrix`]: immutable 4×4 real matrix acting on Stokes vectors
//! - [`StokesVector`]: (I, Q, U, V) polarization state
//! - [`builders`]: rotators, polarizers, diattenuators, retarders, depolarizers

pub mod builders;
pub mod mueller;
pub mod stokes;

pub use mueller::MuellerMatrix;
pub use stokes::StokesVector;

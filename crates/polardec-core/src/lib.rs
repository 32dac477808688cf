//! # polardec-core
//!
//! Lu-Chipman polar decomposition of Mueller matrices:
//! M = M_Δ·M_R·M_D (depolarizer · retarder · diattenuator).
//!
//! ## Key Types
//!
//! - [`PolarDecomposer`]: entry points for the three decomposition depths
//! - [`Decomposition`]: the three factors plus warnings and residual
//! - [`DecompositionConfig`]: tolerances (TOML-loadable)
//! - [`DegenerateAxisWarning`]: a collapsed depolarization axis
//! - [`PolarParameters`]: retardance, diattenuation, depolarization metrics
//!
//! The free functions below use the default configuration.

pub mod config;
pub mod diattenuator;
pub mod parameters;
pub mod polar;
pub mod splitter;

pub use config::DecompositionConfig;
pub use diattenuator::{diattenuator_from_vector, extract_diattenuator, DiattenuatorFactor};
pub use parameters::PolarParameters;
pub use polar::{Decomposition, PolarDecomposer, RetarderSplit};
pub use splitter::{split, DegenerateAxisWarning, Split};

use polardec_optics::MuellerMatrix;
use polardec_types::PolarResult;

/// Diattenuator factor M_D with the default configuration.
pub fn decompose_diattenuator(m: &MuellerMatrix) -> PolarResult<MuellerMatrix> {
    PolarDecomposer::default().decompose_diattenuator(m)
}

/// M·M_D⁻¹ with the default configuration; see [`PolarDecomposer::decompose_retarder`].
pub fn decompose_retarder(m: &MuellerMatrix) -> PolarResult<MuellerMatrix> {
    PolarDecomposer::default().decompose_retarder(m)
}

/// (M·M_D⁻¹, M_D) with the default configuration.
pub fn decompose_retarder_all(m: &MuellerMatrix) -> PolarResult<RetarderSplit> {
    PolarDecomposer::default().decompose_retarder_all(m)
}

/// Depolarizer factor M_Δ with the default configuration.
pub fn decompose_depolarizer(m: &MuellerMatrix) -> PolarResult<MuellerMatrix> {
    PolarDecomposer::default().decompose_depolarizer(m)
}

/// Full decomposition with the default configuration.
pub fn decompose_depolarizer_all(m: &MuellerMatrix) -> PolarResult<Decomposition> {
    PolarDecomposer::default().decompose_depolarizer_all(m)
}

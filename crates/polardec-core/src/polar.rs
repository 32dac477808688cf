//! Lu-Chipman polar decomposition: M = M_Δ·M_R·M_D.
//!
//! [`PolarDecomposer`] runs the diattenuator extraction and the
//! depolarizer/retarder split and checks that the factors multiply back to
//! the input. All entry points are pure functions of the input matrix.

use polardec_math::block::frobenius_norm4;
use polardec_optics::MuellerMatrix;
use polardec_types::{PolarError, PolarResult};

use crate::config::DecompositionConfig;
use crate::diattenuator::{extract_diattenuator, DiattenuatorFactor};
use crate::splitter::{split, DegenerateAxisWarning};

/// Retarder-plus-diattenuator output of [`PolarDecomposer::decompose_retarder_all`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetarderSplit {
    /// M·M_D⁻¹: the retarder with any depolarization still mixed in.
    pub retarder: MuellerMatrix,
    /// M_D.
    pub diattenuator: MuellerMatrix,
}

/// Full three-factor decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// M_Δ.
    pub depolarizer: MuellerMatrix,
    /// M_R.
    pub retarder: MuellerMatrix,
    /// M_D.
    pub diattenuator: MuellerMatrix,
    /// Collapsed depolarization axes, if any.
    pub warnings: Vec<DegenerateAxisWarning>,
    /// ‖M − M_Δ·M_R·M_D‖_F / ‖M‖_F.
    pub residual: f64,
}

impl Decomposition {
    /// M_Δ·M_R·M_D.
    pub fn reconstruct(&self) -> MuellerMatrix {
        self.depolarizer * self.retarder * self.diattenuator
    }

    /// True if the retarder is only partially determined.
    pub fn has_degenerate_axes(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Runs polar decompositions with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct PolarDecomposer {
    config: DecompositionConfig,
}

impl PolarDecomposer {
    /// Creates a decomposer, validating the configuration.
    pub fn new(config: DecompositionConfig) -> PolarResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Diattenuator factor M_D of `m`.
    pub fn decompose_diattenuator(&self, m: &MuellerMatrix) -> PolarResult<MuellerMatrix> {
        Ok(extract_diattenuator(m, &self.config)?.matrix)
    }

    /// Retarder factor obtained by removing the diattenuator only: M·M_D⁻¹.
    ///
    /// This is a pure retarder only when `m` is non-depolarizing. For a
    /// depolarizing `m` the result still carries the depolarizer (including
    /// its polarizance); use [`Self::decompose_depolarizer_all`] for the
    /// physically separated retarder.
    pub fn decompose_retarder(&self, m: &MuellerMatrix) -> PolarResult<MuellerMatrix> {
        Ok(self.decompose_retarder_all(m)?.retarder)
    }

    /// Like [`Self::decompose_retarder`], also returning M_D.
    pub fn decompose_retarder_all(&self, m: &MuellerMatrix) -> PolarResult<RetarderSplit> {
        let factor = extract_diattenuator(m, &self.config)?;
        Ok(RetarderSplit {
            retarder: reduce(m, &factor),
            diattenuator: factor.matrix,
        })
    }

    /// Depolarizer factor M_Δ of the full decomposition.
    pub fn decompose_depolarizer(&self, m: &MuellerMatrix) -> PolarResult<MuellerMatrix> {
        Ok(self.decompose_depolarizer_all(m)?.depolarizer)
    }

    /// Full decomposition M = M_Δ·M_R·M_D.
    ///
    /// Fails with `ReconstructionMismatch` if the factors do not reproduce
    /// `m` within `reconstruction_tolerance`.
    pub fn decompose_depolarizer_all(&self, m: &MuellerMatrix) -> PolarResult<Decomposition> {
        let factor = extract_diattenuator(m, &self.config)?;
        let reduced = reduce(m, &factor);
        let parts = split(&reduced, &self.config)?;

        let mut decomposition = Decomposition {
            depolarizer: parts.depolarizer,
            retarder: parts.retarder,
            diattenuator: factor.matrix,
            warnings: parts.warnings,
            residual: 0.0,
        };

        let reconstructed = decomposition.reconstruct();
        let residual =
            frobenius_norm4(&(*m.as_mat4() - *reconstructed.as_mat4())) / m.frobenius_norm();

        if !(residual <= self.config.reconstruction_tolerance) {
            tracing::warn!(residual, "reconstruction check failed");
            return Err(PolarError::ReconstructionMismatch {
                residual,
                tolerance: self.config.reconstruction_tolerance,
            });
        }
        decomposition.residual = residual;

        tracing::debug!(
            residual,
            degenerate_axes = decomposition.warnings.len(),
            fast_path = parts.fast_path,
            "decomposition complete"
        );
        Ok(decomposition)
    }
}

/// M' = M·M_D⁻¹.
fn reduce(m: &MuellerMatrix, factor: &DiattenuatorFactor) -> MuellerMatrix {
    *m * factor.inverse
}

//! Decomposition configuration.
//!
//! Tolerances that decide when rounding noise is absorbed, when an axis is
//! treated as collapsed, and when a result is rejected.

use serde::{Deserialize, Serialize};

use polardec_types::constants;
use polardec_types::{PolarError, PolarResult};

/// Configuration for the polar decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Negative eigenvalues of m'·m'ᵗ down to `-tolerance · max(1, λ_max)`
    /// are clamped to zero.
    pub eigen_clamp_tolerance: f64,

    /// Depolarization coefficients at or below this value mark a collapsed
    /// axis; the retarder is completed there and a warning is attached.
    pub singular_tolerance: f64,

    /// The diattenuation `d` is rejected when `1 - d²` is at or below this margin.
    pub diattenuation_margin: f64,

    /// Slack on the physical bounds |depolarization coefficient| ≤ 1 and |P| ≤ 1.
    pub physical_tolerance: f64,

    /// Maximum relative Frobenius residual of the reconstructed matrix.
    pub reconstruction_tolerance: f64,

    /// Jacobi sweep limit for the symmetric eigen-solver.
    pub jacobi_max_sweeps: u32,

    /// Skip the eigen-decomposition when the reduced matrix is already a
    /// pure retarder.
    pub fast_path: bool,

    /// Absolute element-wise tolerance on m'·m'ᵗ ≈ I and |P'| ≈ 0 for the
    /// fast path.
    pub fast_path_tolerance: f64,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            eigen_clamp_tolerance: constants::EIGEN_CLAMP_TOLERANCE,
            singular_tolerance: constants::SINGULAR_TOLERANCE,
            diattenuation_margin: constants::DIATTENUATION_MARGIN,
            physical_tolerance: constants::PHYSICAL_TOLERANCE,
            reconstruction_tolerance: constants::RECONSTRUCTION_TOLERANCE,
            jacobi_max_sweeps: constants::JACOBI_MAX_SWEEPS,
            fast_path: true,
            fast_path_tolerance: constants::FAST_PATH_TOLERANCE,
        }
    }
}

impl DecompositionConfig {
    /// Tight bounds for synthetic or high-quality data; always takes the
    /// general path.
    pub fn strict() -> Self {
        Self {
            physical_tolerance: 1e-9,
            reconstruction_tolerance: 1e-10,
            fast_path: false,
            ..Default::default()
        }
    }

    /// Loose bounds for noisy measured matrices.
    pub fn lenient() -> Self {
        Self {
            eigen_clamp_tolerance: 1e-6,
            singular_tolerance: 1e-6,
            physical_tolerance: 1e-2,
            reconstruction_tolerance: 1e-4,
            fast_path_tolerance: 1e-6,
            ..Default::default()
        }
    }

    /// Checks that every tolerance is finite and positive.
    pub fn validate(&self) -> PolarResult<()> {
        let tolerances = [
            ("eigen_clamp_tolerance", self.eigen_clamp_tolerance),
            ("singular_tolerance", self.singular_tolerance),
            ("diattenuation_margin", self.diattenuation_margin),
            ("physical_tolerance", self.physical_tolerance),
            ("reconstruction_tolerance", self.reconstruction_tolerance),
            ("fast_path_tolerance", self.fast_path_tolerance),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value <= 0.0 {
                return Err(PolarError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.diattenuation_margin >= 1.0 {
            return Err(PolarError::InvalidConfig(format!(
                "diattenuation_margin must be below 1, got {}",
                self.diattenuation_margin
            )));
        }
        if self.jacobi_max_sweeps == 0 {
            return Err(PolarError::InvalidConfig(
                "jacobi_max_sweeps must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Parses a TOML document; missing keys take their default values.
    pub fn from_toml_str(text: &str) -> PolarResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PolarError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> PolarResult<String> {
        toml::to_string(self).map_err(|e| PolarError::Serialization(e.to_string()))
    }
}

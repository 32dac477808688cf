//! Diattenuator extraction (first stage of the Lu-Chipman decomposition).
//!
//! M_D = T·[[1, Dᵗ], [D, m_D]] with
//! m_D = √(1−d²)·I + (1 − √(1−d²))·D̂·D̂ᵗ,
//! the minimal diattenuator consistent with the first row of M.
//! Its inverse is the same construction with −D, scaled by 1/(T·(1−d²)).

use polardec_math::block::outer;
use polardec_math::{DMat3, DVec3};
use polardec_optics::MuellerMatrix;
use polardec_types::{PolarError, PolarResult};

use crate::config::DecompositionConfig;

/// The diattenuator factor of a Mueller matrix together with its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiattenuatorFactor {
    /// M_D, scaled by the transmittance T = M00.
    pub matrix: MuellerMatrix,
    /// M_D⁻¹.
    pub inverse: MuellerMatrix,
    /// Diattenuation vector D.
    pub vector: DVec3,
    /// Transmittance for unpolarized light, T = M00.
    pub transmittance: f64,
}

impl DiattenuatorFactor {
    /// Diattenuation magnitude d = |D|.
    pub fn diattenuation(&self) -> f64 {
        self.vector.length()
    }
}

/// Normalized block [[1, Dᵗ], [D, m_D]]; requires |D| < 1.
fn diattenuator_block(d: DVec3) -> MuellerMatrix {
    let mag_sq = d.length_squared();
    let root = (1.0 - mag_sq).sqrt();
    let m_d = if mag_sq > 0.0 {
        DMat3::IDENTITY * root + outer(d, d) * ((1.0 - root) / mag_sq)
    } else {
        DMat3::IDENTITY
    };
    MuellerMatrix::from_blocks(1.0, d, d, m_d)
}

fn check_diattenuation(d: DVec3, margin: f64) -> PolarResult<()> {
    let mag = d.length();
    if !mag.is_finite() || 1.0 - mag * mag <= margin {
        return Err(PolarError::NonPhysicalMatrix(format!(
            "diattenuation {mag} is not below 1"
        )));
    }
    Ok(())
}

/// Builds the minimal diattenuator with diattenuation vector `d` and
/// unpolarized transmittance `transmittance`.
pub fn diattenuator_from_vector(d: DVec3, transmittance: f64) -> PolarResult<MuellerMatrix> {
    if !(transmittance.is_finite() && transmittance > 0.0) {
        return Err(PolarError::NonPhysicalMatrix(format!(
            "transmittance must be positive, got {transmittance}"
        )));
    }
    check_diattenuation(d, 0.0)?;
    Ok(diattenuator_block(d).scaled(transmittance))
}

/// Extracts the diattenuator factor M_D of `m` and its inverse.
///
/// Fails with `NonPhysicalMatrix` when M00 ≤ 0 or d ≥ 1 (within
/// `config.diattenuation_margin`); the inverse does not exist at d = 1.
pub fn extract_diattenuator(
    m: &MuellerMatrix,
    config: &DecompositionConfig,
) -> PolarResult<DiattenuatorFactor> {
    m.check_decomposable()?;

    let transmittance = m.m00();
    let vector = m.diattenuation_vector();
    check_diattenuation(vector, config.diattenuation_margin)?;

    let mag_sq = vector.length_squared();
    let matrix = diattenuator_block(vector).scaled(transmittance);
    let inverse = diattenuator_block(-vector).scaled(1.0 / (transmittance * (1.0 - mag_sq)));

    tracing::debug!(
        transmittance,
        diattenuation = mag_sq.sqrt(),
        "diattenuator extracted"
    );

    Ok(DiattenuatorFactor {
        matrix,
        inverse,
        vector,
        transmittance,
    })
}

//! Depolarizer/retarder split of the diattenuation-free matrix M' = M·M_D⁻¹.
//!
//! M' = [[1, 0ᵗ], [P', m']] factors as M_Δ·M_R with
//! M_Δ = [[1, 0ᵗ], [P', m_Δ]] and M_R = [[1, 0ᵗ], [0, m_R]], where
//! m_Δ = ±√(m'·m'ᵗ) is symmetric and m_R = m_Δ⁻¹·m' is a proper rotation.
//!
//! The square root is built on the eigenbasis vᵢ of m'·m'ᵗ. Its magnitudes
//! σᵢ = ‖m'ᵗ·vᵢ‖ equal √λᵢ but keep full relative accuracy for small
//! depolarization coefficients. The signs are the parity-matching choice
//! that maximizes tr(m_Δ), which keeps det(m_R) = +1.
//!
//! Only the products m_Δ·m_R are observable, so the sign pattern of m_Δ is
//! recovered only up to that choice. A depolarizer whose coefficients are
//! all positive, or which has exactly one negative coefficient on its
//! smallest-magnitude axis, comes back exactly. Any other pattern (for
//! example two negative coefficients) comes back as the positive-definite
//! |m_Δ|, with the missing half-turn absorbed into m_R; the factors still
//! multiply back to M'.

use std::fmt;

use serde::{Deserialize, Serialize};

use polardec_math::decomposition::{
    clamped_roots, complete_frame, from_row_vectors, select_signs, signed_sqrt,
    signed_sqrt_pseudo_inverse,
};
use polardec_math::eigen::symmetric_eigen;
use polardec_math::{DMat3, DVec3};
use polardec_optics::MuellerMatrix;
use polardec_types::{PolarError, PolarResult};

use crate::config::DecompositionConfig;

/// Non-fatal signal that a depolarization axis was fully collapsed.
///
/// The retarder carries no information about rotations that move light
/// into or out of `axis`; the returned retarder is completed there with an
/// arbitrary but proper rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegenerateAxisWarning {
    /// Principal axis of the depolarizer (unit vector in Q, U, V space).
    pub axis: [f64; 3],
    /// Depolarization coefficient along the axis (at or below the singular tolerance).
    pub coefficient: f64,
}

impl fmt::Display for DegenerateAxisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depolarization axis [{:.4}, {:.4}, {:.4}] collapsed (coefficient {:.3e}); retarder undetermined there",
            self.axis[0], self.axis[1], self.axis[2], self.coefficient
        )
    }
}

/// Result of splitting M' into depolarizer and retarder.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// M_Δ.
    pub depolarizer: MuellerMatrix,
    /// M_R.
    pub retarder: MuellerMatrix,
    /// One entry per collapsed depolarization axis.
    pub warnings: Vec<DegenerateAxisWarning>,
    /// Whether the non-depolarizing shortcut was taken.
    pub fast_path: bool,
}

/// True when M' is already a pure retarder within tolerance.
fn is_pure_retarder(sub: &DMat3, polarizance: DVec3, tolerance: f64) -> bool {
    let s = *sub * sub.transpose();
    s.abs_diff_eq(DMat3::IDENTITY, tolerance)
        && polarizance.length() <= tolerance
        && sub.determinant() > 0.0
}

/// Splits the reduced matrix `reduced = M·M_D⁻¹` into (M_Δ, M_R).
pub fn split(reduced: &MuellerMatrix, config: &DecompositionConfig) -> PolarResult<Split> {
    if !reduced.is_finite() {
        return Err(PolarError::NonPhysicalMatrix(
            "reduced matrix contains non-finite entries".into(),
        ));
    }

    let blocks = reduced.blocks();
    let polarizance = blocks.col;
    let sub = blocks.sub;

    if polarizance.length() > 1.0 + config.physical_tolerance {
        return Err(PolarError::NonPhysicalMatrix(format!(
            "depolarizer polarizance {} exceeds 1",
            polarizance.length()
        )));
    }

    if config.fast_path && is_pure_retarder(&sub, polarizance, config.fast_path_tolerance) {
        tracing::debug!("non-depolarizing matrix, skipping eigen-decomposition");
        return Ok(Split {
            depolarizer: MuellerMatrix::IDENTITY,
            retarder: *reduced,
            warnings: Vec::new(),
            fast_path: true,
        });
    }

    let s = sub * sub.transpose();
    let eigen = symmetric_eigen(&s, config.jacobi_max_sweeps)?;
    if !eigen.converged {
        tracing::warn!(sweeps = eigen.sweeps, "Jacobi iteration hit the sweep limit");
    }

    let clamp = config.eigen_clamp_tolerance * eigen.values[0].abs().max(1.0);
    if eigen.values[2] < 0.0 && eigen.values[2] >= -clamp {
        tracing::debug!(value = eigen.values[2], "clamped negative eigenvalue to zero");
    }
    let eigen_roots = clamped_roots(&eigen.values, clamp).ok_or_else(|| {
        PolarError::NonPhysicalMatrix(format!(
            "m'·m'ᵗ has a negative eigenvalue {:.3e}",
            eigen.values[2]
        ))
    })?;

    // √λ₀ bounds the largest coefficient; it is accurate at the top of the spectrum.
    if eigen_roots[0] > 1.0 + config.physical_tolerance {
        return Err(PolarError::NonPhysicalMatrix(format!(
            "depolarization coefficient {} exceeds 1",
            eigen_roots[0]
        )));
    }

    // r_i = vᵢᵗ·m', stored as a column vector.
    let rows: [DVec3; 3] = eigen.vectors.map(|v| sub.transpose() * v);
    let roots: [f64; 3] = rows.map(|r| r.length());

    let collapsed: [bool; 3] = roots.map(|r| r <= config.singular_tolerance);
    let any_collapsed = collapsed.iter().any(|&c| c);

    // With a collapsed axis det(m') is rounding noise; take the even branch.
    let negative = !any_collapsed && sub.determinant() < 0.0;
    let signs = select_signs(&roots, negative);
    let m_delta = signed_sqrt(&eigen, &roots, &signs);

    let mut warnings = Vec::new();
    let m_r = if any_collapsed {
        let mut known = [None; 3];
        for i in 0..3 {
            if collapsed[i] {
                let warning = DegenerateAxisWarning {
                    axis: eigen.vectors[i].to_array(),
                    coefficient: roots[i],
                };
                tracing::warn!(%warning, "degenerate depolarization axis");
                warnings.push(warning);
            } else {
                known[i] = Some(rows[i] / roots[i]);
            }
        }
        let basis = eigen.basis();
        let handedness = basis.determinant() * signs.iter().product::<f64>();
        let frame = complete_frame(known, handedness);
        basis * DMat3::from_diagonal(DVec3::from_array(signs)) * from_row_vectors(&frame)
    } else {
        signed_sqrt_pseudo_inverse(&eigen, &roots, &signs, 0.0) * sub
    };

    tracing::debug!(
        coefficients = ?roots,
        signs = ?signs,
        collapsed = warnings.len(),
        "depolarizer split"
    );

    Ok(Split {
        depolarizer: MuellerMatrix::from_blocks(1.0, DVec3::ZERO, polarizance, m_delta),
        retarder: MuellerMatrix::from_blocks(1.0, DVec3::ZERO, DVec3::ZERO, m_r),
        warnings,
        fast_path: false,
    })
}

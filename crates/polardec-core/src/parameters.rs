//! Polarimetric parameters derived from a decomposition.

use serde::{Deserialize, Serialize};

use polardec_math::DVec3;
use polardec_optics::MuellerMatrix;

use crate::polar::Decomposition;

/// Scalar and vector properties of a decomposed Mueller matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarParameters {
    /// M00.
    pub transmittance: f64,
    /// |D|.
    pub diattenuation: f64,
    pub diattenuation_vector: [f64; 3],
    /// |P| of the input matrix.
    pub polarizance: f64,
    pub polarizance_vector: [f64; 3],
    /// Total retardance R in [0, π] radians.
    pub retardance: f64,
    /// Unit fast axis of the retarder on the Poincaré sphere (zero when R = 0).
    pub retardance_axis: [f64; 3],
    /// Linear retardance δ in [0, π].
    pub linear_retardance: f64,
    /// Optical rotation ψ: the angle θ whose `mueller_rotation(θ)` matches the
    /// circular part of the retarder.
    pub optical_rotation: f64,
    /// Δ = 1 − |tr m_Δ| / 3.
    pub depolarization_power: f64,
    /// Gil-Bernabeu depolarization index of the input matrix.
    pub depolarization_index: f64,
}

impl PolarParameters {
    /// Derives the parameters of `m` from its decomposition.
    pub fn from_decomposition(m: &MuellerMatrix, decomposition: &Decomposition) -> Self {
        let d = m.diattenuation_vector();
        let p = m.polarizance_vector();
        let r = &decomposition.retarder;
        Self {
            transmittance: m.m00(),
            diattenuation: d.length(),
            diattenuation_vector: d.to_array(),
            polarizance: p.length(),
            polarizance_vector: p.to_array(),
            retardance: retardance(r),
            retardance_axis: retardance_axis(r).to_array(),
            linear_retardance: linear_retardance(r),
            optical_rotation: optical_rotation(r),
            depolarization_power: depolarization_power(&decomposition.depolarizer),
            depolarization_index: m.depolarization_index(),
        }
    }
}

/// R = acos(tr(M_R)/2 − 1).
pub fn retardance(retarder: &MuellerMatrix) -> f64 {
    let trace: f64 = (0..4).map(|i| retarder.get(i, i)).sum();
    (trace / 2.0 - 1.0).clamp(-1.0, 1.0).acos()
}

/// Unit retardance axis â with m_R = cos R·I + (1 − cos R)·â·âᵗ + sin R·[â]ₓ.
///
/// Zero for a null retarder. At R = π the sign of the axis is arbitrary.
pub fn retardance_axis(retarder: &MuellerMatrix) -> DVec3 {
    let r = retardance(retarder);
    let g = |i, j| retarder.get(i, j);
    let antisym = DVec3::new(g(2, 3) - g(3, 2), g(3, 1) - g(1, 3), g(1, 2) - g(2, 1));
    let sin_r = r.sin();

    if sin_r > 1e-8 {
        return (antisym / (2.0 * sin_r)).normalize_or_zero();
    }
    if r < std::f64::consts::FRAC_PI_2 {
        return DVec3::ZERO;
    }
    // R ≈ π: (m_R + I) / 2 = â·âᵗ; take its largest column.
    let m = retarder.sub_block();
    let cols = [m.x_axis + DVec3::X, m.y_axis + DVec3::Y, m.z_axis + DVec3::Z];
    cols.iter()
        .copied()
        .max_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .unwrap_or(DVec3::ZERO)
        .normalize_or_zero()
}

/// δ = acos(√((M11 + M22)² + (M21 − M12)²) − 1).
pub fn linear_retardance(retarder: &MuellerMatrix) -> f64 {
    let g = |i, j| retarder.get(i, j);
    let sum = g(1, 1) + g(2, 2);
    let diff = g(2, 1) - g(1, 2);
    ((sum * sum + diff * diff).sqrt() - 1.0).clamp(-1.0, 1.0).acos()
}

/// ψ = ½·atan2(M12 − M21, M11 + M22).
pub fn optical_rotation(retarder: &MuellerMatrix) -> f64 {
    let g = |i, j| retarder.get(i, j);
    0.5 * (g(1, 2) - g(2, 1)).atan2(g(1, 1) + g(2, 2))
}

/// Δ = 1 − |tr m_Δ| / 3.
pub fn depolarization_power(depolarizer: &MuellerMatrix) -> f64 {
    let m = depolarizer.sub_block();
    1.0 - (m.x_axis.x + m.y_axis.y + m.z_axis.z).abs() / 3.0
}

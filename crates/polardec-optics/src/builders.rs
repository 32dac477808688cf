//! Closed-form Mueller matrices for ideal optical elements.
//!
//! Angles are measured from the horizontal in radians. These builders are
//! the forward model the decomposition is validated against; the
//! decomposition itself never calls them.

use polardec_math::block::outer;
use polardec_math::{DMat3, DVec3};
use polardec_types::{PolarError, PolarResult};

use crate::mueller::MuellerMatrix;

fn check_finite(name: &str, value: f64) -> PolarResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PolarError::Domain(format!("{name} must be finite, got {value}")))
    }
}

fn check_unit_interval(name: &str, value: f64, lo: f64) -> PolarResult<()> {
    check_finite(name, value)?;
    if value < lo || value > 1.0 {
        return Err(PolarError::Domain(format!(
            "{name} must lie in [{lo}, 1], got {value}"
        )));
    }
    Ok(())
}

/// Rotation of the reference frame by `angle`.
///
/// `R(θ)·M·R(−θ)` rotates an element `M` by θ about the beam axis.
pub fn mueller_rotation(angle: f64) -> MuellerMatrix {
    let (s, c) = (2.0 * angle).sin_cos();
    MuellerMatrix::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Ideal linear polarizer with its transmission axis at `angle`.
///
/// Its diattenuation is exactly 1, so it cannot be decomposed.
pub fn linear_polarizer(angle: f64) -> PolarResult<MuellerMatrix> {
    check_finite("angle", angle)?;
    let (s, c) = (2.0 * angle).sin_cos();
    Ok(MuellerMatrix::from_rows([
        [1.0, c, s, 0.0],
        [c, c * c, c * s, 0.0],
        [s, c * s, s * s, 0.0],
        [0.0, 0.0, 0.0, 0.0],
    ])
    .scaled(0.5))
}

/// Homogeneous linear diattenuator (CLY 6.54).
///
/// `angle` is the orientation of the high-transmission axis; `t_min` and
/// `t_max` are the principal intensity transmittances, `0 ≤ t_min ≤ t_max ≤ 1`.
pub fn linear_diattenuator(angle: f64, t_min: f64, t_max: f64) -> PolarResult<MuellerMatrix> {
    check_finite("angle", angle)?;
    check_unit_interval("t_min", t_min, 0.0)?;
    check_unit_interval("t_max", t_max, 0.0)?;
    if t_min > t_max {
        return Err(PolarError::Domain(format!(
            "t_min ({t_min}) must not exceed t_max ({t_max})"
        )));
    }

    let a = t_max + t_min;
    let b = t_max - t_min;
    let cc = 2.0 * (t_max * t_min).sqrt();
    let (s, c) = (2.0 * angle).sin_cos();

    Ok(MuellerMatrix::from_rows([
        [a, b * c, b * s, 0.0],
        [b * c, a * c * c + cc * s * s, (a - cc) * c * s, 0.0],
        [b * s, (a - cc) * c * s, cc * c * c + a * s * s, 0.0],
        [0.0, 0.0, 0.0, cc],
    ])
    .scaled(0.5))
}

/// Homogeneous linear retarder with `retardance` radians and fast axis at `angle`.
pub fn linear_retarder(retardance: f64, angle: f64) -> PolarResult<MuellerMatrix> {
    check_finite("retardance", retardance)?;
    check_finite("angle", angle)?;
    let (s2, c2) = (2.0 * angle).sin_cos();
    elliptical_retarder(DVec3::new(c2, s2, 0.0), retardance)
}

/// General (elliptical) retarder: a rotation of the Poincaré sphere by
/// `retardance` about the unit `axis` (the fast eigen-polarization).
///
/// m_R = cos R·I + (1 − cos R)·â·âᵗ + sin R·[â]ₓ with the sign convention
/// of [`linear_retarder`].
pub fn elliptical_retarder(axis: DVec3, retardance: f64) -> PolarResult<MuellerMatrix> {
    check_finite("retardance", retardance)?;
    if !axis.is_finite() || axis.length_squared() == 0.0 {
        return Err(PolarError::Domain(format!(
            "retardance axis must be a finite non-zero vector, got {axis}"
        )));
    }
    let a = axis.normalize();
    let (s, c) = retardance.sin_cos();

    // K_ij = Σ_k ε_ijk a_k, stored by columns.
    let k = DMat3::from_cols(
        DVec3::new(0.0, -a.z, a.y),
        DVec3::new(a.z, 0.0, -a.x),
        DVec3::new(-a.y, a.x, 0.0),
    );
    let m = DMat3::IDENTITY * c + outer(a, a) * (1.0 - c) + k * s;

    Ok(MuellerMatrix::from_blocks(1.0, DVec3::ZERO, DVec3::ZERO, m))
}

/// Diagonal depolarizer rotated by `angle`.
///
/// `a`, `b`, `c` are the depolarization coefficients of Q, U and V in the
/// element frame; each must lie in [-1, 1].
pub fn depolarizer(angle: f64, a: f64, b: f64, c: f64) -> PolarResult<MuellerMatrix> {
    check_finite("angle", angle)?;
    check_unit_interval("a", a, -1.0)?;
    check_unit_interval("b", b, -1.0)?;
    check_unit_interval("c", c, -1.0)?;

    let diag = MuellerMatrix::from_blocks(
        1.0,
        DVec3::ZERO,
        DVec3::ZERO,
        DMat3::from_diagonal(DVec3::new(a, b, c)),
    );
    Ok(mueller_rotation(angle) * diag * mueller_rotation(-angle))
}

/// Depolarizer with polarizance: [[1, 0ᵗ], [P, m]] with symmetric `m`.
///
/// `m` is symmetrized; its eigenvalues must lie in [-1, 1] and |P| ≤ 1.
pub fn polarizing_depolarizer(polarizance: DVec3, m: DMat3) -> PolarResult<MuellerMatrix> {
    if !polarizance.is_finite() || !(m.x_axis.is_finite() && m.y_axis.is_finite() && m.z_axis.is_finite()) {
        return Err(PolarError::Domain("depolarizer entries must be finite".into()));
    }
    if polarizance.length() > 1.0 {
        return Err(PolarError::Domain(format!(
            "polarizance magnitude must not exceed 1, got {}",
            polarizance.length()
        )));
    }
    let sym = (m + m.transpose()) * 0.5;
    let eigen = polardec_math::eigen::symmetric_eigen(&sym, polardec_types::constants::JACOBI_MAX_SWEEPS)
        .map_err(|e| PolarError::Domain(e.to_string()))?;
    if eigen.values.iter().any(|l| l.abs() > 1.0) {
        return Err(PolarError::Domain(format!(
            "depolarization eigenvalues must lie in [-1, 1], got {:?}",
            eigen.values
        )));
    }
    Ok(MuellerMatrix::from_blocks(1.0, DVec3::ZERO, polarizance, sym))
}

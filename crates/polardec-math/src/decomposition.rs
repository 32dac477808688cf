//! Matrix functions built on the symmetric eigen-decomposition.
//!
//! The depolarizer/retarder split needs a signed square root of m'·m'ᵗ,
//! its (pseudo-)inverse, and a way to finish an orthonormal frame when
//! some directions carry no information.

use glam::{DMat3, DVec3};

use crate::eigen::SymmetricEigen3;

/// Sign patterns in order of preference: no flips first, then flips of the
/// smallest eigenvalues before the larger ones.
const SIGN_MASKS: [u8; 8] = [0b000, 0b100, 0b010, 0b001, 0b110, 0b101, 0b011, 0b111];

/// Chooses the signs attached to the square roots of the eigenvalues.
///
/// Enumerates all sign vectors whose number of negative entries is odd when
/// `negative_determinant` is set and even otherwise, and returns the one that
/// maximizes Σ sᵢ·rootᵢ (the trace of the reconstructed matrix). Ties go to
/// the earlier entry of the preference order.
pub fn select_signs(roots: &[f64; 3], negative_determinant: bool) -> [f64; 3] {
    let mut best = [1.0; 3];
    let mut best_trace = f64::NEG_INFINITY;

    for mask in SIGN_MASKS {
        let odd = mask.count_ones() % 2 == 1;
        if odd != negative_determinant {
            continue;
        }
        let signs = [0, 1, 2].map(|i| if mask & (1 << i) != 0 { -1.0 } else { 1.0 });
        let trace: f64 = (0..3).map(|i| signs[i] * roots[i]).sum();
        if trace > best_trace {
            best_trace = trace;
            best = signs;
        }
    }

    best
}

/// Non-negative square roots of the eigenvalues, after clamping values in
/// `[-clamp, 0)` to zero. Values below `-clamp` are returned as `None`.
pub fn clamped_roots(values: &[f64; 3], clamp: f64) -> Option<[f64; 3]> {
    let mut roots = [0.0; 3];
    for (root, &value) in roots.iter_mut().zip(values) {
        if value < -clamp {
            return None;
        }
        *root = value.max(0.0).sqrt();
    }
    Some(roots)
}

/// Σᵢ sᵢ·rootᵢ·vᵢvᵢᵗ over the eigenbasis of `eigen`.
pub fn signed_sqrt(eigen: &SymmetricEigen3, roots: &[f64; 3], signs: &[f64; 3]) -> DMat3 {
    eigen.reconstruct(|i, _| signs[i] * roots[i])
}

/// Moore-Penrose pseudo-inverse of Σᵢ sᵢ·rootᵢ·vᵢvᵢᵗ.
///
/// Directions with `rootᵢ ≤ threshold` contribute nothing.
pub fn signed_sqrt_pseudo_inverse(
    eigen: &SymmetricEigen3,
    roots: &[f64; 3],
    signs: &[f64; 3],
    threshold: f64,
) -> DMat3 {
    eigen.reconstruct(|i, _| {
        if roots[i] > threshold {
            signs[i] / roots[i]
        } else {
            0.0
        }
    })
}

/// Completes a set of orthonormal rows to a full frame.
///
/// `rows[i]` is `Some` for known unit rows. Missing rows are filled so the
/// result is orthonormal and the determinant of the matrix with these rows
/// has the sign of `handedness`.
pub fn complete_frame(rows: [Option<DVec3>; 3], handedness: f64) -> [DVec3; 3] {
    let known: Vec<usize> = (0..3).filter(|&i| rows[i].is_some()).collect();
    let mut out = [DVec3::X, DVec3::Y, DVec3::Z];

    match known.len() {
        3 => {
            for i in 0..3 {
                out[i] = rows[i].unwrap_or(out[i]);
            }
            return out;
        }
        0 => {}
        1 => {
            let k = known[0];
            let w = rows[k].unwrap_or(DVec3::X);
            let u = any_orthogonal(w);
            out[k] = w;
            out[(k + 1) % 3] = u;
            out[(k + 2) % 3] = w.cross(u);
        }
        _ => {
            let missing = (0..3).find(|i| rows[*i].is_none()).unwrap_or(2);
            for &i in &known {
                out[i] = rows[i].unwrap_or(out[i]);
            }
            // Cyclic triple: w_k · (w_{k+1} × w_{k+2}) = det.
            out[missing] = out[(missing + 1) % 3]
                .cross(out[(missing + 2) % 3])
                .normalize_or_zero();
        }
    }

    let det = out[0].dot(out[1].cross(out[2]));
    if det * handedness < 0.0 {
        let fill = (0..3).find(|i| rows[*i].is_none()).unwrap_or(2);
        out[fill] = -out[fill];
    }
    out
}

/// A unit vector orthogonal to `w`, built from the coordinate axis least
/// aligned with it.
fn any_orthogonal(w: DVec3) -> DVec3 {
    let a = w.abs();
    let axis = if a.x <= a.y && a.x <= a.z {
        DVec3::X
    } else if a.y <= a.z {
        DVec3::Y
    } else {
        DVec3::Z
    };
    (axis - w * axis.dot(w)).normalize_or_zero()
}

/// Matrix with the given vectors as rows.
pub fn from_row_vectors(rows: &[DVec3; 3]) -> DMat3 {
    DMat3::from_cols(rows[0], rows[1], rows[2]).transpose()
}

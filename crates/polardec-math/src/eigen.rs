//! Eigen-decomposition of real symmetric 3×3 matrices.
//!
//! Cyclic Jacobi rotations: each sweep annihilates the three off-diagonal
//! entries in turn and accumulates the rotations into the eigenbasis.
//! For 3×3 input the iteration converges quadratically, typically in
//! four to six sweeps, and always yields an orthonormal basis.

use glam::{DMat3, DVec3};

use polardec_types::constants::JACOBI_CONVERGENCE;
use polardec_types::{PolarError, PolarResult};

use crate::block::outer;

/// Eigenvalues and orthonormal eigenvectors of a symmetric 3×3 matrix.
///
/// Eigenpairs are sorted by descending eigenvalue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricEigen3 {
    /// Eigenvalues λ₀ ≥ λ₁ ≥ λ₂.
    pub values: [f64; 3],
    /// Unit eigenvectors; `vectors[i]` belongs to `values[i]`.
    pub vectors: [DVec3; 3],
    /// Number of Jacobi sweeps performed.
    pub sweeps: u32,
    /// Whether the off-diagonal norm dropped below the convergence threshold.
    pub converged: bool,
}

impl SymmetricEigen3 {
    /// Eigenvector matrix V with the eigenvectors as columns.
    pub fn basis(&self) -> DMat3 {
        DMat3::from_cols(self.vectors[0], self.vectors[1], self.vectors[2])
    }

    /// Rebuilds Σᵢ f(i, λᵢ) vᵢvᵢᵗ.
    ///
    /// With `f = |_, λ| λ` this reproduces the input matrix; other maps give
    /// matrix functions (square roots, pseudo-inverses) sharing the eigenbasis.
    pub fn reconstruct(&self, f: impl Fn(usize, f64) -> f64) -> DMat3 {
        let mut out = DMat3::ZERO;
        for i in 0..3 {
            let v = self.vectors[i];
            out += outer(v, v) * f(i, self.values[i]);
        }
        out
    }
}

/// Computes the eigen-decomposition of a symmetric 3×3 matrix.
///
/// Only the symmetric part `(m + mᵗ) / 2` is used. Fails with
/// `NonPhysicalMatrix` if any entry is non-finite.
pub fn symmetric_eigen(m: &DMat3, max_sweeps: u32) -> PolarResult<SymmetricEigen3> {
    if !(m.x_axis.is_finite() && m.y_axis.is_finite() && m.z_axis.is_finite()) {
        return Err(PolarError::NonPhysicalMatrix(
            "symmetric eigen-decomposition input contains non-finite entries".into(),
        ));
    }

    let sym = (*m + m.transpose()) * 0.5;
    // a[row][col]
    let mut a = sym.transpose().to_cols_array_2d();
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    let scale = a
        .iter()
        .flat_map(|r| r.iter())
        .fold(0.0_f64, |acc, x| acc.max(x.abs()))
        .max(f64::MIN_POSITIVE);

    let mut sweeps = 0;
    let mut converged = false;

    while sweeps < max_sweeps {
        let off = (a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2]).sqrt();
        if off <= JACOBI_CONVERGENCE * scale {
            converged = true;
            break;
        }
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            rotate(&mut a, &mut v, p, q);
        }
        sweeps += 1;
    }

    if !converged {
        let off = (a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2]).sqrt();
        converged = off <= JACOBI_CONVERGENCE * scale;
    }

    let mut pairs: [(f64, DVec3); 3] = [0, 1, 2].map(|k| {
        (
            a[k][k],
            DVec3::new(v[0][k], v[1][k], v[2][k]).normalize_or_zero(),
        )
    });
    pairs.sort_by(|x, y| y.0.total_cmp(&x.0));

    Ok(SymmetricEigen3 {
        values: [pairs[0].0, pairs[1].0, pairs[2].0],
        vectors: [pairs[0].1, pairs[1].1, pairs[2].1],
        sweeps,
        converged,
    })
}

/// Applies one Jacobi rotation zeroing `a[p][q]`, accumulating it into `v`.
fn rotate(a: &mut [[f64; 3]; 3], v: &mut [[f64; 3]; 3], p: usize, q: usize) {
    let apq = a[p][q];
    if apq == 0.0 {
        return;
    }

    let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
    let t = if theta.abs() > 1.0e150 {
        0.5 / theta
    } else {
        theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt())
    };
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    // A ← A·J
    for row in a.iter_mut() {
        let akp = row[p];
        let akq = row[q];
        row[p] = c * akp - s * akq;
        row[q] = s * akp + c * akq;
    }
    // A ← Jᵗ·A
    for k in 0..3 {
        let apk = a[p][k];
        let aqk = a[q][k];
        a[p][k] = c * apk - s * aqk;
        a[q][k] = s * apk + c * aqk;
    }
    // V ← V·J
    for row in v.iter_mut() {
        let vkp = row[p];
        let vkq = row[q];
        row[p] = c * vkp - s * vkq;
        row[q] = s * vkp + c * vkq;
    }

    a[p][q] = 0.0;
    a[q][p] = 0.0;
}

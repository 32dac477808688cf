//! 4×4 block structure shared by every Mueller-like matrix.
//!
//! A Mueller matrix is read as
//!
//! ```text
//! | m00   rowᵗ |
//! | col   sub  |
//! ```
//!
//! where `row` and `col` are 3-vectors and `sub` is the 3×3 lower-right block.
//! glam stores matrices column-major; all accessors here use (row, column)
//! indexing so callers can think in row-major terms.

use glam::{DMat3, DMat4, DVec3, DVec4};

/// A 4×4 matrix split into its scalar, vector and 3×3 blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blocks4 {
    /// Element (0, 0).
    pub m00: f64,
    /// Elements (0, 1..4).
    pub row: DVec3,
    /// Elements (1..4, 0).
    pub col: DVec3,
    /// Elements (1..4, 1..4).
    pub sub: DMat3,
}

impl Blocks4 {
    /// Splits a 4×4 matrix into blocks.
    pub fn split(m: &DMat4) -> Self {
        let c0 = m.x_axis;
        let c1 = m.y_axis;
        let c2 = m.z_axis;
        let c3 = m.w_axis;
        Self {
            m00: c0.x,
            row: DVec3::new(c1.x, c2.x, c3.x),
            col: DVec3::new(c0.y, c0.z, c0.w),
            sub: DMat3::from_cols(
                DVec3::new(c1.y, c1.z, c1.w),
                DVec3::new(c2.y, c2.z, c2.w),
                DVec3::new(c3.y, c3.z, c3.w),
            ),
        }
    }

    /// Reassembles the blocks into a 4×4 matrix.
    pub fn assemble(&self) -> DMat4 {
        let s = &self.sub;
        DMat4::from_cols(
            DVec4::new(self.m00, self.col.x, self.col.y, self.col.z),
            DVec4::new(self.row.x, s.x_axis.x, s.x_axis.y, s.x_axis.z),
            DVec4::new(self.row.y, s.y_axis.x, s.y_axis.y, s.y_axis.z),
            DVec4::new(self.row.z, s.z_axis.x, s.z_axis.y, s.z_axis.z),
        )
    }
}

/// Element (row, col) of a 4×4 matrix.
#[inline]
pub fn element(m: &DMat4, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}

/// Builds a 4×4 matrix from row-major nested arrays.
#[inline]
pub fn from_rows(rows: &[[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(rows).transpose()
}

/// Returns the row-major nested array representation of a 4×4 matrix.
#[inline]
pub fn to_rows(m: &DMat4) -> [[f64; 4]; 4] {
    m.transpose().to_cols_array_2d()
}

/// Outer product a·bᵗ.
#[inline]
pub fn outer(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Frobenius norm of a 3×3 matrix.
pub fn frobenius_norm3(m: &DMat3) -> f64 {
    (m.x_axis.length_squared() + m.y_axis.length_squared() + m.z_axis.length_squared()).sqrt()
}

/// Frobenius norm of a 4×4 matrix.
pub fn frobenius_norm4(m: &DMat4) -> f64 {
    (m.x_axis.length_squared()
        + m.y_axis.length_squared()
        + m.z_axis.length_squared()
        + m.w_axis.length_squared())
    .sqrt()
}

/// Largest absolute element-wise difference between two 4×4 matrices.
pub fn max_abs_diff4(a: &DMat4, b: &DMat4) -> f64 {
    let d = *a - *b;
    [d.x_axis, d.y_axis, d.z_axis, d.w_axis]
        .iter()
        .map(|c| c.abs().max_element())
        .fold(0.0, f64::max)
}

/// Returns true if every element of the 4×4 matrix is finite.
pub fn is_finite4(m: &DMat4) -> bool {
    m.x_axis.is_finite() && m.y_axis.is_finite() && m.z_axis.is_finite() && m.w_axis.is_finite()
}

//! The Mueller matrix value type.
//!
//! Mueller matrices are immutable: every operation returns a new value.
//! Serialization uses row-major nested arrays (`[[m00, m01, m02, m03], ...]`),
//! which is how measurement pipelines usually hand them over.

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use polardec_math::block::{self, Blocks4};
use polardec_math::{DMat3, DMat4, DVec3};
use polardec_types::{PolarError, PolarResult};

use crate::stokes::StokesVector;

/// A 4×4 real Mueller matrix mapping an input Stokes vector to an output one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 4]; 4]", into = "[[f64; 4]; 4]")]
pub struct MuellerMatrix(DMat4);

impl MuellerMatrix {
    /// The identity (free space / non-interacting element).
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    /// The zero matrix (opaque element).
    pub const ZERO: Self = Self(DMat4::ZERO);

    /// Creates a Mueller matrix from row-major nested arrays.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self(block::from_rows(&rows))
    }

    /// Builds a matrix from its block decomposition.
    pub fn from_blocks(m00: f64, row: DVec3, col: DVec3, sub: DMat3) -> Self {
        Self(Blocks4 { m00, row, col, sub }.assemble())
    }

    /// The underlying glam matrix.
    #[inline]
    pub fn as_mat4(&self) -> &DMat4 {
        &self.0
    }

    /// Row-major nested arrays.
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        block::to_rows(&self.0)
    }

    /// Element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        block::element(&self.0, row, col)
    }

    /// M00: transmittance for unpolarized light.
    #[inline]
    pub fn m00(&self) -> f64 {
        self.get(0, 0)
    }

    /// Block view (m00, first row, first column, 3×3 sub-block).
    pub fn blocks(&self) -> Blocks4 {
        Blocks4::split(&self.0)
    }

    /// The lower-right 3×3 block.
    pub fn sub_block(&self) -> DMat3 {
        self.blocks().sub
    }

    /// Diattenuation vector D = (M01, M02, M03) / M00.
    pub fn diattenuation_vector(&self) -> DVec3 {
        let b = self.blocks();
        b.row / b.m00
    }

    /// Polarizance vector P = (M10, M20, M30) / M00.
    pub fn polarizance_vector(&self) -> DVec3 {
        let b = self.blocks();
        b.col / b.m00
    }

    /// Diattenuation magnitude |D|.
    pub fn diattenuation(&self) -> f64 {
        self.diattenuation_vector().length()
    }

    /// Polarizance magnitude |P|.
    pub fn polarizance(&self) -> f64 {
        self.polarizance_vector().length()
    }

    /// Gil-Bernabeu depolarization index √(ΣMᵢⱼ² − M00²) / (√3·M00).
    ///
    /// 1 for non-depolarizing matrices, 0 for an ideal depolarizer.
    pub fn depolarization_index(&self) -> f64 {
        let m00 = self.m00();
        let total = block::frobenius_norm4(&self.0).powi(2);
        (total - m00 * m00).max(0.0).sqrt() / (3.0_f64.sqrt() * m00)
    }

    /// Applies the matrix to a Stokes vector.
    pub fn apply(&self, s: &StokesVector) -> StokesVector {
        StokesVector::from_dvec4(self.0 * s.to_dvec4())
    }

    /// Matrix product `self · rhs` (light passes through `rhs` first).
    pub fn then_after(&self, rhs: &MuellerMatrix) -> MuellerMatrix {
        Self(self.0 * rhs.0)
    }

    /// Scales every element.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0 * factor)
    }

    /// Matrix inverse, or `None` when the matrix is singular.
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.0.determinant();
        if det.abs() <= f64::EPSILON * block::frobenius_norm4(&self.0).powi(4) || !det.is_finite() {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> f64 {
        block::frobenius_norm4(&self.0)
    }

    /// Largest absolute element-wise difference.
    pub fn max_abs_diff(&self, other: &MuellerMatrix) -> f64 {
        block::max_abs_diff4(&self.0, &other.0)
    }

    /// True if every element differs from `other` by at most `tolerance`.
    pub fn approx_eq(&self, other: &MuellerMatrix, tolerance: f64) -> bool {
        self.max_abs_diff(other) <= tolerance
    }

    /// True if every element is finite.
    pub fn is_finite(&self) -> bool {
        block::is_finite4(&self.0)
    }

    /// Checks the preconditions shared by every decomposition entry point:
    /// finite entries and M00 > 0.
    pub fn check_decomposable(&self) -> PolarResult<()> {
        if !self.is_finite() {
            return Err(PolarError::NonPhysicalMatrix(
                "matrix contains non-finite entries".into(),
            ));
        }
        let m00 = self.m00();
        if m00 <= 0.0 {
            return Err(PolarError::NonPhysicalMatrix(format!(
                "M00 must be positive, got {m00}"
            )));
        }
        Ok(())
    }
}

impl Default for MuellerMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for MuellerMatrix {
    type Output = MuellerMatrix;
    #[inline]
    fn mul(self, rhs: MuellerMatrix) -> MuellerMatrix {
        self.then_after(&rhs)
    }
}

impl Mul<StokesVector> for MuellerMatrix {
    type Output = StokesVector;
    #[inline]
    fn mul(self, rhs: StokesVector) -> StokesVector {
        self.apply(&rhs)
    }
}

impl From<[[f64; 4]; 4]> for MuellerMatrix {
    fn from(rows: [[f64; 4]; 4]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<MuellerMatrix> for [[f64; 4]; 4] {
    fn from(m: MuellerMatrix) -> Self {
        m.to_rows()
    }
}

impl fmt::Display for MuellerMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.to_rows().iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "[{:>10.6} {:>10.6} {:>10.6} {:>10.6}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

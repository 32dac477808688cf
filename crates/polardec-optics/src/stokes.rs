//! Stokes vectors.

use serde::{Deserialize, Serialize};

use polardec_math::DVec4;

/// A Stokes vector (I, Q, U, V).
///
/// `i` is the total intensity, `q` the horizontal/vertical preference,
/// `u` the ±45° preference and `v` the right/left circular preference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StokesVector {
    pub i: f64,
    pub q: f64,
    pub u: f64,
    pub v: f64,
}

impl StokesVector {
    /// Creates a Stokes vector from its four parameters.
    #[inline]
    pub fn from_parameters(i: f64, q: f64, u: f64, v: f64) -> Self {
        Self { i, q, u, v }
    }

    /// Unpolarized light of the given intensity.
    pub fn unpolarized(intensity: f64) -> Self {
        Self::from_parameters(intensity, 0.0, 0.0, 0.0)
    }

    /// Fully linearly polarized light at `angle` radians from horizontal.
    pub fn linear(intensity: f64, angle: f64) -> Self {
        let (s, c) = (2.0 * angle).sin_cos();
        Self::from_parameters(intensity, intensity * c, intensity * s, 0.0)
    }

    /// Fully circularly polarized light; `right = true` gives V = +I.
    pub fn circular(intensity: f64, right: bool) -> Self {
        let v = if right { intensity } else { -intensity };
        Self::from_parameters(intensity, 0.0, 0.0, v)
    }

    #[inline]
    pub fn to_dvec4(self) -> DVec4 {
        DVec4::new(self.i, self.q, self.u, self.v)
    }

    #[inline]
    pub fn from_dvec4(v: DVec4) -> Self {
        Self::from_parameters(v.x, v.y, v.z, v.w)
    }

    /// √(Q² + U² + V²): intensity of the polarized part.
    pub fn polarized_intensity(&self) -> f64 {
        (self.q * self.q + self.u * self.u + self.v * self.v).sqrt()
    }

    /// Degree of polarization √(Q²+U²+V²)/I. Zero for zero intensity.
    pub fn degree_of_polarization(&self) -> f64 {
        if self.i > 0.0 {
            self.polarized_intensity() / self.i
        } else {
            0.0
        }
    }

    /// Degree of linear polarization √(Q²+U²)/I.
    pub fn degree_of_linear_polarization(&self) -> f64 {
        if self.i > 0.0 {
            (self.q * self.q + self.u * self.u).sqrt() / self.i
        } else {
            0.0
        }
    }

    /// Degree of circular polarization V/I (signed).
    pub fn degree_of_circular_polarization(&self) -> f64 {
        if self.i > 0.0 {
            self.v / self.i
        } else {
            0.0
        }
    }

    /// Angle of linear polarization ½·atan2(U, Q), in radians.
    pub fn angle_of_polarization(&self) -> f64 {
        0.5 * self.u.atan2(self.q)
    }

    /// A physical Stokes vector satisfies I ≥ √(Q²+U²+V²) (within `tolerance`).
    pub fn is_physical(&self, tolerance: f64) -> bool {
        self.i >= 0.0 && self.polarized_intensity() <= self.i + tolerance
    }
}

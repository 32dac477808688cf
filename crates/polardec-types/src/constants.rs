//! Numerical tolerances and decomposition defaults.

/// Relative tolerance for clamping small negative eigenvalues of m'·m'ᵗ to zero.
pub const EIGEN_CLAMP_TOLERANCE: f64 = 1.0e-10;

/// Depolarization coefficient (singular value of m') at or below which an
/// axis counts as collapsed.
pub const SINGULAR_TOLERANCE: f64 = 1.0e-9;

/// A diattenuation magnitude `d` is rejected when `1 - d²` falls below this margin.
pub const DIATTENUATION_MARGIN: f64 = 1.0e-12;

/// Slack allowed on physical bounds (|depolarization eigenvalue| ≤ 1, |P| ≤ 1).
pub const PHYSICAL_TOLERANCE: f64 = 1.0e-6;

/// Maximum relative Frobenius residual ‖M − M_Δ·M_R·M_D‖ / ‖M‖.
pub const RECONSTRUCTION_TOLERANCE: f64 = 1.0e-8;

/// Maximum number of cyclic Jacobi sweeps for the 3×3 symmetric eigen-solver.
pub const JACOBI_MAX_SWEEPS: u32 = 50;

/// Off-diagonal magnitude at which a Jacobi sweep is considered converged.
pub const JACOBI_CONVERGENCE: f64 = 1.0e-15;

/// Element-wise tolerance on m'·m'ᵗ ≈ I for the pure-retarder shortcut.
pub const FAST_PATH_TOLERANCE: f64 = 1.0e-10;

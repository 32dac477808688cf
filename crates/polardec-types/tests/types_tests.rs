//! Integration tests for polardec-types.

use polardec_types::constants;
use polardec_types::PolarError;

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = PolarError::NonPhysicalMatrix("M00 = 0".into());
    assert!(err.to_string().contains("M00 = 0"));
    assert!(err.is_non_physical());
}

#[test]
fn domain_error_is_not_non_physical() {
    let err = PolarError::Domain("t_min = -0.5".into());
    assert!(!err.is_non_physical());
    assert!(err.to_string().contains("t_min"));
}

#[test]
fn reconstruction_mismatch_display() {
    let err = PolarError::ReconstructionMismatch {
        residual: 1.5e-2,
        tolerance: 1e-8,
    };
    let msg = err.to_string();
    assert!(msg.contains("1.500e-2"));
    assert!(msg.contains("1.000e-8"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let err: PolarError = io.into();
    assert!(matches!(err, PolarError::Io(_)));
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn tolerances_are_ordered() {
    assert!(constants::DIATTENUATION_MARGIN < constants::EIGEN_CLAMP_TOLERANCE);
    assert!(constants::EIGEN_CLAMP_TOLERANCE < constants::SINGULAR_TOLERANCE);
    assert!(constants::SINGULAR_TOLERANCE < constants::PHYSICAL_TOLERANCE);
    assert!(constants::JACOBI_MAX_SWEEPS > 0);
}

//! Integration tests for polardec-math.

use polardec_math::block::{
    element, frobenius_norm3, frobenius_norm4, from_rows, max_abs_diff4, outer, to_rows, Blocks4,
};
use polardec_math::decomposition::{
    clamped_roots, complete_frame, from_row_vectors, select_signs, signed_sqrt,
    signed_sqrt_pseudo_inverse,
};
use polardec_math::eigen::symmetric_eigen;
use polardec_math::{DMat3, DMat4, DVec3};

fn mat3_close(a: &DMat3, b: &DMat3, tol: f64) -> bool {
    a.abs_diff_eq(*b, tol)
}

fn sample_rows() -> [[f64; 4]; 4] {
    [
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [13.0, 14.0, 15.0, 16.0],
    ]
}

// ─── Block Tests ──────────────────────────────────────────────

#[test]
fn rows_round_trip_is_row_major() {
    let m = from_rows(&sample_rows());
    assert_eq!(element(&m, 0, 1), 2.0);
    assert_eq!(element(&m, 1, 0), 5.0);
    assert_eq!(element(&m, 3, 2), 15.0);
    assert_eq!(to_rows(&m), sample_rows());
}

#[test]
fn split_reads_blocks() {
    let b = Blocks4::split(&from_rows(&sample_rows()));
    assert_eq!(b.m00, 1.0);
    assert_eq!(b.row, DVec3::new(2.0, 3.0, 4.0));
    assert_eq!(b.col, DVec3::new(5.0, 9.0, 13.0));
    // sub-block row 0 is (6, 7, 8)
    assert_eq!(b.sub.row(0), DVec3::new(6.0, 7.0, 8.0));
    assert_eq!(b.sub.col(0), DVec3::new(6.0, 10.0, 14.0));
}

#[test]
fn split_then_assemble_is_identity() {
    let m = from_rows(&sample_rows());
    assert_eq!(Blocks4::split(&m).assemble(), m);
}

#[test]
fn outer_product_entries() {
    let o = outer(DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 5.0, 6.0));
    // entry (i, j) = a_i * b_j
    assert_eq!(o.row(1), DVec3::new(8.0, 10.0, 12.0));
    assert_eq!(o.col(2), DVec3::new(6.0, 12.0, 18.0));
}

#[test]
fn frobenius_norms() {
    assert!((frobenius_norm3(&DMat3::IDENTITY) - 3.0_f64.sqrt()).abs() < 1e-15);
    assert!((frobenius_norm4(&DMat4::IDENTITY) - 2.0).abs() < 1e-15);
    assert_eq!(max_abs_diff4(&DMat4::IDENTITY, &DMat4::IDENTITY), 0.0);
    assert_eq!(max_abs_diff4(&DMat4::IDENTITY, &(DMat4::IDENTITY * 3.0)), 2.0);
}

// ─── Eigen Tests ──────────────────────────────────────────────

#[test]
fn eigen_of_diagonal() {
    let m = DMat3::from_diagonal(DVec3::new(0.2, 0.9, 0.5));
    let e = symmetric_eigen(&m, 50).unwrap();
    assert!(e.converged);
    assert_eq!(e.sweeps, 0);
    assert_eq!(e.values, [0.9, 0.5, 0.2]);
    assert!((e.vectors[0].dot(DVec3::Y)).abs() > 1.0 - 1e-12);
    assert!((e.vectors[2].dot(DVec3::X)).abs() > 1.0 - 1e-12);
}

#[test]
fn eigen_of_coupled_matrix() {
    // [[2,1,0],[1,2,0],[0,0,5]] → 5, 3, 1
    let m = DMat3::from_cols(
        DVec3::new(2.0, 1.0, 0.0),
        DVec3::new(1.0, 2.0, 0.0),
        DVec3::new(0.0, 0.0, 5.0),
    );
    let e = symmetric_eigen(&m, 50).unwrap();
    assert!(e.converged);
    assert!((e.values[0] - 5.0).abs() < 1e-12);
    assert!((e.values[1] - 3.0).abs() < 1e-12);
    assert!((e.values[2] - 1.0).abs() < 1e-12);
    let expected = DVec3::new(1.0, 1.0, 0.0).normalize();
    assert!(e.vectors[1].dot(expected).abs() > 1.0 - 1e-12);
}

#[test]
fn eigen_basis_is_orthonormal_and_reconstructs() {
    let a = DMat3::from_cols(
        DVec3::new(0.3, -0.7, 0.2),
        DVec3::new(0.5, 0.1, -0.4),
        DVec3::new(-0.2, 0.6, 0.9),
    );
    let s = a * a.transpose();
    let e = symmetric_eigen(&s, 50).unwrap();
    assert!(e.converged);

    let v = e.basis();
    assert!(mat3_close(&(v.transpose() * v), &DMat3::IDENTITY, 1e-12));
    assert!(mat3_close(&e.reconstruct(|_, l| l), &s, 1e-12));
    assert!(e.values[0] >= e.values[1] && e.values[1] >= e.values[2]);
    assert!(e.values[2] > 0.0);
}

#[test]
fn eigen_rejects_nan() {
    let mut m = DMat3::IDENTITY;
    m.y_axis.x = f64::NAN;
    assert!(symmetric_eigen(&m, 50).is_err());
}

#[test]
fn eigen_repeated_values() {
    let e = symmetric_eigen(&(DMat3::IDENTITY * 0.25), 50).unwrap();
    assert_eq!(e.values, [0.25, 0.25, 0.25]);
    assert!(mat3_close(&e.basis(), &DMat3::IDENTITY, 0.0));
}

// ─── Sign Selection Tests ─────────────────────────────────────

#[test]
fn positive_determinant_keeps_all_positive() {
    assert_eq!(select_signs(&[0.9, 0.5, 0.1], false), [1.0, 1.0, 1.0]);
}

#[test]
fn negative_determinant_flips_smallest_root() {
    assert_eq!(select_signs(&[0.9, 0.5, 0.1], true), [1.0, 1.0, -1.0]);
}

#[test]
fn negative_determinant_tie_prefers_last_index() {
    assert_eq!(select_signs(&[0.5, 0.5, 0.5], true), [1.0, 1.0, -1.0]);
}

#[test]
fn clamp_absorbs_rounding_noise() {
    let roots = clamped_roots(&[0.81, 0.25, -1e-14], 1e-10).unwrap();
    assert!((roots[0] - 0.9).abs() < 1e-15);
    assert!((roots[1] - 0.5).abs() < 1e-15);
    assert_eq!(roots[2], 0.0);
}

#[test]
fn clamp_rejects_truly_negative_value() {
    assert!(clamped_roots(&[0.81, 0.25, -1e-3], 1e-10).is_none());
}

#[test]
fn signed_sqrt_squares_back() {
    let a = DMat3::from_cols(
        DVec3::new(0.6, 0.1, 0.0),
        DVec3::new(0.1, 0.4, 0.05),
        DVec3::new(0.0, 0.05, 0.3),
    );
    let s = a * a.transpose();
    let e = symmetric_eigen(&s, 50).unwrap();
    let roots = clamped_roots(&e.values, 1e-10).unwrap();
    let signs = select_signs(&roots, true);
    let root = signed_sqrt(&e, &roots, &signs);
    assert!(mat3_close(&(root * root), &s, 1e-12));
    assert!(root.determinant() < 0.0);

    let inv = signed_sqrt_pseudo_inverse(&e, &roots, &signs, 1e-12);
    assert!(mat3_close(&(inv * root), &DMat3::IDENTITY, 1e-10));
}

#[test]
fn pseudo_inverse_drops_collapsed_axis() {
    let e = symmetric_eigen(&DMat3::from_diagonal(DVec3::new(0.64, 0.0, 0.09)), 50).unwrap();
    let roots = clamped_roots(&e.values, 1e-10).unwrap();
    let signs = [1.0; 3];
    let inv = signed_sqrt_pseudo_inverse(&e, &roots, &signs, 1e-9);
    let expected = DMat3::from_diagonal(DVec3::new(1.0 / 0.8, 0.0, 1.0 / 0.3));
    assert!(mat3_close(&inv, &expected, 1e-12));
}

// ─── Frame Completion Tests ───────────────────────────────────

#[test]
fn complete_frame_one_missing() {
    let rows = complete_frame([Some(DVec3::X), None, Some(DVec3::Z)], 1.0);
    let m = from_row_vectors(&rows);
    assert!(mat3_close(&(m * m.transpose()), &DMat3::IDENTITY, 1e-12));
    assert!((m.determinant() - 1.0).abs() < 1e-12);
    assert!((rows[1] - DVec3::Y).length() < 1e-12);
}

#[test]
fn complete_frame_respects_handedness() {
    let rows = complete_frame([Some(DVec3::X), None, Some(DVec3::Z)], -1.0);
    let m = from_row_vectors(&rows);
    assert!((m.determinant() + 1.0).abs() < 1e-12);
}

#[test]
fn complete_frame_two_missing() {
    let w = DVec3::new(1.0, 2.0, 2.0) / 3.0;
    let rows = complete_frame([None, Some(w), None], 1.0);
    let m = from_row_vectors(&rows);
    assert!(mat3_close(&(m * m.transpose()), &DMat3::IDENTITY, 1e-12));
    assert!((m.determinant() - 1.0).abs() < 1e-12);
    assert_eq!(rows[1], w);
}

#[test]
fn complete_frame_all_missing_is_identity() {
    let rows = complete_frame([None, None, None], 1.0);
    assert!(mat3_close(&from_row_vectors(&rows), &DMat3::IDENTITY, 0.0));
}

//! Shared test utilities for ode-math integration tests.
//!
//! Tolerance assertions for vectors and quaternions, plus conversions to
//! nalgebra for cross-checking against a reference implementation.

#![allow(dead_code)]

use ode_math::{Matrix4, Quaternion, Vector};

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-9;

/// Check approximate equality of two f64 values within `tol`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Assert two f64 values are approximately equal.
pub fn assert_f64_eq(a: f64, b: f64, tol: f64) {
    assert!(
        approx_eq(a, b, tol),
        "f64 mismatch: {a} vs {b} (delta={}, tol={tol})",
        (a - b).abs()
    );
}

/// Assert two vectors have the same order and approximately equal elements.
pub fn assert_vec_eq(a: &Vector, b: &Vector, tol: f64) {
    assert_eq!(a.len(), b.len(), "order mismatch: {a} vs {b}");
    assert!(
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, tol)),
        "Vector mismatch: {:?} vs {:?} tol={tol}",
        a.as_slice(),
        b.as_slice()
    );
}

/// Assert two quaternions are approximately equal component-wise.
pub fn assert_quat_eq(a: &Quaternion, b: &Quaternion, tol: f64) {
    assert!(
        a.to_array()
            .iter()
            .zip(b.to_array())
            .all(|(x, y)| approx_eq(*x, y, tol)),
        "Quaternion mismatch: {:?} vs {:?} tol={tol}",
        a.to_array(),
        b.to_array()
    );
}

/// Assert two quaternions represent the same rotation (q and -q agree).
pub fn assert_same_rotation(a: &Quaternion, b: &Quaternion, tol: f64) {
    let same = a.to_array().iter().zip(b.to_array()).all(|(x, y)| approx_eq(*x, y, tol));
    let opposite = a.to_array().iter().zip(b.to_array()).all(|(x, y)| approx_eq(*x, -y, tol));
    assert!(same || opposite, "rotation mismatch: {a:?} vs {b:?}");
}

/// Assert two matrices agree element-wise.
pub fn assert_matrix_eq(a: &Matrix4, b: &Matrix4, tol: f64) {
    for r in 0..4 {
        for c in 0..4 {
            assert!(
                approx_eq(a.m[r][c], b.m[r][c], tol),
                "Matrix mismatch at [{r}][{c}]: {} vs {}",
                a.m[r][c],
                b.m[r][c]
            );
        }
    }
}

/// Convert an order-3 vector to nalgebra.
pub fn na_vec(v: &Vector) -> nalgebra::Vector3<f64> {
    nalgebra::Vector3::try_from(v).expect("order-3 vector")
}

/// Convert to a nalgebra unit quaternion (normalizes).
pub fn na_unit(q: &Quaternion) -> nalgebra::UnitQuaternion<f64> {
    nalgebra::UnitQuaternion::from_quaternion((*q).into())
}

/// A spread of unit quaternions used as fixtures.
pub fn sample_rotations() -> Vec<Quaternion> {
    vec![
        Quaternion::IDENTITY,
        Quaternion::new(0.0, 0.0, 1.0, 0.0),
        Quaternion::from_euler(0.2, 0.4, 2.3),
        Quaternion::from_euler(-1.1, 0.3, -0.4),
        Quaternion::from_axis_angle(&Vector::xyz(1.0, 2.0, 3.0), 0.9).unwrap(),
        Quaternion::from_axis_angle(&Vector::xyz(-0.3, 0.0, 1.0), 2.8).unwrap(),
    ]
}

/// A spread of order-3 vectors used as fixtures.
pub fn sample_vectors() -> Vec<Vector> {
    vec![
        Vector::xyz(1.0, 0.0, 0.0),
        Vector::xyz(0.0, 1.0, 0.0),
        Vector::xyz(0.0, 0.0, 1.0),
        Vector::xyz(1.0, 2.0, 3.0),
        Vector::xyz(-4.5, 0.25, 7.0),
    ]
}

//! Homogeneous 4×4 matrix
//!
//! Produced by [`Quaternion::to_matrix`](crate::Quaternion::to_matrix) and
//! used to move vectors between body and world frames.

use crate::error::{GeometryError, Result};
use crate::types::Vector;
use std::ops::Mul;

/// 4x4 transformation matrix for 3D operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    /// Matrix elements stored in row-major order
    pub m: [[f64; 4]; 4],
}

impl Matrix4 {
    /// Create identity matrix
    pub fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Create zero matrix
    pub fn zero() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    /// Create matrix from rows
    pub fn from_rows(row0: [f64; 4], row1: [f64; 4], row2: [f64; 4], row3: [f64; 4]) -> Self {
        Self {
            m: [row0, row1, row2, row3],
        }
    }

    /// Copy of the rows
    pub fn rows(&self) -> [[f64; 4]; 4] {
        self.m
    }

    /// Create translation matrix
    pub fn translation(offset: &Vector) -> Result<Self> {
        let [tx, ty, tz] = xyz("translation", offset)?;
        Ok(Self {
            m: [
                [1.0, 0.0, 0.0, tx],
                [0.0, 1.0, 0.0, ty],
                [0.0, 0.0, 1.0, tz],
                [0.0, 0.0, 0.0, 1.0],
            ],
        })
    }

    /// Rotation about an arbitrary axis (Rodrigues' rotation formula)
    pub fn rotation(axis: &Vector, angle: f64) -> Result<Self> {
        xyz("rotation", axis)?;
        let axis = axis.normalize()?;
        let (sin, cos) = angle.sin_cos();
        let one_minus_cos = 1.0 - cos;
        let (x, y, z) = (axis[0], axis[1], axis[2]);

        Ok(Self {
            m: [
                [
                    cos + x * x * one_minus_cos,
                    x * y * one_minus_cos - z * sin,
                    x * z * one_minus_cos + y * sin,
                    0.0,
                ],
                [
                    y * x * one_minus_cos + z * sin,
                    cos + y * y * one_minus_cos,
                    y * z * one_minus_cos - x * sin,
                    0.0,
                ],
                [
                    z * x * one_minus_cos - y * sin,
                    z * y * one_minus_cos + x * sin,
                    cos + z * z * one_minus_cos,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        })
    }

    /// Transpose the matrix
    pub fn transpose(&self) -> Self {
        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = self.m[j][i];
            }
        }
        result
    }

    /// Transform a point (applies full transformation including translation)
    pub fn transform_point(&self, v: &Vector) -> Result<Vector> {
        let [x, y, z] = xyz("point transform", v)?;
        let w = self.m[3][0] * x + self.m[3][1] * y + self.m[3][2] * z + self.m[3][3];
        let w = if w.abs() < 1e-10 { 1.0 } else { w };

        Ok(Vector::xyz(
            (self.m[0][0] * x + self.m[0][1] * y + self.m[0][2] * z + self.m[0][3]) / w,
            (self.m[1][0] * x + self.m[1][1] * y + self.m[1][2] * z + self.m[1][3]) / w,
            (self.m[2][0] * x + self.m[2][1] * y + self.m[2][2] * z + self.m[2][3]) / w,
        )
        .with_kind(v.kind()))
    }

    /// Transform a direction vector (ignores translation)
    pub fn transform_direction(&self, v: &Vector) -> Result<Vector> {
        let [x, y, z] = xyz("direction transform", v)?;
        Ok(Vector::xyz(
            self.m[0][0] * x + self.m[0][1] * y + self.m[0][2] * z,
            self.m[1][0] * x + self.m[1][1] * y + self.m[1][2] * z,
            self.m[2][0] * x + self.m[2][1] * y + self.m[2][2] * z,
        )
        .with_kind(v.kind()))
    }
}

fn xyz(operation: &'static str, v: &Vector) -> Result<[f64; 3]> {
    match v.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(GeometryError::OrderRequired {
            operation,
            expected: 3,
            actual: v.len(),
        }),
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.m[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        result
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4> for nalgebra::Matrix4<f64> {
    fn from(m: Matrix4) -> Self {
        nalgebra::Matrix4::from_fn(|r, c| m.m[r][c])
    }
}

impl From<nalgebra::Matrix4<f64>> for Matrix4 {
    fn from(n: nalgebra::Matrix4<f64>) -> Self {
        let mut m = Matrix4::zero();
        for r in 0..4 {
            for c in 0..4 {
                m.m[r][c] = n[(r, c)];
            }
        }
        m
    }
}

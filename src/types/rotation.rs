//! ODE rotation matrices
//!
//! ODE stores rotations as `dMatrix3`: three rows of four reals, the fourth
//! column padding. [`Rotation`] keeps that layout and offers the same
//! constructors as the native library (`dRSetIdentity`,
//! `dRFromEulerAngles`, `dRFromAxisAndAngle`, `dRFrom2Axes`) and the
//! conversions to and from quaternions (`dQtoR`, `dRtoQ`).
//!
//! Note that ODE's Euler-angle matrix is the transpose of the aerospace
//! z-y-x matrix that [`Quaternion::from_euler`] describes, i.e. the inverse
//! rotation.

use crate::error::{GeometryError, Result};
use crate::types::{Matrix4, Quaternion, Scalar, Vector};

/// Rotation matrix in ODE's 3×4 row layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    m: [[f64; 4]; 3],
}

impl Rotation {
    pub fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    fn from_3x3(r: [[f64; 3]; 3]) -> Self {
        Self {
            m: [
                [r[0][0], r[0][1], r[0][2], 0.0],
                [r[1][0], r[1][1], r[1][2], 0.0],
                [r[2][0], r[2][1], r[2][2], 0.0],
            ],
        }
    }

    /// Build from loosely typed arguments.
    ///
    /// | args | meaning |
    /// |---|---|
    /// | 0 | identity |
    /// | 3 | phi, theta, psi |
    /// | 4 | axis x, y, z and angle |
    /// | 6 | first axis x, y, z, second axis x, y, z |
    pub fn from_args(args: &[Scalar]) -> Result<Self> {
        let values = args
            .iter()
            .map(Scalar::to_f64)
            .collect::<Result<Vec<f64>>>()?;

        match values.as_slice() {
            [] => Ok(Self::identity()),
            [phi, theta, psi] => Ok(Self::from_euler(*phi, *theta, *psi)),
            [x, y, z, angle] => Self::from_axis_angle(&Vector::xyz(*x, *y, *z), *angle),
            [ax, ay, az, bx, by, bz] => {
                Self::from_two_axes(&Vector::xyz(*ax, *ay, *az), &Vector::xyz(*bx, *by, *bz))
            }
            _ => Err(GeometryError::Arity {
                expected: "0, 3, 4 or 6",
                actual: args.len(),
            }),
        }
    }

    /// ODE's `dRFromEulerAngles`
    pub fn from_euler(phi: f64, theta: f64, psi: f64) -> Self {
        let (sphi, cphi) = phi.sin_cos();
        let (stheta, ctheta) = theta.sin_cos();
        let (spsi, cpsi) = psi.sin_cos();

        Self::from_3x3([
            [cpsi * ctheta, spsi * ctheta, -stheta],
            [
                cpsi * stheta * sphi - spsi * cphi,
                spsi * stheta * sphi + cpsi * cphi,
                ctheta * sphi,
            ],
            [
                cpsi * stheta * cphi + spsi * sphi,
                spsi * stheta * cphi - cpsi * sphi,
                ctheta * cphi,
            ],
        ])
    }

    /// Rotation of `angle` radians about `axis`
    pub fn from_axis_angle(axis: &Vector, angle: f64) -> Result<Self> {
        Self::from_quaternion(&Quaternion::from_axis_angle(axis, angle)?)
    }

    /// ODE's `dRFrom2Axes`: the x axis maps onto `a`, the y axis onto the
    /// part of `b` perpendicular to `a`.
    pub fn from_two_axes(a: &Vector, b: &Vector) -> Result<Self> {
        let a = a.normalize()?;
        let b = b.try_sub(&a.scale(a.dot(b)?))?.normalize()?;
        let c = a.cross(&b)?;

        Ok(Self::from_3x3([
            [a[0], b[0], c[0]],
            [a[1], b[1], c[1]],
            [a[2], b[2], c[2]],
        ]))
    }

    /// ODE's `dQtoR`; the quaternion is normalized first
    pub fn from_quaternion(q: &Quaternion) -> Result<Self> {
        let m = q.to_matrix()?.m;
        Ok(Self {
            m: [m[0], m[1], m[2]],
        })
    }

    /// ODE's `dRtoQ`
    pub fn to_quaternion(&self) -> Quaternion {
        let r = |i: usize, j: usize| self.m[i][j];
        let trace = r(0, 0) + r(1, 1) + r(2, 2);

        if trace >= 0.0 {
            let s = (trace + 1.0).sqrt();
            let w = 0.5 * s;
            let s = 0.5 / s;
            return Quaternion::new(
                (r(2, 1) - r(1, 2)) * s,
                (r(0, 2) - r(2, 0)) * s,
                (r(1, 0) - r(0, 1)) * s,
                w,
            );
        }

        // largest diagonal element picks the stable branch
        if r(0, 0) >= r(1, 1) && r(0, 0) >= r(2, 2) {
            let s = (r(0, 0) - (r(1, 1) + r(2, 2)) + 1.0).sqrt();
            let x = 0.5 * s;
            let s = 0.5 / s;
            Quaternion::new(
                x,
                (r(0, 1) + r(1, 0)) * s,
                (r(2, 0) + r(0, 2)) * s,
                (r(2, 1) - r(1, 2)) * s,
            )
        } else if r(1, 1) >= r(2, 2) {
            let s = (r(1, 1) - (r(2, 2) + r(0, 0)) + 1.0).sqrt();
            let y = 0.5 * s;
            let s = 0.5 / s;
            Quaternion::new(
                (r(0, 1) + r(1, 0)) * s,
                y,
                (r(1, 2) + r(2, 1)) * s,
                (r(0, 2) - r(2, 0)) * s,
            )
        } else {
            let s = (r(2, 2) - (r(0, 0) + r(1, 1)) + 1.0).sqrt();
            let z = 0.5 * s;
            let s = 0.5 / s;
            Quaternion::new(
                (r(2, 0) + r(0, 2)) * s,
                (r(1, 2) + r(2, 1)) * s,
                z,
                (r(1, 0) - r(0, 1)) * s,
            )
        }
    }

    /// Rows in ODE's 3×4 layout
    pub fn to_matrix(&self) -> [[f64; 4]; 3] {
        self.m
    }

    /// Embed in a homogeneous 4×4 matrix
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_rows(self.m[0], self.m[1], self.m[2], [0.0, 0.0, 0.0, 1.0])
    }

    /// Element at `row`, `col` (col 3 is always zero)
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.m.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Rotate an order-3 vector
    pub fn transform(&self, v: &Vector) -> Result<Vector> {
        self.to_matrix4().transform_direction(v)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

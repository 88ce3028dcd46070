//! Quaternion type for orientations
//!
//! A quaternion `(x, y, z, w)` has vector part `(x, y, z)` and scalar part
//! `w`. Unit quaternions represent rotations; the rotation-dependent
//! operations ([`Quaternion::rotate`], [`Quaternion::to_matrix`], the Euler
//! extractors) assume the caller normalized first, except `to_matrix`, which
//! normalizes its own copy.
//!
//! Rotations are active: `q.rotate(v)` computes `q * v * q⁻¹`, and the
//! product `a * b` applies `b` first, then `a`.

use crate::config::{GimbalPolicy, MathConfig, ZeroNormalizePolicy};
use crate::error::{GeometryError, Result};
use crate::types::{Matrix4, Scalar, Vector};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Quaternion with vector part `(x, y, z)` and scalar part `w`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// How to build a quaternion.
///
/// Each variant is one construction strategy. [`QuaternionInit::from_args`]
/// decides the strategy from loosely typed arguments once, at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum QuaternionInit {
    /// `(0, 0, 0, 1)`
    Identity,
    /// Pure real `(0, 0, 0, s)`
    Scalar(f64),
    /// Order-3 vector padded with `w = 0`, or order-4 vector used as is
    Vector(Vector),
    /// Rotation of `angle` radians about `axis`
    AxisAngle { axis: Vector, angle: f64 },
    /// Shortest rotation taking the direction of `from` onto `to`
    BetweenVectors { from: Vector, to: Vector },
    /// Roll, pitch and yaw in radians (z-y-x order)
    Euler { roll: f64, pitch: f64, yaw: f64 },
    /// Explicit `[x, y, z, w]`
    Components([f64; 4]),
}

impl QuaternionInit {
    /// Pick a construction strategy from argument count and kinds.
    ///
    /// | args | meaning |
    /// |---|---|
    /// | 0 | identity |
    /// | 1 | number (pure real) or order-3/4 vector |
    /// | 2 | vector + number (axis, angle) or vector + vector |
    /// | 3 | roll, pitch, yaw |
    /// | 4 | x, y, z, w |
    pub fn from_args(args: &[Scalar]) -> Result<Self> {
        match args {
            [] => Ok(QuaternionInit::Identity),
            [Scalar::Vector(v)] => Ok(QuaternionInit::Vector(v.clone())),
            [arg] if arg.is_numeric() => Ok(QuaternionInit::Scalar(arg.to_f64()?)),
            [arg] => Err(GeometryError::TypeMismatch {
                expected: "Numeric or Vector",
                found: arg.kind_name(),
            }),
            [Scalar::Vector(from), Scalar::Vector(to)] => Ok(QuaternionInit::BetweenVectors {
                from: from.clone(),
                to: to.clone(),
            }),
            [Scalar::Vector(axis), angle] => Ok(QuaternionInit::AxisAngle {
                axis: axis.clone(),
                angle: angle.to_f64()?,
            }),
            [first, _] => Err(GeometryError::TypeMismatch {
                expected: "Vector",
                found: first.kind_name(),
            }),
            [roll, pitch, yaw] => Ok(QuaternionInit::Euler {
                roll: roll.to_f64()?,
                pitch: pitch.to_f64()?,
                yaw: yaw.to_f64()?,
            }),
            [x, y, z, w] => Ok(QuaternionInit::Components([
                x.to_f64()?,
                y.to_f64()?,
                z.to_f64()?,
                w.to_f64()?,
            ])),
            _ => Err(GeometryError::Arity {
                expected: "0..=4",
                actual: args.len(),
            }),
        }
    }
}

impl Quaternion {
    /// Multiplicative identity
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    /// Index of the x element
    pub const X: usize = 0;
    /// Index of the y element
    pub const Y: usize = 1;
    /// Index of the z element
    pub const Z: usize = 2;
    /// Index of the w (scalar) element
    pub const W: usize = 3;

    /// Create a quaternion from explicit components
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quaternion { x, y, z, w }
    }

    /// The identity quaternion `(0, 0, 0, 1)`
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build from a construction strategy
    pub fn from_init(init: QuaternionInit) -> Result<Self> {
        match init {
            QuaternionInit::Identity => Ok(Self::IDENTITY),
            QuaternionInit::Scalar(s) => Ok(Self::from_scalar(s)),
            QuaternionInit::Vector(v) => Self::from_vector(&v),
            QuaternionInit::AxisAngle { axis, angle } => Self::from_axis_angle(&axis, angle),
            QuaternionInit::BetweenVectors { from, to } => Self::from_vectors(&from, &to),
            QuaternionInit::Euler { roll, pitch, yaw } => Ok(Self::from_euler(roll, pitch, yaw)),
            QuaternionInit::Components([x, y, z, w]) => Ok(Self::new(x, y, z, w)),
        }
    }

    /// Build from loosely typed arguments; see [`QuaternionInit::from_args`]
    pub fn from_args(args: &[Scalar]) -> Result<Self> {
        Self::from_init(QuaternionInit::from_args(args)?)
    }

    /// Pure real quaternion `(0, 0, 0, s)`
    pub const fn from_scalar(s: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, s)
    }

    /// Order-3 vector as `(x, y, z, 0)`, order-4 vector as `(x, y, z, w)`
    pub fn from_vector(v: &Vector) -> Result<Self> {
        match v.as_slice() {
            [x, y, z] => Ok(Self::new(*x, *y, *z, 0.0)),
            [x, y, z, w] => Ok(Self::new(*x, *y, *z, *w)),
            _ => Err(GeometryError::OrderRequired {
                operation: "quaternion from vector",
                expected: 3,
                actual: v.len(),
            }),
        }
    }

    /// Combine a scalar part and an order-3 vector part
    pub fn from_scalar_vector(scalar: f64, vector: &Vector) -> Result<Self> {
        require_order3("quaternion from scalar and vector", vector)?;
        Ok(Self::new(vector[0], vector[1], vector[2], scalar))
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// The axis need not be normalized. A zero axis yields the identity.
    pub fn from_axis_angle(axis: &Vector, angle: f64) -> Result<Self> {
        require_order3("axis-angle rotation", axis)?;
        let len = axis.magnitude();
        if len == 0.0 {
            return Ok(Self::IDENTITY);
        }
        let half = angle / 2.0;
        let s = half.sin() / len;
        Ok(Self::new(axis[0] * s, axis[1] * s, axis[2] * s, half.cos()))
    }

    /// Shortest rotation turning the direction of `from` onto `to`.
    ///
    /// For opposite directions the rotation is half a turn about an
    /// arbitrary axis perpendicular to `from`.
    pub fn from_vectors(from: &Vector, to: &Vector) -> Result<Self> {
        require_order3("rotation between vectors", from)?;
        require_order3("rotation between vectors", to)?;
        let f = from.normalize()?;
        let t = to.normalize()?;

        let d = f.dot(&t)?;
        if 1.0 + d < 1e-12 {
            let mut axis = f.cross(&Vector::xyz(1.0, 0.0, 0.0))?;
            if axis.sqr() < 1e-12 {
                axis = f.cross(&Vector::xyz(0.0, 1.0, 0.0))?;
            }
            let axis = axis.normalize()?;
            return Ok(Self::new(axis[0], axis[1], axis[2], 0.0));
        }

        let c = f.cross(&t)?;
        Self::new(c[0], c[1], c[2], 1.0 + d).normalize()
    }

    /// Roll, pitch and yaw (radians), aerospace z-y-x convention
    pub fn from_euler(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll / 2.0).sin_cos();
        let (sp, cp) = (pitch / 2.0).sin_cos();
        let (sy, cy) = (yaw / 2.0).sin_cos();

        Self::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    /// Scalar (real) part
    pub fn scalar(&self) -> f64 {
        self.w
    }

    /// Vector (imaginary) part as an order-3 vector
    pub fn vector(&self) -> Vector {
        Vector::xyz(self.x, self.y, self.z)
    }

    /// Components as `[x, y, z, w]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Components as an order-4 vector
    pub fn to_vector(&self) -> Vector {
        Vector::from(self.to_array())
    }

    /// Component at `index` (0..4)
    pub fn get(&self, index: usize) -> Result<f64> {
        self.to_array()
            .get(index)
            .copied()
            .ok_or(GeometryError::IndexOutOfBounds { index, len: 4 })
    }

    /// Assign component `index`, coercing the value to a float
    pub fn set(&mut self, index: usize, value: impl Into<Scalar>) -> Result<()> {
        let value = value.into().to_f64()?;
        match index {
            Self::X => self.x = value,
            Self::Y => self.y = value,
            Self::Z => self.z = value,
            Self::W => self.w = value,
            _ => return Err(GeometryError::IndexOutOfBounds { index, len: 4 }),
        }
        Ok(())
    }

    /// Squared magnitude
    pub fn sqr(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Euclidean magnitude
    pub fn magnitude(&self) -> f64 {
        self.sqr().sqrt()
    }

    fn max_abs(&self) -> f64 {
        self.to_array().iter().fold(0.0f64, |m, e| m.max(e.abs()))
    }

    /// Negate the vector part
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Unit-length copy; zero quaternion handled per the default policy
    pub fn normalize(&self) -> Result<Self> {
        self.normalize_with(&MathConfig::default())
    }

    pub fn normalize_with(&self, config: &MathConfig) -> Result<Self> {
        let mut q = *self;
        q.normalize_mut_with(config)?;
        Ok(q)
    }

    /// Normalize in place
    pub fn normalize_mut(&mut self) -> Result<&mut Self> {
        self.normalize_mut_with(&MathConfig::default())
    }

    pub fn normalize_mut_with(&mut self, config: &MathConfig) -> Result<&mut Self> {
        let scale = self.max_abs();
        if scale == 0.0 {
            if !zero_allows_division(config, "normalize")? {
                return Ok(self);
            }
        } else {
            // Rescale so the sum of squares cannot underflow or overflow
            *self = Self::new(self.x / scale, self.y / scale, self.z / scale, self.w / scale);
        }
        let mag = self.magnitude();
        *self = Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag);
        Ok(self)
    }

    /// Conjugate divided by squared magnitude
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&MathConfig::default())
    }

    pub fn inverse_with(&self, config: &MathConfig) -> Result<Self> {
        let mut q = *self;
        q.inverse_mut_with(config)?;
        Ok(q)
    }

    /// Invert in place
    pub fn inverse_mut(&mut self) -> Result<&mut Self> {
        self.inverse_mut_with(&MathConfig::default())
    }

    pub fn inverse_mut_with(&mut self, config: &MathConfig) -> Result<&mut Self> {
        let smag = self.sqr();
        if smag == 0.0 && !zero_allows_division(config, "invert")? {
            return Ok(self);
        }
        *self = Self::new(-self.x / smag, -self.y / smag, -self.z / smag, self.w / smag);
        Ok(self)
    }

    /// Divide every component by `value`; zero is an error
    pub fn try_div(&self, value: f64) -> Result<Self> {
        if value == 0.0 {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(Self::new(
            self.x / value,
            self.y / value,
            self.z / value,
            self.w / value,
        ))
    }

    /// Rotation matrix (3×3 embedded in a 4×4 homogeneous matrix).
    ///
    /// The matrix is built from a normalized copy, so any non-zero
    /// quaternion yields a proper rotation. A zero quaternion is handled per
    /// the default zero-normalize policy.
    pub fn to_matrix(&self) -> Result<Matrix4> {
        self.to_matrix_with(&MathConfig::default())
    }

    pub fn to_matrix_with(&self, config: &MathConfig) -> Result<Matrix4> {
        if (self.sqr() - 1.0).abs() > config.tolerance {
            tracing::debug!(magnitude = self.magnitude(), "normalizing quaternion for matrix conversion");
        }
        let Quaternion { x, y, z, w } = self.normalize_with(config)?;

        Ok(Matrix4::from_rows(
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - z * w),
                2.0 * (x * z + y * w),
                0.0,
            ],
            [
                2.0 * (x * y + z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - x * w),
                0.0,
            ],
            [
                2.0 * (x * z - y * w),
                2.0 * (y * z + x * w),
                1.0 - 2.0 * (x * x + y * y),
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ))
    }

    /// Rotation about the x axis (radians)
    pub fn roll(&self) -> f64 {
        let Quaternion { x, y, z, w } = *self;
        (2.0 * (w * x + y * z)).atan2(w * w - x * x - y * y + z * z)
    }

    /// Rotation about the y axis (radians), clamped at gimbal lock
    pub fn pitch(&self) -> f64 {
        let arg = self.pitch_sine();
        if arg.abs() > 1.0 {
            tracing::debug!(arg, "clamping pitch sine into [-1, 1]");
        }
        arg.clamp(-1.0, 1.0).asin()
    }

    /// Rotation about the y axis, handling the asin domain per `config`
    pub fn pitch_with(&self, config: &MathConfig) -> Result<f64> {
        let arg = self.pitch_sine();
        match config.gimbal {
            GimbalPolicy::Clamp => Ok(self.pitch()),
            GimbalPolicy::Propagate => Ok(arg.asin()),
            GimbalPolicy::Fail if arg.abs() > 1.0 => Err(GeometryError::Domain(format!(
                "pitch sine {arg} outside [-1, 1]"
            ))),
            GimbalPolicy::Fail => Ok(arg.asin()),
        }
    }

    fn pitch_sine(&self) -> f64 {
        2.0 * (self.w * self.y - self.x * self.z)
    }

    /// Rotation about the z axis (radians)
    pub fn yaw(&self) -> f64 {
        let Quaternion { x, y, z, w } = *self;
        (2.0 * (x * y + w * z)).atan2(w * w + x * x - y * y - z * z)
    }

    /// `(roll, pitch, yaw)`
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        (self.roll(), self.pitch(), self.yaw())
    }

    /// Rotate an order-3 vector; the result keeps the vector's kind
    pub fn rotate(&self, v: &Vector) -> Result<Vector> {
        require_order3("quaternion rotation", v)?;
        let p = Self::new(v[0], v[1], v[2], 0.0);
        let r = *self * p * self.inverse()?;
        Ok(Vector::xyz(r.x, r.y, r.z).with_kind(v.kind()))
    }

    /// Normalized vector part; the zero vector when there is no rotation
    pub fn axis(&self) -> Vector {
        let v = self.vector();
        let len = v.magnitude();
        if len > 0.0 {
            v.scale(1.0 / len)
        } else {
            Vector::new()
        }
    }

    /// Rotation angle in radians, `2·atan2(|v|, w)`
    pub fn angle(&self) -> f64 {
        2.0 * self.vector().magnitude().atan2(self.w)
    }

    /// Quaternion exponential
    pub fn exp(&self) -> Self {
        let mag = self.vector().magnitude();
        let e = self.w.exp();
        if mag == 0.0 {
            return Self::from_scalar(e);
        }
        let s = e * mag.sin() / mag;
        Self::new(self.x * s, self.y * s, self.z * s, e * mag.cos())
    }

    /// This orientation followed by a rotation of `angle` about `axis`
    pub fn axis_rotation(&self, axis: &Vector, angle: f64) -> Result<Self> {
        Ok(Self::from_axis_angle(axis, angle)? * *self)
    }

    /// Every component within the default tolerance (1e-10)
    pub fn similar_to(&self, other: &Quaternion) -> bool {
        self.similar_to_with(other, &MathConfig::default())
    }

    pub fn similar_to_with(&self, other: &Quaternion, config: &MathConfig) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() <= config.tolerance)
    }
}

fn require_order3(operation: &'static str, v: &Vector) -> Result<()> {
    if v.len() != 3 {
        return Err(GeometryError::OrderRequired {
            operation,
            expected: 3,
            actual: v.len(),
        });
    }
    Ok(())
}

/// Decide whether dividing a zero-magnitude value should go ahead.
/// `Ok(false)` means leave the value as it is.
fn zero_allows_division(config: &MathConfig, action: &'static str) -> Result<bool> {
    match config.zero_normalize {
        ZeroNormalizePolicy::Fail => Err(GeometryError::ZeroMagnitude(action)),
        ZeroNormalizePolicy::Zero => {
            tracing::debug!(action, "zero quaternion left unchanged");
            Ok(false)
        }
        ZeroNormalizePolicy::Propagate => Ok(true),
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, o: Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            self.w * o.y + self.y * o.w + self.z * o.x - self.x * o.z,
            self.w * o.z + self.z * o.w + self.x * o.y - self.y * o.x,
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
        )
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;
    fn mul(self, s: f64) -> Quaternion {
        Quaternion::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;
    fn add(self, o: Quaternion) -> Quaternion {
        Quaternion::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w)
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;
    fn sub(self, o: Quaternion) -> Quaternion {
        Quaternion::new(self.x - o.x, self.y - o.y, self.z - o.z, self.w - o.w)
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;
    fn neg(self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Quaternion::new(x, y, z, w)
    }
}

impl From<Quaternion> for nalgebra::Quaternion<f64> {
    fn from(q: Quaternion) -> Self {
        nalgebra::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f64>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f64>) -> Self {
        Quaternion::new(q.coords[0], q.coords[1], q.coords[2], q.coords[3])
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{:.2}, {:.2}, {:.2}, {:.2}|",
            self.x, self.y, self.z, self.w
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-10, "{a} vs {b}");
    }

    #[test]
    fn test_quaternion_no_args_is_identity() {
        assert_eq!(Quaternion::from_args(&[]).unwrap(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::default(), Quaternion::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_quaternion_one_arg() {
        assert_eq!(
            Quaternion::from_args(&args![2]).unwrap(),
            Quaternion::new(0.0, 0.0, 0.0, 2.0)
        );
        assert_eq!(
            Quaternion::from_args(&args![Vector::xyz(1.0, 2.0, 3.0)]).unwrap(),
            Quaternion::new(1.0, 2.0, 3.0, 0.0)
        );
        assert_eq!(
            Quaternion::from_args(&args![Vector::from([1.0, 2.0, 3.0, 4.0])]).unwrap(),
            Quaternion::new(1.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn test_quaternion_one_arg_errors() {
        let err = Quaternion::from_args(&args!["1.0"]).unwrap_err();
        assert!(matches!(err, GeometryError::TypeMismatch { found: "String", .. }));

        let err = Quaternion::from_args(&args![Vector::from([1.0, 2.0])]).unwrap_err();
        assert!(matches!(err, GeometryError::OrderRequired { actual: 2, .. }));
    }

    #[test]
    fn test_quaternion_two_args() {
        let q = Quaternion::from_args(&args![Vector::xyz(0.0, 0.0, 2.0), PI]).unwrap();
        assert!(q.similar_to(&Quaternion::new(0.0, 0.0, 1.0, (PI / 2.0).cos())));

        let q = Quaternion::from_args(&args![
            Vector::xyz(1.0, 0.0, 0.0),
            Vector::xyz(0.0, 1.0, 0.0)
        ])
        .unwrap();
        let expected = Quaternion::from_axis_angle(&Vector::xyz(0.0, 0.0, 1.0), FRAC_PI_2).unwrap();
        assert!(q.similar_to(&expected));

        let err = Quaternion::from_args(&args![1, 2]).unwrap_err();
        assert!(matches!(err, GeometryError::TypeMismatch { .. }));
    }

    #[test]
    fn test_quaternion_three_and_four_args() {
        let q = Quaternion::from_args(&args![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(q, Quaternion::from_euler(0.1, 0.2, 0.3));

        let q = Quaternion::from_args(&args![1, 2, "3", 0.5]).unwrap();
        assert_eq!(q, Quaternion::new(1.0, 2.0, 3.0, 0.5));

        let err = Quaternion::from_args(&args![1, Scalar::Nil, 3, 4]).unwrap_err();
        assert!(matches!(err, GeometryError::TypeMismatch { .. }));
    }

    #[test]
    fn test_quaternion_bad_arity() {
        let err = Quaternion::from_args(&args![1, 2, 3, 4, 5]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::Arity {
                expected: "0..=4",
                actual: 5
            }
        );
    }

    #[test]
    fn test_hamilton_basis() {
        let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quaternion::from_scalar(-1.0));
    }

    #[test]
    fn test_identity_is_two_sided() {
        let q = Quaternion::new(0.3, -1.2, 2.0, 0.7);
        assert_eq!(Quaternion::IDENTITY * q, q);
        assert_eq!(q * Quaternion::IDENTITY, q);
    }

    #[test]
    fn test_conjugate_and_inverse() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.conjugate(), Quaternion::new(-1.0, -2.0, -3.0, 4.0));
        assert_eq!(q.conjugate().conjugate(), q);

        let product = q * q.inverse().unwrap();
        assert!(product.similar_to(&Quaternion::IDENTITY));

        let mut m = q;
        m.inverse_mut().unwrap();
        assert_eq!(m, q.inverse().unwrap());
    }

    #[test]
    fn test_zero_quaternion_policies() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            zero.normalize().unwrap_err(),
            GeometryError::ZeroMagnitude("normalize")
        );
        assert_eq!(
            zero.inverse().unwrap_err(),
            GeometryError::ZeroMagnitude("invert")
        );

        let config = MathConfig::new().with_zero_normalize(ZeroNormalizePolicy::Zero);
        assert_eq!(zero.normalize_with(&config).unwrap(), zero);
        assert_eq!(zero.inverse_with(&config).unwrap(), zero);

        let config = MathConfig::new().with_zero_normalize(ZeroNormalizePolicy::Propagate);
        assert!(zero.normalize_with(&config).unwrap().w.is_nan());
    }

    #[test]
    fn test_normalize() {
        let q = Quaternion::new(1.0, 1.0, 1.0, 1.0).normalize().unwrap();
        assert_eq!(q, Quaternion::new(0.5, 0.5, 0.5, 0.5));

        let mut m = Quaternion::new(0.0, 0.0, 0.0, 3.0);
        m.normalize_mut().unwrap();
        assert_eq!(m, Quaternion::IDENTITY);
    }

    #[test]
    fn test_normalize_extreme_magnitudes() {
        let tiny = Quaternion::new(0.0, 0.0, 0.0, 1e-200).normalize().unwrap();
        assert_eq!(tiny, Quaternion::IDENTITY);

        let huge = Quaternion::new(1e200, -1e200, 1e200, 1e200).normalize().unwrap();
        assert!((huge.magnitude() - 1.0).abs() < 1e-12);
        assert!((huge.y + 0.5).abs() < 1e-12);

        let m = Quaternion::new(1e-160, 0.0, 0.0, 1e-160).to_matrix().unwrap();
        assert!((m.m[1][2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_divide() {
        let q = Quaternion::new(2.0, 4.0, 6.0, 8.0);
        assert_eq!(q.try_div(2.0).unwrap(), Quaternion::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(q.try_div(0.0).unwrap_err(), GeometryError::DivisionByZero);
        assert_eq!(q * 0.5, Quaternion::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_add_sub() {
        let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::new(0.5, -1.0, 2.0, -4.0);
        assert_eq!(a + b, Quaternion::new(1.5, 1.0, 5.0, 0.0));
        assert_eq!(a - b, Quaternion::new(0.5, 3.0, 1.0, 8.0));
        assert_eq!(a - a, Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn test_to_matrix_half_turn_about_z() {
        let m = Quaternion::new(0.0, 0.0, 1.0, 0.0).to_matrix().unwrap();
        assert_eq!(
            m.rows(),
            [
                [-1.0, 0.0, 0.0, 0.0],
                [0.0, -1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]
        );
        let v = m.transform_direction(&Vector::xyz(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(v, Vector::xyz(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_to_matrix_normalizes() {
        let unit = Quaternion::from_euler(0.2, 0.4, 2.3);
        let scaled = unit * 5.0;
        let a = unit.to_matrix().unwrap();
        let b = scaled.to_matrix().unwrap();
        for r in 0..4 {
            for c in 0..4 {
                assert_close(a.m[r][c], b.m[r][c]);
            }
        }
    }

    #[test]
    fn test_euler_round_trip() {
        let q = Quaternion::from_euler(0.3, -0.5, 1.2);
        let (roll, pitch, yaw) = q.euler_angles();
        assert_close(roll, 0.3);
        assert_close(pitch, -0.5);
        assert_close(yaw, 1.2);
    }

    #[test]
    fn test_pitch_gimbal_policies() {
        // pitch sine of 2.0, well outside asin's domain
        let q = Quaternion::new(0.0, 1.0, 0.0, 1.0);
        assert_close(q.pitch(), FRAC_PI_2);
        assert!(q
            .pitch_with(&MathConfig::new().with_gimbal(GimbalPolicy::Propagate))
            .unwrap()
            .is_nan());
        let err = q
            .pitch_with(&MathConfig::new().with_gimbal(GimbalPolicy::Fail))
            .unwrap_err();
        assert!(matches!(err, GeometryError::Domain(_)));

        let lock = Quaternion::from_euler(0.0, FRAC_PI_2, 0.0);
        assert_close(
            lock.pitch_with(&MathConfig::new().with_gimbal(GimbalPolicy::Clamp)).unwrap(),
            FRAC_PI_2,
        );
    }

    #[test]
    fn test_rotate() {
        let q = Quaternion::from_axis_angle(&Vector::xyz(0.0, 0.0, 1.0), FRAC_PI_2).unwrap();
        let v = q.rotate(&Vector::force(1.0, 0.0, 0.0)).unwrap();
        assert!(v.similar_to(&Vector::force(0.0, 1.0, 0.0)));

        let err = q.rotate(&Vector::from([1.0, 0.0])).unwrap_err();
        assert!(matches!(err, GeometryError::OrderRequired { .. }));
    }

    #[test]
    fn test_axis_and_angle() {
        let q = Quaternion::from_axis_angle(&Vector::xyz(0.0, 3.0, 0.0), FRAC_PI_4).unwrap();
        assert!(q.axis().similar_to(&Vector::xyz(0.0, 1.0, 0.0)));
        assert_close(q.angle(), FRAC_PI_4);

        assert_eq!(Quaternion::IDENTITY.axis(), Vector::new());
        assert_eq!(Quaternion::IDENTITY.angle(), 0.0);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let q = Quaternion::from_axis_angle(&Vector::new(), 1.0).unwrap();
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_from_vectors_antiparallel() {
        let from = Vector::xyz(1.0, 0.0, 0.0);
        let to = Vector::xyz(-2.0, 0.0, 0.0);
        let q = Quaternion::from_vectors(&from, &to).unwrap();
        let rotated = q.rotate(&from).unwrap();
        assert!(rotated.similar_to(&Vector::xyz(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_from_vectors_zero_fails() {
        let err = Quaternion::from_vectors(&Vector::new(), &Vector::xyz(1.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err, GeometryError::ZeroMagnitude("normalize"));
    }

    #[test]
    fn test_axis_rotation_composes() {
        let z = Vector::xyz(0.0, 0.0, 1.0);
        let quarter = Quaternion::from_axis_angle(&z, FRAC_PI_2).unwrap();
        let half = quarter.axis_rotation(&z, FRAC_PI_2).unwrap();
        let v = half.rotate(&Vector::xyz(1.0, 0.0, 0.0)).unwrap();
        assert!(v.similar_to(&Vector::xyz(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_exp() {
        assert!(Quaternion::from_scalar(0.0).exp().similar_to(&Quaternion::IDENTITY));

        let q = Quaternion::new(0.0, 0.0, FRAC_PI_2, 0.0).exp();
        assert!(q.similar_to(&Quaternion::new(0.0, 0.0, 1.0, 0.0)));
        assert_close(q.magnitude(), 1.0);
    }

    #[test]
    fn test_get_set() {
        let mut q = Quaternion::IDENTITY;
        q.set(Quaternion::X, "0.5").unwrap();
        q.set(Quaternion::W, 2).unwrap();
        assert_eq!(q.get(0).unwrap(), 0.5);
        assert_eq!(q.get(3).unwrap(), 2.0);
        assert!(q.get(4).is_err());
        assert!(q.set(1, Scalar::Nil).is_err());
        assert_eq!(q.y, 0.0);
    }

    #[test]
    fn test_parts() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.scalar(), 4.0);
        assert_eq!(q.vector(), Vector::xyz(1.0, 2.0, 3.0));
        assert_eq!(q.to_vector().as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            Quaternion::from_scalar_vector(4.0, &Vector::xyz(1.0, 2.0, 3.0)).unwrap(),
            q
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Quaternion::new(0.0, 0.5, -1.0, 1.0).to_string(),
            "|0.00, 0.50, -1.00, 1.00|"
        );
    }

    #[test]
    fn test_nalgebra_round_trip() {
        let q = Quaternion::new(0.1, 0.2, 0.3, 0.9);
        let n: nalgebra::Quaternion<f64> = q.into();
        assert_eq!(n.w, 0.9);
        assert_eq!(n.i, 0.1);
        assert_eq!(Quaternion::from(n), q);
    }
}

//! Vector type for spatial quantities
//!
//! A [`Vector`] is an ordered tuple of floats, conventionally of order 3.
//! Positions, velocities, forces and torques are all vectors; the
//! [`VectorKind`] tag records which one, and every arithmetic operation
//! carries the receiver's tag through to its result.

use crate::config::{MathConfig, ZeroNormalizePolicy};
use crate::error::{GeometryError, Result};
use crate::types::{Quaternion, Scalar};
use std::fmt;
use std::ops::{Index, Mul, Neg};

/// Semantic tag of a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorKind {
    #[default]
    Generic,
    Position,
    LinearVelocity,
    AngularVelocity,
    Force,
    Torque,
}

impl VectorKind {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            VectorKind::Generic => "Vector",
            VectorKind::Position => "Position",
            VectorKind::LinearVelocity => "LinearVelocity",
            VectorKind::AngularVelocity => "AngularVelocity",
            VectorKind::Force => "Force",
            VectorKind::Torque => "Torque",
        }
    }
}

/// Fixed-order floating-point vector
///
/// Equality is structural: two vectors are equal when they carry the same
/// kind and identical elements. Use [`Vector::similar_to`] for a
/// tolerance-based comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    kind: VectorKind,
    elements: Vec<f64>,
}

impl Vector {
    /// Index of the x element
    pub const X: usize = 0;
    /// Index of the y element
    pub const Y: usize = 1;
    /// Index of the z element
    pub const Z: usize = 2;

    /// Create a zero vector of order 3
    pub fn new() -> Self {
        Self::zeros(3)
    }

    /// Create a zero vector of the given order
    pub fn zeros(order: usize) -> Self {
        Vector {
            kind: VectorKind::Generic,
            elements: vec![0.0; order],
        }
    }

    /// Create an order-3 vector
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Vector {
            kind: VectorKind::Generic,
            elements: vec![x, y, z],
        }
    }

    /// Create a vector from a slice of elements
    pub fn from_slice(elements: &[f64]) -> Self {
        Vector {
            kind: VectorKind::Generic,
            elements: elements.to_vec(),
        }
    }

    /// Create a position
    pub fn position(x: f64, y: f64, z: f64) -> Self {
        Self::xyz(x, y, z).with_kind(VectorKind::Position)
    }

    /// Create a linear velocity
    pub fn linear_velocity(x: f64, y: f64, z: f64) -> Self {
        Self::xyz(x, y, z).with_kind(VectorKind::LinearVelocity)
    }

    /// Create an angular velocity
    pub fn angular_velocity(x: f64, y: f64, z: f64) -> Self {
        Self::xyz(x, y, z).with_kind(VectorKind::AngularVelocity)
    }

    /// Create a force
    pub fn force(x: f64, y: f64, z: f64) -> Self {
        Self::xyz(x, y, z).with_kind(VectorKind::Force)
    }

    /// Create a torque
    pub fn torque(x: f64, y: f64, z: f64) -> Self {
        Self::xyz(x, y, z).with_kind(VectorKind::Torque)
    }

    /// Build a vector from loosely typed arguments.
    ///
    /// - no arguments: zero vector of order 3
    /// - one vector argument: a copy of its elements
    /// - one non-vector argument: type error
    /// - several arguments: each coerced to a float; vector arguments
    ///   contribute all of their elements in order
    pub fn from_args(args: &[Scalar]) -> Result<Self> {
        match args {
            [] => Ok(Self::new()),
            [Scalar::Vector(v)] => Ok(Self::from_slice(v.as_slice())),
            [other] => Err(GeometryError::TypeMismatch {
                expected: "Vector",
                found: other.kind_name(),
            }),
            _ => {
                let mut elements = Vec::with_capacity(args.len());
                for arg in args {
                    match arg {
                        Scalar::Vector(v) => elements.extend_from_slice(v.as_slice()),
                        other => elements.push(other.to_f64()?),
                    }
                }
                Ok(Vector {
                    kind: VectorKind::Generic,
                    elements,
                })
            }
        }
    }

    /// Return the same elements under another tag
    pub fn with_kind(mut self, kind: VectorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Semantic tag
    pub fn kind(&self) -> VectorKind {
        self.kind
    }

    /// Order (number of elements)
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True for an order-0 vector
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Borrow the elements
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    /// Iterate over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.elements.iter()
    }

    /// Copy the elements out
    pub fn to_vec(&self) -> Vec<f64> {
        self.elements.clone()
    }

    /// Element at `index`
    pub fn get(&self, index: usize) -> Result<f64> {
        self.elements
            .get(index)
            .copied()
            .ok_or(GeometryError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Assign element `index`, coercing the value to a float.
    ///
    /// The vector is left untouched if the index or the value is invalid.
    pub fn set(&mut self, index: usize, value: impl Into<Scalar>) -> Result<()> {
        let value = value.into().to_f64()?;
        let len = self.len();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or(GeometryError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// The x (first) element.
    ///
    /// # Panics
    ///
    /// Panics on an order-0 vector.
    pub fn x(&self) -> f64 {
        self[Self::X]
    }

    /// The y (second) element.
    ///
    /// # Panics
    ///
    /// Panics if the order is below 2.
    pub fn y(&self) -> f64 {
        self[Self::Y]
    }

    /// The z (third) element.
    ///
    /// # Panics
    ///
    /// Panics if the order is below 3.
    pub fn z(&self) -> f64 {
        self[Self::Z]
    }

    pub fn set_x(&mut self, value: impl Into<Scalar>) -> Result<()> {
        self.set(Self::X, value)
    }

    pub fn set_y(&mut self, value: impl Into<Scalar>) -> Result<()> {
        self.set(Self::Y, value)
    }

    pub fn set_z(&mut self, value: impl Into<Scalar>) -> Result<()> {
        self.set(Self::Z, value)
    }

    /// Squared magnitude (dot product with itself)
    pub fn sqr(&self) -> f64 {
        self.elements.iter().map(|e| e * e).sum()
    }

    /// Euclidean magnitude
    pub fn magnitude(&self) -> f64 {
        self.sqr().sqrt()
    }

    /// True if every element is exactly zero
    pub fn is_zero_vector(&self) -> bool {
        self.elements.iter().all(|e| *e == 0.0)
    }

    /// True if no element is exactly zero.
    ///
    /// Not the negation of [`Vector::is_zero_vector`]: `(0, 1, 0)` is neither.
    pub fn has_no_zero_elements(&self) -> bool {
        self.elements.iter().all(|e| *e != 0.0)
    }

    /// True if the magnitude is within the default tolerance of 1.0
    pub fn is_unit(&self) -> bool {
        self.is_unit_with(&MathConfig::default())
    }

    pub fn is_unit_with(&self, config: &MathConfig) -> bool {
        (1.0 - self.magnitude()).abs() < config.tolerance
    }

    /// Return a unit-length copy.
    ///
    /// Fails with [`GeometryError::ZeroMagnitude`] on the zero vector.
    pub fn normalize(&self) -> Result<Vector> {
        self.normalize_with(&MathConfig::default())
    }

    /// Return a unit-length copy, handling the zero vector per `config`
    pub fn normalize_with(&self, config: &MathConfig) -> Result<Vector> {
        let mut result = self.clone();
        result.normalize_mut_with(config)?;
        Ok(result)
    }

    /// Normalize in place
    pub fn normalize_mut(&mut self) -> Result<&mut Self> {
        self.normalize_mut_with(&MathConfig::default())
    }

    /// Normalize in place, handling the zero vector per `config`
    pub fn normalize_mut_with(&mut self, config: &MathConfig) -> Result<&mut Self> {
        let scale = self.elements.iter().fold(0.0f64, |m, e| m.max(e.abs()));
        if scale == 0.0 {
            match config.zero_normalize {
                ZeroNormalizePolicy::Fail => {
                    return Err(GeometryError::ZeroMagnitude("normalize"))
                }
                ZeroNormalizePolicy::Zero => {
                    tracing::debug!(kind = self.kind.name(), "normalize of zero vector left as zero");
                    return Ok(self);
                }
                ZeroNormalizePolicy::Propagate => {}
            }
        } else {
            // Rescale so the sum of squares cannot underflow or overflow
            for e in &mut self.elements {
                *e /= scale;
            }
        }
        let mag = self.magnitude();
        for e in &mut self.elements {
            *e /= mag;
        }
        Ok(self)
    }

    fn check_same_order(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(GeometryError::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }

    /// Dot product
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_same_order(other)?;
        Ok(self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Cross product of two order-3 vectors; keeps the receiver's kind
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        let (a, b) = match (self.as_slice(), other.as_slice()) {
            ([ax, ay, az], [bx, by, bz]) => ((*ax, *ay, *az), (*bx, *by, *bz)),
            _ => {
                return Err(GeometryError::OrderRequired {
                    operation: "cross product",
                    expected: 3,
                    actual: if self.len() != 3 { self.len() } else { other.len() },
                })
            }
        };
        Ok(Vector {
            kind: self.kind,
            elements: vec![
                a.1 * b.2 - a.2 * b.1,
                a.2 * b.0 - a.0 * b.2,
                a.0 * b.1 - a.1 * b.0,
            ],
        })
    }

    /// Geometric product: scalar part `a·b`, vector part `a×b`
    pub fn geometric_product(&self, other: &Vector) -> Result<Quaternion> {
        self.check_same_order(other)?;
        let v = self.cross(other)?;
        Ok(Quaternion::new(v.x(), v.y(), v.z(), self.dot(other)?))
    }

    /// Combine element pairs with `f`; keeps the receiver's kind
    pub fn map2<F>(&self, other: &Vector, mut f: F) -> Result<Vector>
    where
        F: FnMut(f64, f64) -> f64,
    {
        self.check_same_order(other)?;
        Ok(Vector {
            kind: self.kind,
            elements: self
                .elements
                .iter()
                .zip(&other.elements)
                .map(|(a, b)| f(*a, *b))
                .collect(),
        })
    }

    /// Element-wise sum
    pub fn try_add(&self, other: &Vector) -> Result<Vector> {
        self.map2(other, |a, b| a + b)
    }

    /// Element-wise difference
    pub fn try_sub(&self, other: &Vector) -> Result<Vector> {
        self.map2(other, |a, b| a - b)
    }

    /// Multiply every element by `scalar`
    pub fn scale(&self, scalar: f64) -> Vector {
        Vector {
            kind: self.kind,
            elements: self.elements.iter().map(|e| e * scalar).collect(),
        }
    }

    /// Divide every element by `scalar`; zero is an error, not infinity
    pub fn try_div(&self, scalar: f64) -> Result<Vector> {
        if scalar == 0.0 {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(Vector {
            kind: self.kind,
            elements: self.elements.iter().map(|e| e / scalar).collect(),
        })
    }

    /// Distance to another point
    pub fn distance(&self, other: &Vector) -> Result<f64> {
        Ok(self.try_sub(other)?.magnitude())
    }

    /// Same kind and every element within the default tolerance (1e-10)
    pub fn similar_to(&self, other: &Vector) -> bool {
        self.similar_to_with(other, &MathConfig::default())
    }

    pub fn similar_to_with(&self, other: &Vector, config: &MathConfig) -> bool {
        self.kind == other.kind
            && self.len() == other.len()
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|(a, b)| (a - b).abs() <= config.tolerance)
    }
}

impl Default for Vector {
    fn default() -> Self {
        Vector::new()
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(elements: [f64; N]) -> Self {
        Vector::from_slice(&elements)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(v: Vector) -> Self {
        v.elements
    }
}

impl From<nalgebra::Vector3<f64>> for Vector {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Vector::xyz(v.x, v.y, v.z)
    }
}

impl TryFrom<&Vector> for nalgebra::Vector3<f64> {
    type Error = GeometryError;

    fn try_from(v: &Vector) -> Result<Self> {
        match v.as_slice() {
            [x, y, z] => Ok(nalgebra::Vector3::new(*x, *y, *z)),
            _ => Err(GeometryError::OrderRequired {
                operation: "conversion to Vector3",
                expected: 3,
                actual: v.len(),
            }),
        }
    }
}

impl Index<usize> for Vector {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        &self.elements[index]
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, scalar: f64) -> Vector {
        self.scale(scalar)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;
    fn mul(self, scalar: f64) -> Vector {
        self.scale(scalar)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e:.2}")?;
        }
        f.write_str("|")
    }
}

//! Loosely typed arguments for the variadic constructors
//!
//! Callers that build vectors and quaternions from dynamic input (scripts,
//! config files, bindings) pass a slice of [`Scalar`]s. Coercion to `f64`
//! happens here, so every constructor reports type errors the same way.

use crate::error::{GeometryError, Result};
use crate::types::Vector;
use std::fmt;

/// A single constructor argument
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    /// Numeric text, parsed on coercion
    Text(String),
    Vector(Vector),
    Nil,
}

impl Scalar {
    /// Name of the argument kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "Integer",
            Scalar::Float(_) => "Float",
            Scalar::Text(_) => "String",
            Scalar::Vector(_) => "Vector",
            Scalar::Nil => "nil",
        }
    }

    /// True for integers and floats
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Float(_))
    }

    /// Coerce to a float.
    ///
    /// Integers widen, text is parsed after trimming whitespace. Text naming
    /// NaN or infinity is rejected. Vectors and nil are type errors.
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Scalar::Int(i) => Ok(*i as f64),
            Scalar::Float(f) => Ok(*f),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(|| GeometryError::InvalidNumber(s.clone())),
            other => Err(GeometryError::TypeMismatch {
                expected: "Float",
                found: other.kind_name(),
            }),
        }
    }

    /// Borrow the vector payload, if any
    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Scalar::Vector(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<Vector> for Scalar {
    fn from(value: Vector) -> Self {
        Scalar::Vector(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Nil, Into::into)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "{s:?}"),
            Scalar::Vector(v) => write!(f, "{v}"),
            Scalar::Nil => f.write_str("nil"),
        }
    }
}

/// Build a `Vec<Scalar>` from heterogeneous values.
///
/// ```
/// use ode_math::{args, Scalar};
/// let a = args![1, 2.5, "3"];
/// assert_eq!(a[0], Scalar::Int(1));
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Scalar>::new() };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Scalar::from($value)),+]
    };
}

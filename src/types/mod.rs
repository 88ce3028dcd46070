//! Core geometry value types

pub mod matrix;
pub mod quaternion;
pub mod rotation;
pub mod scalar;
pub mod vector;

pub use matrix::Matrix4;
pub use quaternion::{Quaternion, QuaternionInit};
pub use rotation::Rotation;
pub use scalar::Scalar;
pub use vector::{Vector, VectorKind};

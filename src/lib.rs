//! # ode-math
//!
//! Vector, quaternion and rotation-matrix types for rigid-body simulation
//! code built around the Open Dynamics Engine.
//!
//! ## Features
//!
//! - Order-N vectors tagged as positions, velocities, forces or torques
//! - Quaternions with axis-angle, two-vector and Euler-angle constructors
//! - Conversion to homogeneous 4x4 matrices and ODE's 3x4 rotation layout
//! - Variadic constructors for dynamic callers, with explicit type,
//!   dimension and arity errors
//! - Configurable handling of zero normalization and gimbal lock
//!
//! ## Quick Start
//!
//! ```rust
//! use ode_math::{Quaternion, Vector};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let q = Quaternion::from_axis_angle(&Vector::xyz(0.0, 0.0, 1.0), FRAC_PI_2)?;
//! let v = q.rotate(&Vector::force(1.0, 0.0, 0.0))?;
//! assert!(v.similar_to(&Vector::force(0.0, 1.0, 0.0)));
//! # Ok::<(), ode_math::GeometryError>(())
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result`]. Nothing is retried and no
//! operation leaves its receiver half-updated on failure.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{GimbalPolicy, MathConfig, ZeroNormalizePolicy};
pub use error::{GeometryError, Result};
pub use types::{Matrix4, Quaternion, QuaternionInit, Rotation, Scalar, Vector, VectorKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

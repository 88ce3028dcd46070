//! Numeric policy configuration
//!
//! Decides how the library treats the degenerate cases plain floating-point
//! arithmetic would otherwise handle silently: normalizing a zero vector and
//! extracting pitch at the gimbal-lock singularity.

use crate::error::{GeometryError, Result};
use std::str::FromStr;

/// Default absolute per-element tolerance for approximate comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Environment variable overriding [`MathConfig::tolerance`].
pub const ENV_TOLERANCE: &str = "ODE_MATH_TOLERANCE";
/// Environment variable overriding [`MathConfig::zero_normalize`].
pub const ENV_ZERO_NORMALIZE: &str = "ODE_MATH_ZERO_NORMALIZE";
/// Environment variable overriding [`MathConfig::gimbal`].
pub const ENV_GIMBAL: &str = "ODE_MATH_GIMBAL";

/// What to do when asked to normalize or invert a zero-magnitude value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroNormalizePolicy {
    /// Return [`GeometryError::ZeroMagnitude`]
    #[default]
    Fail,
    /// Return the zero value unchanged
    Zero,
    /// Divide anyway and let NaN propagate
    Propagate,
}

/// What to do when pitch extraction leaves the domain of `asin`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GimbalPolicy {
    /// Clamp the argument into [-1, 1]
    #[default]
    Clamp,
    /// Return NaN
    Propagate,
    /// Return [`GeometryError::Domain`]
    Fail,
}

impl FromStr for ZeroNormalizePolicy {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "zero" => Ok(Self::Zero),
            "propagate" | "nan" => Ok(Self::Propagate),
            _ => Err(GeometryError::InvalidConfig {
                key: ENV_ZERO_NORMALIZE,
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for GimbalPolicy {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "propagate" | "nan" => Ok(Self::Propagate),
            "fail" => Ok(Self::Fail),
            _ => Err(GeometryError::InvalidConfig {
                key: ENV_GIMBAL,
                value: s.to_string(),
            }),
        }
    }
}

/// Numeric policy shared by vector and quaternion operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathConfig {
    /// Absolute per-element tolerance used by `similar_to` and `is_unit`
    pub tolerance: f64,
    /// Zero-magnitude normalization handling
    pub zero_normalize: ZeroNormalizePolicy,
    /// Pitch extraction handling at gimbal lock
    pub gimbal: GimbalPolicy,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            zero_normalize: ZeroNormalizePolicy::default(),
            gimbal: GimbalPolicy::default(),
        }
    }
}

impl MathConfig {
    /// Create a configuration with default policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the zero-normalization policy
    pub fn with_zero_normalize(mut self, policy: ZeroNormalizePolicy) -> Self {
        self.zero_normalize = policy;
        self
    }

    /// Set the gimbal-lock policy
    pub fn with_gimbal(mut self, policy: GimbalPolicy) -> Self {
        self.gimbal = policy;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ODE_MATH_TOLERANCE`: positive float (default: `1e-10`)
    /// - `ODE_MATH_ZERO_NORMALIZE`: `fail`, `zero` or `propagate` (default: `fail`)
    /// - `ODE_MATH_GIMBAL`: `clamp`, `propagate` or `fail` (default: `clamp`)
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] if a variable is set but malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TOLERANCE) {
            let tolerance = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t > 0.0)
                .ok_or_else(|| GeometryError::InvalidConfig {
                    key: ENV_TOLERANCE,
                    value: raw.clone(),
                })?;
            config.tolerance = tolerance;
        }
        if let Some(raw) = lookup(ENV_ZERO_NORMALIZE) {
            config.zero_normalize = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_GIMBAL) {
            config.gimbal = raw.parse()?;
        }

        tracing::debug!(?config, "loaded math configuration");
        Ok(config)
    }
}

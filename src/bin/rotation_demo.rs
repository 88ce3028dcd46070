//! Demo: build a rotation from Euler angles and push a force through it.
//!
//! Usage: cargo run --bin rotation_demo [phi theta psi]
//!
//! Set `RUST_LOG=debug` to see normalization and clamping decisions.
//! Numeric policies come from `ODE_MATH_*` environment variables.

use anyhow::{Context, Result};
use ode_math::{MathConfig, Quaternion, Rotation, Scalar, Vector};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = MathConfig::from_env().context("reading ODE_MATH_* configuration")?;
    info!(?config, "numeric policy");

    let args: Vec<Scalar> = std::env::args().skip(1).map(Scalar::from).collect();
    let args = if args.is_empty() {
        vec![Scalar::from(0.2), Scalar::from(0.4), Scalar::from(2.3)]
    } else {
        args
    };

    let rotation = Rotation::from_args(&args).context("building rotation")?;
    for (i, row) in rotation.to_matrix().iter().enumerate() {
        info!("R[{i}] = {:>8.4} {:>8.4} {:>8.4} {:>8.4}", row[0], row[1], row[2], row[3]);
    }

    let q = rotation.to_quaternion();
    info!(%q, magnitude = q.magnitude(), "as quaternion");
    info!(
        roll = q.roll(),
        pitch = q.pitch_with(&config)?,
        yaw = q.yaw(),
        "euler angles"
    );

    let back = Rotation::from_quaternion(&q)?;
    let drift = rotation
        .to_matrix()
        .iter()
        .flatten()
        .zip(back.to_matrix().iter().flatten())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    info!(drift, "matrix -> quaternion -> matrix");

    let force = Vector::force(1.0, 0.0, 0.0);
    let by_quaternion = q.rotate(&force)?;
    let by_matrix = rotation.transform(&force)?;
    info!(%force, %by_quaternion, %by_matrix, "rotated force");

    let spin = Quaternion::from_vectors(&force, &by_quaternion)?;
    info!(axis = %spin.axis(), angle = spin.angle(), "shortest arc back to the input");

    Ok(())
}

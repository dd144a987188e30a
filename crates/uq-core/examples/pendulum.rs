//! Estimate g from a pendulum: g = 4π² L / T².
//!
//! Run with `cargo run -p uq-core --example pendulum`.

use std::f64::consts::PI;

use tracing::{error, info};
use uq_core::{Propagator, UncertainQuantity, UqResult};

fn main() -> UqResult<()> {
    tracing_subscriber::fmt::init();

    let length = UncertainQuantity::new(0.995, 0.002);
    let period = UncertainQuantity::new(2.002, 0.01);

    let g = 4.0 * PI.powi(2) * length / period.pow(2.0);
    info!(%g, percent = g.percent_uncertainty(), "gravitational acceleration (m/s²)");
    println!("g = {g:.3} m/s² ({:.2}%)", g.percent_uncertainty());

    let theta = UncertainQuantity::new(0.1, 0.005);
    let amplitude = length * theta.sin();
    info!(%amplitude, "horizontal amplitude (m)");

    // The strict propagator refuses a division by a zero-valued reading.
    let strict = Propagator::strict();
    let stopped = UncertainQuantity::new(0.0, 0.01);
    match strict.div(length, stopped) {
        Ok(q) => info!(%q, "unexpected result"),
        Err(err) => error!(%err, "rejected"),
    }

    let checked = strict.div(strict.mul(length, 4.0 * PI.powi(2))?, strict.pow(period, 2.0)?)?;
    println!("g (checked) = {checked:.3} m/s²");
    Ok(())
}

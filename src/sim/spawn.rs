//! Seeded launch states
//!
//! Same seed, same launch, on every platform.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{BallState, Bounds};
use crate::config::SimulationConfig;
use crate::consts::MAX_LAUNCH_SPEED;

/// A random state inside the box with speed components up to [`MAX_LAUNCH_SPEED`]
pub fn random_launch(seed: u64, config: &SimulationConfig) -> BallState {
    let mut rng = Pcg32::seed_from_u64(seed);
    let bounds = Bounds::from_config(config);

    let x = rng.random_range(bounds.min_x..=bounds.max_x.max(bounds.min_x));
    let y = rng.random_range(bounds.min_y..=bounds.max_y.max(bounds.min_y));
    let vx = rng.random_range(-MAX_LAUNCH_SPEED..=MAX_LAUNCH_SPEED);
    let vy = rng.random_range(-MAX_LAUNCH_SPEED..=MAX_LAUNCH_SPEED);

    log::debug!("Launch from seed {seed}: ({x:.1}, {y:.1}) v=({vx:.1}, {vy:.1})");
    BallState::new(x, y, vx, vy)
}

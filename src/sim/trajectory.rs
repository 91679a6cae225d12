//! Fixed-interval sampling of a trajectory
//!
//! The rendered path and the animated ball both step in whole
//! `time_step` increments, so the ball always sits on the drawn path.

use super::state::BallState;
use super::tick::step;
use crate::config::SimulationConfig;

/// The initial state followed by `sample_count` states, one `time_step` apart
pub fn sample_trajectory(
    initial: BallState,
    config: &SimulationConfig,
    sample_count: usize,
) -> Vec<BallState> {
    let mut states = Vec::with_capacity(sample_count + 1);
    states.push(initial);

    let mut state = initial;
    for _ in 0..sample_count {
        state = step(state, config.time_step, config);
        states.push(state);
    }

    log::debug!(
        "Sampled {} states over {:.2}s",
        states.len(),
        sample_count as f64 * config.time_step
    );
    states
}

/// One full period of the path
pub fn sample_period(initial: BallState, config: &SimulationConfig) -> Vec<BallState> {
    sample_trajectory(initial, config, config.sample_count())
}

/// State `target_time` seconds after `state`
///
/// Whole steps first, then one partial step for the remainder.
pub fn advance_to_time(state: BallState, target_time: f64, config: &SimulationConfig) -> BallState {
    if !(target_time > 0.0 && target_time.is_finite()) {
        return state;
    }

    let time_step = config.time_step;
    if time_step <= 0.0 {
        return step(state, target_time, config);
    }

    let whole = (target_time / time_step).floor();
    let remainder = (target_time - whole * time_step).max(0.0);

    let mut state = state;
    for _ in 0..whole as u64 {
        state = step(state, time_step, config);
    }
    step(state, remainder, config)
}

/// State at a wall-clock time, looping every `period` seconds
pub fn state_at_clock(initial: BallState, wall_clock: f64, config: &SimulationConfig) -> BallState {
    if config.period <= 0.0 || !wall_clock.is_finite() {
        return initial;
    }
    advance_to_time(initial, wall_clock.rem_euclid(config.period), config)
}

//! Closed-form motion under constant gravity
//!
//! No boundary handling here; the step driver only calls this for spans it
//! has already checked are collision-free (or ends exactly at a collision).

use glam::DVec2;

use super::state::BallState;

/// Advance `state` by `dt` seconds of free flight
#[inline]
pub fn advance(state: BallState, dt: f64, gravity: f64) -> BallState {
    let accel = DVec2::new(0.0, gravity);
    let pos = state.pos() + state.vel() * dt + 0.5 * accel * dt * dt;
    let vel = state.vel() + accel * dt;
    BallState::from_vectors(pos, vel)
}

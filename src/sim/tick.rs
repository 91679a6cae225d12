//! Event-accurate step driver
//!
//! Advances a state by a macroscopic delta. Every boundary crossing inside
//! the delta is resolved at its own analytic time, then integration resumes
//! from the reflected state for whatever time is left.

use serde::Serialize;

use super::ballistic::advance;
use super::collision::{detect, detect_resting};
use super::response::{clamp_into, resolve_contact, respond};
use super::state::{BallState, BoundaryKind, Bounds};
use crate::config::SimulationConfig;
use crate::consts::MAX_COLLISIONS_PER_STEP;

/// One collision resolved during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedCollision {
    /// Seconds since the start of the step
    pub at: f64,
    pub kind: BoundaryKind,
    /// State at the instant of impact
    pub before: BallState,
    /// Reflected state
    pub after: BallState,
}

/// Result of a step plus what happened along the way
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepTrace {
    pub state: BallState,
    pub collisions: Vec<ResolvedCollision>,
    /// Collision cap hit; the tail was integrated collision-free and clamped
    pub capped: bool,
}

/// Advance `state` by `dt` seconds
pub fn step(state: BallState, dt: f64, config: &SimulationConfig) -> BallState {
    step_traced(state, dt, config).state
}

/// [`step`], also reporting every resolved collision
pub fn step_traced(state: BallState, dt: f64, config: &SimulationConfig) -> StepTrace {
    let mut trace = StepTrace {
        state,
        collisions: Vec::new(),
        capped: false,
    };
    // dt == 0 is the identity; negative or non-finite deltas are not steps
    if !(dt > 0.0 && dt.is_finite()) {
        return trace;
    }

    // Geometry is fixed for the whole step
    let bounds = Bounds::from_config(config);
    let gravity = config.gravity;

    let mut current = state;
    let mut remaining = dt;
    let mut elapsed = 0.0;

    loop {
        let resting = bounds.is_resting(&current, gravity);
        let effective_gravity = if resting { 0.0 } else { gravity };
        if let Some(side) = Bounds::gravity_side(gravity).filter(|_| resting) {
            current.y = bounds.coordinate(side);
        }

        if trace.collisions.len() >= MAX_COLLISIONS_PER_STEP as usize {
            log::warn!(
                "Collision cap ({MAX_COLLISIONS_PER_STEP}) reached with {remaining:.3e}s left; integrating without collisions"
            );
            current = clamp_into(advance(current, remaining, effective_gravity), &bounds);
            trace.capped = true;
            break;
        }

        if let Some((kind, after)) = resolve_contact(&current, &bounds, config) {
            log::trace!("{kind:?} contact at {elapsed:.6}s, reflecting outward motion");
            trace.collisions.push(ResolvedCollision {
                at: elapsed,
                kind,
                before: current,
                after,
            });
            current = after;
            continue;
        }

        let event = if resting {
            detect_resting(&current, remaining, &bounds)
        } else {
            detect(&current, remaining, &bounds, gravity)
        };
        let Some(event) = event else {
            current = advance(current, remaining, effective_gravity);
            break;
        };

        let before = advance(current, event.time, effective_gravity);
        let after = respond(before, &event, &bounds, config);
        elapsed += event.time;
        log::trace!(
            "{:?} hit at {elapsed:.6}s: v ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            event.kind,
            before.vx,
            before.vy,
            after.vx,
            after.vy
        );

        trace.collisions.push(ResolvedCollision {
            at: elapsed,
            kind: event.kind,
            before,
            after,
        });
        current = after;
        remaining -= event.time;
    }

    debug_assert!(current.is_finite(), "non-finite state {current:?}");
    trace.state = current;
    trace
}

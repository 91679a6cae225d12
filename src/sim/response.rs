//! Collision response
//!
//! Turns the state at the instant of impact into the reflected state,
//! applying bounce damping and the configured resting policy.

use super::state::{BallState, BoundaryEvent, BoundaryKind, Bounds};
use crate::config::{RestingPolicy, SimulationConfig};
use crate::consts::{CONTACT_EPSILON, WALL_DISTANCE_DECIMALS};
use crate::reduce_precision;

/// Reflect `at_hit` off the boundary named by `event`
///
/// `at_hit` must be the collision-free state advanced to `event.time`.
/// The coordinate normal to the boundary is pinned to the boundary itself
/// so rounding residue never leaves the ball outside the box.
pub fn respond(
    at_hit: BallState,
    event: &BoundaryEvent,
    bounds: &Bounds,
    config: &SimulationConfig,
) -> BallState {
    reflect(at_hit, event.kind, event.time, bounds, config)
}

/// Reflect a ball that starts a sub-step on a boundary moving out of the box
///
/// Its crossing root is `t = 0`, which detection never reports, so it is
/// resolved here before detection runs.
pub fn resolve_contact(
    state: &BallState,
    bounds: &Bounds,
    config: &SimulationConfig,
) -> Option<(BoundaryKind, BallState)> {
    let kind = BoundaryKind::ALL.into_iter().find(|&kind| {
        let boundary = bounds.coordinate(kind);
        match kind {
            BoundaryKind::LeftWall => on_wall(state.x, boundary) && state.vx < 0.0,
            BoundaryKind::RightWall => on_wall(state.x, boundary) && state.vx > 0.0,
            BoundaryKind::Floor => on_line(state.y, boundary) && state.vy > 0.0,
            BoundaryKind::Ceiling => on_line(state.y, boundary) && state.vy < 0.0,
        }
    })?;
    Some((kind, reflect(*state, kind, 0.0, bounds, config)))
}

#[inline]
fn on_wall(x: f64, wall: f64) -> bool {
    reduce_precision(wall - x, WALL_DISTANCE_DECIMALS) == 0.0
}

#[inline]
fn on_line(y: f64, line: f64) -> bool {
    (y - line).abs() <= CONTACT_EPSILON
}

/// `since_start` is the time from the start of the sub-step to the impact
fn reflect(
    at_hit: BallState,
    kind: BoundaryKind,
    since_start: f64,
    bounds: &Bounds,
    config: &SimulationConfig,
) -> BallState {
    let boundary = bounds.coordinate(kind);
    let damping = config.bounce_damping;

    if kind.is_wall() {
        return BallState {
            x: boundary,
            vx: -damping * at_hit.vx,
            ..at_hit
        };
    }

    let incoming = at_hit.vy;
    let mut vy = -damping * incoming;

    match config.resting {
        RestingPolicy::SnapToRest { decimals } => {
            if reduce_precision(vy, decimals) == 0.0 {
                vy = 0.0;
            }
        }
        RestingPolicy::ClampAndSettle {
            time_epsilon,
            speed_threshold,
        } => {
            let pressed = Bounds::gravity_side(config.gravity) == Some(kind);
            if pressed && since_start < time_epsilon && incoming.abs() < speed_threshold {
                log::trace!("Settling on {kind:?} (t={since_start:.2e}, vy={incoming:.3})");
                vy = 0.0;
            }
        }
    }

    BallState {
        y: boundary,
        vy,
        ..at_hit
    }
}

/// Pull a state back inside `bounds`, zeroing velocity that points out of
/// any side it was clamped against
pub fn clamp_into(state: BallState, bounds: &Bounds) -> BallState {
    let pos = bounds.clamp(state.pos());
    let mut clamped = BallState {
        x: pos.x,
        y: pos.y,
        ..state
    };

    if (pos.x == bounds.min_x && clamped.vx < 0.0) || (pos.x == bounds.max_x && clamped.vx > 0.0) {
        clamped.vx = 0.0;
    }
    if (pos.y == bounds.min_y && clamped.vy < 0.0) || (pos.y == bounds.max_y && clamped.vy > 0.0) {
        clamped.vy = 0.0;
    }
    clamped
}

/// Normal velocity component for a boundary kind
#[inline]
pub fn normal_speed(state: &BallState, kind: BoundaryKind) -> f64 {
    if kind.is_wall() { state.vx.abs() } else { state.vy.abs() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn bounds() -> Bounds {
        Bounds {
            min_x: 10.0,
            max_x: 90.0,
            min_y: 10.0,
            max_y: 90.0,
        }
    }

    fn event(kind: BoundaryKind, time: f64) -> BoundaryEvent {
        BoundaryEvent { time, kind }
    }

    #[test]
    fn test_wall_bounce() {
        let config = SimulationConfig {
            bounce_damping: 0.8,
            ..Default::default()
        };
        let at_hit = BallState::new(90.0000000001, 40.0, 100.0, 7.0);
        let out = respond(at_hit, &event(BoundaryKind::RightWall, 0.4), &bounds(), &config);
        assert_eq!(out, BallState::new(90.0, 40.0, -80.0, 7.0));
    }

    #[test]
    fn test_floor_bounce_damps_vy() {
        let config = SimulationConfig::default();
        let at_hit = BallState::new(50.0, 89.9999999, 12.0, 500.0);
        let out = respond(at_hit, &event(BoundaryKind::Floor, 0.1), &bounds(), &config);
        assert_eq!(out.y, 90.0);
        assert_eq!(out.vx, 12.0);
        assert!((out.vy + 400.0).abs() < 1e-9);
        assert!((normal_speed(&out, BoundaryKind::Floor) - 0.8 * 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_to_rest() {
        let config = SimulationConfig::default();
        let at_hit = BallState::new(50.0, 90.0, 0.0, 0.0006);
        // -0.00048 rounds to -0.000 at 3 decimals
        let out = respond(at_hit, &event(BoundaryKind::Floor, 0.1), &bounds(), &config);
        assert_eq!(out.vy, 0.0);

        let at_hit = BallState::new(50.0, 90.0, 0.0, 0.01);
        let out = respond(at_hit, &event(BoundaryKind::Floor, 0.1), &bounds(), &config);
        assert!((out.vy + 0.008).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_and_settle() {
        let config = SimulationConfig::default().with_resting(RestingPolicy::ClampAndSettle {
            time_epsilon: SETTLE_TIME_EPSILON,
            speed_threshold: SETTLE_SPEED_THRESHOLD,
        });
        let at_hit = BallState::new(50.0, 90.0, 3.0, 1.0);

        // Quick, slow impact: settles
        let out = respond(at_hit, &event(BoundaryKind::Floor, 0.0005), &bounds(), &config);
        assert_eq!(out.vy, 0.0);
        assert_eq!(out.vx, 3.0);

        // Too much time since the sub-step began: bounces
        let out = respond(at_hit, &event(BoundaryKind::Floor, 0.01), &bounds(), &config);
        assert!((out.vy + 0.8).abs() < 1e-12);

        // Too fast: bounces
        let fast = BallState { vy: 5.0, ..at_hit };
        let out = respond(fast, &event(BoundaryKind::Floor, 0.0005), &bounds(), &config);
        assert!((out.vy + 4.0).abs() < 1e-12);

        // Ceiling with gravity pulling away: bounces
        let up = BallState::new(50.0, 10.0, 0.0, -1.0);
        let out = respond(up, &event(BoundaryKind::Ceiling, 0.0005), &bounds(), &config);
        assert!((out.vy - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_contact_moving_out_is_reflected() {
        let config = SimulationConfig::default();
        let on_right = BallState::new(90.0, 50.0, 100.0, 0.0);
        let (kind, out) = resolve_contact(&on_right, &bounds(), &config).unwrap();
        assert_eq!(kind, BoundaryKind::RightWall);
        assert_eq!(out, BallState::new(90.0, 50.0, -80.0, 0.0));

        // A rounding error past the floor, still sinking
        let sinking = BallState::new(50.0, 90.0 + 1e-12, 0.0, 200.0);
        let (kind, out) = resolve_contact(&sinking, &bounds(), &config).unwrap();
        assert_eq!(kind, BoundaryKind::Floor);
        assert_eq!(out.y, 90.0);
        assert!((out.vy + 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_contact_moving_in_is_ignored() {
        let config = SimulationConfig::default();
        let leaving = BallState::new(90.0, 90.0, -100.0, -5.0);
        assert!(resolve_contact(&leaving, &bounds(), &config).is_none());
        let inside = BallState::new(50.0, 50.0, 100.0, 100.0);
        assert!(resolve_contact(&inside, &bounds(), &config).is_none());
    }

    #[test]
    fn test_clamp_into() {
        let out = clamp_into(BallState::new(120.0, 95.0, 10.0, 20.0), &bounds());
        assert_eq!(out, BallState::new(90.0, 90.0, 0.0, 0.0));

        let inward = clamp_into(BallState::new(5.0, 50.0, 10.0, -3.0), &bounds());
        assert_eq!(inward, BallState::new(10.0, 50.0, 10.0, -3.0));
    }
}

//! Boundary collision detection
//!
//! Finds the earliest analytic crossing of the four box boundaries within a
//! time budget. Walls move linearly; floor and ceiling follow the parabola,
//! which can cross a horizontal line twice, so both roots are candidates.

use super::roots::{linear_crossing_time, vertical_crossing_times};
use super::state::{BallState, BoundaryEvent, BoundaryKind, Bounds};

/// All crossing times for one boundary, unfiltered
fn crossing_times(
    state: &BallState,
    kind: BoundaryKind,
    bounds: &Bounds,
    gravity: f64,
) -> impl Iterator<Item = f64> {
    let target = bounds.coordinate(kind);
    let (linear, vertical) = if kind.is_wall() {
        (linear_crossing_time(state.x, state.vx, target), None)
    } else {
        (
            None,
            Some(vertical_crossing_times(state.y, state.vy, gravity, target)),
        )
    };
    linear
        .into_iter()
        .chain(vertical.into_iter().flat_map(|roots| roots.iter()))
}

/// Earliest crossing in `(0, dt]`, if any
///
/// Exact ties resolve in [`BoundaryKind`] order (left, right, floor, ceiling).
pub fn detect(state: &BallState, dt: f64, bounds: &Bounds, gravity: f64) -> Option<BoundaryEvent> {
    let mut earliest: Option<BoundaryEvent> = None;

    for kind in BoundaryKind::ALL {
        for time in crossing_times(state, kind, bounds, gravity) {
            if !time.is_finite() || time <= 0.0 || time > dt {
                continue;
            }
            // Strict comparison keeps the earlier kind on ties
            if earliest.is_none_or(|e| time < e.time) {
                earliest = Some(BoundaryEvent { time, kind });
            }
        }
    }

    earliest
}

/// Detection for a ball resting on the boundary gravity presses into
///
/// Vertical motion is carried by the contact, so only walls can be hit.
pub fn detect_resting(state: &BallState, dt: f64, bounds: &Bounds) -> Option<BoundaryEvent> {
    let held = BallState { vy: 0.0, ..*state };
    detect(&held, dt, bounds, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_bounds(width: f64, height: f64, radius: f64) -> Bounds {
        Bounds {
            min_x: radius,
            max_x: width - radius,
            min_y: radius,
            max_y: height - radius,
        }
    }

    #[test]
    fn test_right_wall_hit() {
        let bounds = box_bounds(100.0, 100.0, 10.0);
        let state = BallState::new(50.0, 50.0, 100.0, 0.0);
        let event = detect(&state, 1.0, &bounds, 0.0).unwrap();
        assert_eq!(event.kind, BoundaryKind::RightWall);
        assert!((event.time - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_hit_beyond_budget_is_ignored() {
        let bounds = box_bounds(100.0, 100.0, 10.0);
        let state = BallState::new(50.0, 50.0, 100.0, 0.0);
        assert!(detect(&state, 0.39, &bounds, 0.0).is_none());
        // Budget is inclusive
        assert!(detect(&state, 0.4, &bounds, 0.0).is_some());
    }

    #[test]
    fn test_floor_hit_under_gravity() {
        // 1500 below the floor line at g = 3000 from rest: t = 1
        let bounds = box_bounds(100.0, 1600.0, 10.0);
        let state = BallState::new(50.0, 90.0, 0.0, 0.0);
        let event = detect(&state, 2.0, &bounds, 3000.0).unwrap();
        assert_eq!(event.kind, BoundaryKind::Floor);
        assert!((event.time - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ceiling_uses_first_crossing() {
        // Moving up fast enough to pass the ceiling line: the earlier root wins
        let bounds = box_bounds(100.0, 1000.0, 10.0);
        let state = BallState::new(50.0, 310.0, 0.0, -1000.0);
        let event = detect(&state, 1.0, &bounds, 1000.0).unwrap();
        assert_eq!(event.kind, BoundaryKind::Ceiling);
        // 500 t² - 1000 t + 300 = 0 → t = 1 - sqrt(0.4)
        let expected = 1.0 - 0.4f64.sqrt();
        assert!((event.time - expected).abs() < 1e-12);
    }

    #[test]
    fn test_departing_contact_is_not_a_hit() {
        // On the floor, moving up: root t = 0 is excluded, the return is found
        let bounds = box_bounds(100.0, 100.0, 10.0);
        let state = BallState::new(50.0, 90.0, 0.0, -30.0);
        let event = detect(&state, 1.0, &bounds, 3000.0).unwrap();
        assert_eq!(event.kind, BoundaryKind::Floor);
        assert!((event.time - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_corner_tie_prefers_wall() {
        let bounds = box_bounds(100.0, 100.0, 10.0);
        let state = BallState::new(50.0, 50.0, 100.0, 100.0);
        let event = detect(&state, 1.0, &bounds, 0.0).unwrap();
        assert_eq!(event.kind, BoundaryKind::RightWall);
        assert!((event.time - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_no_motion_no_event() {
        let bounds = box_bounds(100.0, 100.0, 10.0);
        let state = BallState::new(50.0, 50.0, 0.0, 0.0);
        assert!(detect(&state, 10.0, &bounds, 0.0).is_none());
    }

    #[test]
    fn test_resting_detection_ignores_gravity() {
        let bounds = box_bounds(100.0, 100.0, 10.0);
        let state = BallState::new(50.0, 90.0, -100.0, 0.0);
        let event = detect_resting(&state, 1.0, &bounds).unwrap();
        assert_eq!(event.kind, BoundaryKind::LeftWall);
        assert!((event.time - 0.4).abs() < 1e-12);

        let still = BallState::new(50.0, 90.0, 0.0, 0.0);
        assert!(detect_resting(&still, 1.0, &bounds).is_none());
    }
}

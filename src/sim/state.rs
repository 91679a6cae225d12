//! Ball state and boundary types
//!
//! Everything a caller threads through successive steps lives here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::consts::CONTACT_EPSILON;

/// Launch state of the sketch before the user drags anything
pub const DEFAULT_INITIAL: BallState = BallState::new(200.0, 100.0, -500.0, 1.0);

/// Position and velocity of the ball's center
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl BallState {
    pub const fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self { x, y, vx, vy }
    }

    pub fn from_vectors(pos: DVec2, vel: DVec2) -> Self {
        Self::new(pos.x, pos.y, vel.x, vel.y)
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn vel(&self) -> DVec2 {
        DVec2::new(self.vx, self.vy)
    }

    pub fn is_finite(&self) -> bool {
        self.pos().is_finite() && self.vel().is_finite()
    }

    /// Flattened `[x, y, vx, vy]`, the shape the host consumes
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.vx, self.vy]
    }
}

/// Which side of the box was struck
///
/// Variant order is the tie-break order for simultaneous crossings.
/// It is an enumeration convention, not a physical rule for corner hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// `x = min_x`
    LeftWall,
    /// `x = max_x`
    RightWall,
    /// `y = max_y` (y grows downward)
    Floor,
    /// `y = min_y`
    Ceiling,
}

impl BoundaryKind {
    pub const ALL: [BoundaryKind; 4] = [
        BoundaryKind::LeftWall,
        BoundaryKind::RightWall,
        BoundaryKind::Floor,
        BoundaryKind::Ceiling,
    ];

    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, BoundaryKind::LeftWall | BoundaryKind::RightWall)
    }
}

/// A boundary crossing, `time` seconds after the start of the current sub-step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEvent {
    pub time: f64,
    pub kind: BoundaryKind,
}

/// Region the ball's center is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let r = config.ball_radius;
        Self {
            min_x: r,
            max_x: config.box_width - r,
            min_y: r,
            max_y: config.box_height - r,
        }
    }

    /// Coordinate of a boundary along its normal axis
    pub fn coordinate(&self, kind: BoundaryKind) -> f64 {
        match kind {
            BoundaryKind::LeftWall => self.min_x,
            BoundaryKind::RightWall => self.max_x,
            BoundaryKind::Floor => self.max_y,
            BoundaryKind::Ceiling => self.min_y,
        }
    }

    pub fn contains(&self, pos: DVec2, tolerance: f64) -> bool {
        pos.x >= self.min_x - tolerance
            && pos.x <= self.max_x + tolerance
            && pos.y >= self.min_y - tolerance
            && pos.y <= self.max_y + tolerance
    }

    pub fn clamp(&self, pos: DVec2) -> DVec2 {
        DVec2::new(
            pos.x.clamp(self.min_x, self.max_x.max(self.min_x)),
            pos.y.clamp(self.min_y, self.max_y.max(self.min_y)),
        )
    }

    /// The horizontal boundary gravity presses the ball into, if any
    pub fn gravity_side(gravity: f64) -> Option<BoundaryKind> {
        if gravity > 0.0 {
            Some(BoundaryKind::Floor)
        } else if gravity < 0.0 {
            Some(BoundaryKind::Ceiling)
        } else {
            None
        }
    }

    /// Ball sits on the boundary gravity presses into with no vertical speed
    pub fn is_resting(&self, state: &BallState, gravity: f64) -> bool {
        match Self::gravity_side(gravity) {
            Some(kind) => {
                state.vy == 0.0 && (state.y - self.coordinate(kind)).abs() <= CONTACT_EPSILON
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_config() {
        let config = SimulationConfig::default().resized(300.0, 200.0);
        let bounds = Bounds::from_config(&config);
        assert_eq!(bounds.min_x, 40.0);
        assert_eq!(bounds.max_x, 260.0);
        assert_eq!(bounds.min_y, 40.0);
        assert_eq!(bounds.max_y, 160.0);
        assert_eq!(bounds.coordinate(BoundaryKind::Floor), 160.0);
        assert_eq!(bounds.coordinate(BoundaryKind::Ceiling), 40.0);
    }

    #[test]
    fn test_bounds_clamp_and_contains() {
        let bounds = Bounds {
            min_x: 10.0,
            max_x: 90.0,
            min_y: 10.0,
            max_y: 90.0,
        };
        assert!(bounds.contains(DVec2::new(50.0, 90.0), 0.0));
        assert!(!bounds.contains(DVec2::new(50.0, 90.1), 0.0));
        assert_eq!(
            bounds.clamp(DVec2::new(-5.0, 120.0)),
            DVec2::new(10.0, 90.0)
        );
    }

    #[test]
    fn test_resting_requires_gravity_side() {
        let bounds = Bounds {
            min_x: 10.0,
            max_x: 90.0,
            min_y: 10.0,
            max_y: 90.0,
        };
        let on_floor = BallState::new(50.0, 90.0, 30.0, 0.0);
        assert!(bounds.is_resting(&on_floor, 3000.0));
        assert!(!bounds.is_resting(&on_floor, -3000.0));
        assert!(!bounds.is_resting(&on_floor, 0.0));

        let on_ceiling = BallState::new(50.0, 10.0, 0.0, 0.0);
        assert!(bounds.is_resting(&on_ceiling, -3000.0));

        let moving = BallState::new(50.0, 90.0, 0.0, -1.0);
        assert!(!bounds.is_resting(&moving, 3000.0));
    }

    #[test]
    fn test_tie_break_order() {
        let mut kinds = BoundaryKind::ALL;
        kinds.reverse();
        kinds.sort();
        assert_eq!(kinds, BoundaryKind::ALL);
    }
}

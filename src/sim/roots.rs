//! Crossing-time solvers
//!
//! Times at which a linear or quadratic trajectory reaches a target
//! coordinate. Callers filter the results to their time window.

use crate::consts::WALL_DISTANCE_DECIMALS;
use crate::reduce_precision;

/// Real roots of a quadratic, unordered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roots {
    None,
    One(f64),
    Two(f64, f64),
}

impl Roots {
    fn from_candidates(a: f64, b: f64) -> Self {
        match (a.is_finite(), b.is_finite()) {
            (true, true) => Roots::Two(a, b),
            (true, false) => Roots::One(a),
            (false, true) => Roots::One(b),
            (false, false) => Roots::None,
        }
    }

    fn single(t: f64) -> Self {
        if t.is_finite() { Roots::One(t) } else { Roots::None }
    }

    pub fn iter(self) -> impl Iterator<Item = f64> {
        let (first, second) = match self {
            Roots::None => (None, None),
            Roots::One(t) => (Some(t), None),
            Roots::Two(t1, t2) => (Some(t1), Some(t2)),
        };
        first.into_iter().chain(second)
    }

    pub fn len(&self) -> usize {
        match self {
            Roots::None => 0,
            Roots::One(_) => 1,
            Roots::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Roots::None)
    }
}

/// Time for `position + velocity * t` to reach `target`
///
/// The distance is rounded to a fixed number of decimals before dividing.
/// Without that, a ball parked a rounding error away from a wall can miss
/// its crossing inside the step and tunnel through on the next one.
pub fn linear_crossing_time(position: f64, velocity: f64, target: f64) -> Option<f64> {
    if velocity == 0.0 {
        return None;
    }
    let t = reduce_precision(target - position, WALL_DISTANCE_DECIMALS) / velocity;
    t.is_finite().then_some(t)
}

/// Solve `a·t² + b·t + c = 0`
///
/// `a == 0` falls back to the linear solution so a gravity-free ball still
/// meets the floor and ceiling.
/// Roots come from the cancellation-free form `q / a` and `c / q`.
pub fn quadratic_crossing_times(a: f64, b: f64, c: f64) -> Roots {
    if a == 0.0 {
        if b == 0.0 {
            return Roots::None;
        }
        return Roots::single(-c / b);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || discriminant.is_nan() {
        return Roots::None;
    }
    if discriminant == 0.0 {
        return Roots::single(-b / (2.0 * a));
    }

    let sqrt_d = discriminant.sqrt();
    let q = -0.5 * (b + sqrt_d.copysign(b));
    Roots::from_candidates(q / a, c / q)
}

/// Times for vertical motion under `gravity` to reach `target`
#[inline]
pub fn vertical_crossing_times(y: f64, vy: f64, gravity: f64, target: f64) -> Roots {
    quadratic_crossing_times(0.5 * gravity, vy, y - target)
}

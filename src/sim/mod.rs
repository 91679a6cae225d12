//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Every operation maps `(state, ...)` to a new state
//! - Collisions are resolved at their analytic times, never by overlap
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ballistic;
pub mod collision;
pub mod response;
pub mod roots;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use ballistic::advance;
pub use collision::detect;
pub use response::respond;
pub use roots::{Roots, linear_crossing_time, quadratic_crossing_times};
pub use spawn::random_launch;
pub use state::{BallState, BoundaryEvent, BoundaryKind, Bounds, DEFAULT_INITIAL};
pub use tick::{ResolvedCollision, StepTrace, step, step_traced};
pub use trajectory::{advance_to_time, sample_period, sample_trajectory, state_at_clock};

//! Bouncing Ball - event-accurate 2D ball simulation for a canvas sketch
//!
//! Core modules:
//! - `sim`: Deterministic simulation (root solving, collisions, stepping, sampling)
//! - `config`: Simulation parameters and resting policies
//! - `platform`: Browser host bindings (wasm32 only)

pub mod config;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, RestingPolicy, SimulationConfig};
pub use sim::{
    BallState, BoundaryEvent, BoundaryKind, Bounds, advance_to_time, sample_trajectory,
    state_at_clock, step,
};

/// Simulation constants
pub mod consts {
    /// Gravity in pixels/s², positive = down
    pub const GRAVITY: f64 = 3000.0;
    /// Length of one loop of the sampled path (seconds)
    pub const SIMULATION_PERIOD: f64 = 3.5;
    /// Fixed sampling interval (seconds)
    pub const TIME_STEP: f64 = 0.13;
    /// Ball radius
    pub const BALL_RADIUS: f64 = 40.0;
    /// Velocity scale applied to the normal component on bounce
    pub const BOUNCE_DAMPING: f64 = 0.8;

    /// Box dimensions until the host reports a real size
    pub const BOX_WIDTH: f64 = 100.0;
    pub const BOX_HEIGHT: f64 = 100.0;

    /// Maximum collisions resolved inside one step before falling back to
    /// collision-free integration
    pub const MAX_COLLISIONS_PER_STEP: u32 = 128;

    /// Decimal digits kept on the wall-distance numerator
    pub const WALL_DISTANCE_DECIMALS: i32 = 10;

    /// Snap-to-rest rounding precision
    pub const SNAP_DECIMALS: i32 = 3;
    /// Clamp-and-settle thresholds
    pub const SETTLE_TIME_EPSILON: f64 = 0.001;
    pub const SETTLE_SPEED_THRESHOLD: f64 = 1.1;

    /// Position slack when deciding the ball sits on a boundary
    pub const CONTACT_EPSILON: f64 = 1e-9;

    /// Launch speed bound for seeded random launches
    pub const MAX_LAUNCH_SPEED: f64 = 1200.0;
}

/// Round `value` to `decimals` decimal digits
#[inline]
pub fn reduce_precision(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() { rounded } else { value }
}

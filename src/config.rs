//! Simulation configuration and resting policies
//!
//! A config is immutable for the length of a simulation call. The host
//! produces a new one on resize instead of mutating shared geometry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Stabilization rule for a ball losing its vertical speed near the floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RestingPolicy {
    /// Damped vertical speed that rounds to zero at `decimals` digits is forced to zero
    SnapToRest { decimals: i32 },
    /// Quick, slow impacts settle onto the boundary instead of bouncing
    ClampAndSettle {
        time_epsilon: f64,
        speed_threshold: f64,
    },
}

impl Default for RestingPolicy {
    fn default() -> Self {
        RestingPolicy::SnapToRest {
            decimals: SNAP_DECIMALS,
        }
    }
}

impl RestingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestingPolicy::SnapToRest { .. } => "snap_to_rest",
            RestingPolicy::ClampAndSettle { .. } => "clamp_and_settle",
        }
    }

    /// Policy with default thresholds from its name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "snap_to_rest" | "snap" => Some(Self::default()),
            "clamp_and_settle" | "settle" => Some(RestingPolicy::ClampAndSettle {
                time_epsilon: SETTLE_TIME_EPSILON,
                speed_threshold: SETTLE_SPEED_THRESHOLD,
            }),
            _ => None,
        }
    }
}

/// Errors from building or loading a [`SimulationConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter was NaN or infinite
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    /// Damping must lie strictly between 0 and 1
    #[error("bounce damping {0} must lie strictly between 0 and 1")]
    DampingOutOfRange(f64),
    #[error("time step {0} must be positive")]
    NonPositiveTimeStep(f64),
    #[error("period {0} must not be negative")]
    NegativePeriod(f64),
    #[error("ball radius {0} must not be negative")]
    NegativeRadius(f64),
    /// The ball does not fit inside the box
    #[error("box {width}x{height} cannot hold a ball of radius {radius}")]
    BoxTooSmall { width: f64, height: f64, radius: f64 },
    /// Resting policy thresholds are unusable
    #[error("invalid resting policy: {0}")]
    InvalidPolicy(String),
    /// JSON could not be parsed or written
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parameters of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Vertical acceleration, positive = down
    pub gravity: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub ball_radius: f64,
    /// Normal velocity scale on bounce, in (0, 1)
    pub bounce_damping: f64,
    /// Sampling interval of the path and the animation lookup
    pub time_step: f64,
    /// Length of the sampled path and of the animation loop
    pub period: f64,
    pub resting: RestingPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            box_width: BOX_WIDTH,
            box_height: BOX_HEIGHT,
            ball_radius: BALL_RADIUS,
            bounce_damping: BOUNCE_DAMPING,
            time_step: TIME_STEP,
            period: SIMULATION_PERIOD,
            resting: RestingPolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Copy of this config with new box dimensions (host resize)
    pub fn resized(&self, box_width: f64, box_height: f64) -> Self {
        Self {
            box_width,
            box_height,
            ..*self
        }
    }

    /// Copy of this config with a different resting policy
    pub fn with_resting(&self, resting: RestingPolicy) -> Self {
        Self { resting, ..*self }
    }

    /// Number of `time_step` samples needed to cover one `period`
    pub fn sample_count(&self) -> usize {
        if self.period <= 0.0 || self.time_step <= 0.0 {
            return 0;
        }
        (self.period / self.time_step).ceil() as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravity", self.gravity),
            ("box_width", self.box_width),
            ("box_height", self.box_height),
            ("ball_radius", self.ball_radius),
            ("bounce_damping", self.bounce_damping),
            ("time_step", self.time_step),
            ("period", self.period),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        if !(self.bounce_damping > 0.0 && self.bounce_damping < 1.0) {
            return Err(ConfigError::DampingOutOfRange(self.bounce_damping));
        }
        if self.time_step <= 0.0 {
            return Err(ConfigError::NonPositiveTimeStep(self.time_step));
        }
        if self.period < 0.0 {
            return Err(ConfigError::NegativePeriod(self.period));
        }
        if self.ball_radius < 0.0 {
            return Err(ConfigError::NegativeRadius(self.ball_radius));
        }
        let diameter = 2.0 * self.ball_radius;
        if self.box_width < diameter || self.box_height < diameter {
            return Err(ConfigError::BoxTooSmall {
                width: self.box_width,
                height: self.box_height,
                radius: self.ball_radius,
            });
        }

        match self.resting {
            RestingPolicy::SnapToRest { decimals } if !(0..=15).contains(&decimals) => Err(
                ConfigError::InvalidPolicy(format!("snap decimals {decimals} outside 0..=15")),
            ),
            RestingPolicy::ClampAndSettle {
                time_epsilon,
                speed_threshold,
            } if !(time_epsilon.is_finite()
                && speed_threshold.is_finite()
                && time_epsilon >= 0.0
                && speed_threshold >= 0.0) =>
            {
                Err(ConfigError::InvalidPolicy(format!(
                    "settle thresholds ({time_epsilon}, {speed_threshold}) must be finite and non-negative"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a config file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from JSON, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(config)) => {
                log::info!("Loaded simulation config");
                config
            }
            Some(Err(e)) => {
                log::warn!("Ignoring simulation config: {e}");
                Self::default()
            }
            None => {
                log::info!("Using default simulation config");
                Self::default()
            }
        }
    }
}

//! Platform abstraction layer
//!
//! The canvas host owns the animation loop, resize observation and drawing.
//! It talks to the simulation through these bindings:
//! - `start`: logging and panic hook setup, run on module load
//! - `Simulator`: config + initial state, path sampling, clock lookup

use crate::config::SimulationConfig;
use crate::sim::state::DEFAULT_INITIAL;
use crate::sim::{BallState, sample_period, state_at_clock};

/// Host-side handle: the current config and the user-editable initial state
#[derive(Debug, Clone)]
pub struct Host {
    config: SimulationConfig,
    initial: BallState,
}

impl Host {
    pub fn new(config: SimulationConfig, initial: BallState) -> Self {
        Self { config, initial }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn initial(&self) -> BallState {
        self.initial
    }

    /// Replace the config with one sized to the new canvas
    pub fn resize(&mut self, width: f64, height: f64) {
        self.config = self.config.resized(width, height);
        log::info!("Simulation box resized to {width}x{height}");
    }

    pub fn set_initial(&mut self, initial: BallState) {
        self.initial = initial;
    }

    /// One period of the path, flattened to `x, y, vx, vy` quadruples
    pub fn sample_path(&self) -> Vec<f64> {
        sample_period(self.initial, &self.config)
            .iter()
            .flat_map(BallState::to_array)
            .collect()
    }

    /// Animated ball position at a wall-clock time (seconds)
    pub fn ball_at(&self, time_secs: f64) -> BallState {
        state_at_clock(self.initial, time_secs, &self.config)
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(SimulationConfig::default(), DEFAULT_INITIAL)
    }
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use wasm_bindgen::prelude::*;

    use super::Host;
    use crate::config::SimulationConfig;
    use crate::sim::BallState;
    use crate::sim::state::DEFAULT_INITIAL;

    /// Install the console logger and panic hook on module load
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        // Errs only when already initialized
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Bouncing ball simulation ready");
    }

    #[wasm_bindgen]
    pub struct Simulator {
        host: Host,
    }

    #[wasm_bindgen]
    impl Simulator {
        /// Default config, or one parsed from `config_json`
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> Simulator {
            let config = SimulationConfig::load_or_default(config_json.as_deref());
            Simulator {
                host: Host::new(config, DEFAULT_INITIAL),
            }
        }

        pub fn resize(&mut self, width: f64, height: f64) {
            self.host.resize(width, height);
        }

        pub fn set_initial(&mut self, x: f64, y: f64, vx: f64, vy: f64) {
            self.host.set_initial(BallState::new(x, y, vx, vy));
        }

        pub fn ball_radius(&self) -> f64 {
            self.host.config().ball_radius
        }

        pub fn sample_path(&self) -> Vec<f64> {
            self.host.sample_path()
        }

        pub fn ball_at(&self, time_secs: f64) -> Vec<f64> {
            self.host.ball_at(time_secs).to_array().to_vec()
        }
    }
}

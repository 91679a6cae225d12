//! Bouncing Ball entry point
//!
//! Native: prints the sampled path (or the ball at one clock time) as JSON
//! lines. The browser build is driven through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use clap::Parser;

    use bouncing_ball::sim::{
        BallState, DEFAULT_INITIAL, random_launch, sample_trajectory, state_at_clock,
    };
    use bouncing_ball::{ConfigError, RestingPolicy, SimulationConfig};

    /// Event-accurate bouncing ball: prints the sampled path as JSON lines
    #[derive(Debug, Default, Parser)]
    #[command(name = "bouncing-ball")]
    struct Options {
        /// JSON simulation config; missing fields take defaults
        #[arg(long = "config", value_name = "PATH")]
        config_path: Option<String>,
        /// Box size, e.g. 640x480
        #[arg(long, value_name = "WxH", value_parser = parse_size)]
        size: Option<(f64, f64)>,
        /// Resting policy: snap_to_rest or clamp_and_settle
        #[arg(long, value_parser = parse_policy)]
        policy: Option<RestingPolicy>,
        /// Seed for a random launch instead of the default state
        #[arg(long)]
        seed: Option<u64>,
        /// Number of samples after the initial state
        #[arg(long)]
        samples: Option<usize>,
        /// Print only the ball at this clock time (seconds)
        #[arg(long, value_name = "SECS")]
        time: Option<f64>,
    }

    fn parse_size(s: &str) -> Result<(f64, f64), String> {
        let bad = || format!("expected <width>x<height>, got '{s}'");
        let (w, h) = s.split_once('x').ok_or_else(bad)?;
        let w = w.trim().parse().map_err(|_| bad())?;
        let h = h.trim().parse().map_err(|_| bad())?;
        Ok((w, h))
    }

    fn parse_policy(s: &str) -> Result<RestingPolicy, String> {
        RestingPolicy::from_name(s).ok_or_else(|| format!("unknown policy '{s}'"))
    }

    fn load_config(options: &Options) -> Result<SimulationConfig, ConfigError> {
        let mut config = match &options.config_path {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some((w, h)) = options.size {
            config = config.resized(w, h);
        }
        if let Some(policy) = options.policy {
            config = config.with_resting(policy);
        }
        config.validate()?;
        Ok(config)
    }

    fn print_state(state: &BallState) {
        match serde_json::to_string(state) {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("Failed to serialize state: {e}"),
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();

        // Usage errors exit with status 2
        let options = Options::parse();
        let config = match load_config(&options) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };

        let initial = options
            .seed
            .map(|seed| random_launch(seed, &config))
            .unwrap_or(DEFAULT_INITIAL);
        log::info!(
            "Simulating in {}x{} box, {} policy",
            config.box_width,
            config.box_height,
            config.resting.as_str()
        );

        if let Some(time) = options.time {
            print_state(&state_at_clock(initial, time, &config));
        } else {
            let count = options.samples.unwrap_or_else(|| config.sample_count());
            for state in sample_trajectory(initial, &config, count) {
                print_state(&state);
            }
        }
        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

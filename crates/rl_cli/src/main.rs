//! rl_cli
//!
//! Offline tools for the control core: kinematic tables and scenario runs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rl_cli::{run_scenario, Scenario};
use rl_core::engine::config::{load_from_env, CONTROL_CONFIG_PATH_ENV};
use rl_core::engine::kinematics::{curvature, max_angular_velocity, throttle_acceleration, turn_radius};
use rl_core::engine::physics_constants::speed;
use rl_core::ControlConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rl_cli")]
#[command(about = "Drive the vehicle control core offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Aggressive,
    Cautious,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the kinematic model as a table
    Curves {
        /// Speed step between rows (uu/s)
        #[arg(long, default_value = "250")]
        step: f32,
    },

    /// Run a scenario file and print one JSON line per tick
    Run {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,

        /// Control config JSON file (overrides the env var and preset)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Built-in tuning preset
        #[arg(long, value_enum, default_value = "default")]
        preset: Preset,
    },
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Curves { step } => print_curves(step)?,
        Commands::Run { scenario, config, preset } => {
            let config = resolve_config(config, preset)?;
            let scenario = Scenario::load(&scenario)?;
            log::info!("Running {} ticks", scenario.ticks);

            let mut failed = None;
            let car = run_scenario(&scenario, config, |report| {
                if failed.is_some() {
                    return;
                }
                match serde_json::to_string(report) {
                    Ok(line) => println!("{line}"),
                    Err(e) => failed = Some(e),
                }
            })?;
            if let Some(e) = failed {
                return Err(e).context("failed to serialize tick report");
            }
            log::info!(
                "Finished at ({:.0}, {:.0}, {:.0}), speed {:.0}, boost {:.0}",
                car.position.x,
                car.position.y,
                car.position.z,
                car.speed(),
                car.boost
            );
        }
    }

    Ok(())
}

fn resolve_config(path: Option<PathBuf>, preset: Preset) -> Result<ControlConfig> {
    if let Some(path) = path {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = ControlConfig::from_json(&content)
            .with_context(|| format!("malformed config {}", path.display()))?;
        config.validate()?;
        return Ok(config);
    }

    if std::env::var_os(CONTROL_CONFIG_PATH_ENV).is_some() {
        return load_from_env().with_context(|| format!("invalid config from {CONTROL_CONFIG_PATH_ENV}"));
    }

    Ok(match preset {
        Preset::Default => ControlConfig::default(),
        Preset::Aggressive => ControlConfig::aggressive(),
        Preset::Cautious => ControlConfig::cautious(),
    })
}

fn print_curves(step: f32) -> Result<()> {
    if !(step > 0.0) {
        anyhow::bail!("--step must be positive, got {step}");
    }

    println!("{:>8} {:>12} {:>10} {:>10} {:>10}", "speed", "curvature", "radius", "max_yaw", "throttle");
    let mut current = 0.0_f32;
    while current < speed::BOOSTED_MAX_SPEED {
        println!(
            "{:>8.0} {:>12.6} {:>10.1} {:>10.3} {:>10.1}",
            current,
            curvature(current),
            turn_radius(current),
            max_angular_velocity(current),
            throttle_acceleration(current)?
        );
        current += step;
    }
    Ok(())
}

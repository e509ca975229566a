//! Command line interface for the janus demo runner

use std::fmt;
use std::path::PathBuf;

use bevy::log::info;
use clap::Parser;

use janus::config::SimulationConfig;
use janus::physics::integrators::registry::IntegratorRegistry;
use janus::physics::scenarios::ScenarioKind;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
    /// Overrides produced a configuration that fails validation
    InvalidConfig(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
            CliError::InvalidConfig(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Janus - bit-reversible fixed-point N-body integration
#[derive(Parser, Debug, Default)]
#[command(version = VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Integrator scheme (e.g. janus, leapfrog)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub scheme: Option<String>,

    /// Fixed-point scale; coordinates are stored in units of 1/SCALE
    #[arg(long, value_name = "SCALE")]
    pub scale: Option<f64>,

    /// Composition order of the fixed-point scheme (2 or 4)
    #[arg(long, value_name = "ORDER")]
    pub order: Option<usize>,

    /// Timestep (negative values integrate backwards)
    #[arg(long, value_name = "DT", allow_negative_numbers = true)]
    pub dt: Option<f64>,

    /// Number of steps to integrate
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub steps: Option<usize>,

    /// Initial conditions
    #[arg(long, value_name = "SCENARIO")]
    pub scenario: Option<ScenarioKind>,

    /// Number of bodies for the random cluster
    #[arg(short = 'b', long, value_name = "COUNT")]
    pub bodies: Option<usize>,

    /// Gravitational constant (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE")]
    pub gravity: Option<f64>,

    /// Random seed for body generation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Integrate back to the start afterwards and report the deviation
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective configuration to FILE before running
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file, user config or defaults, then applies
/// command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            SimulationConfig::load(Some(path.as_path()))
                .map_err(|e| CliError::ConfigLoad(e.to_string()))?
        }
        None => match SimulationConfig::user_config_path().filter(|path| path.exists()) {
            Some(path) => SimulationConfig::load_or_default(&path),
            None => {
                SimulationConfig::load(None).map_err(|e| CliError::ConfigLoad(e.to_string()))?
            }
        },
    };

    apply_overrides(args, &mut config)?;
    config
        .validate()
        .map_err(|e| CliError::InvalidConfig(e.to_string()))?;

    Ok(config)
}

fn apply_overrides(args: &Args, config: &mut SimulationConfig) -> Result<(), CliError> {
    if let Some(scheme) = &args.scheme {
        config.integrator.scheme = scheme.clone();
    }

    if let Some(scale) = args.scale {
        info!("Overriding fixed-point scale to: {scale:e}");
        config.integrator.scale = scale;
    }

    if let Some(order) = args.order {
        config.integrator.order = order;
    }

    // Validate the scheme/order pair against the registry
    IntegratorRegistry::new()
        .create(&config.integrator)
        .map_err(CliError::InvalidIntegrator)?;

    if let Some(dt) = args.dt {
        info!("Overriding timestep to: {dt}");
        config.physics.timestep = dt;
    }

    if let Some(gravity) = args.gravity {
        info!("Overriding gravitational constant to: {gravity}");
        config.physics.gravitational_constant = gravity;
    }

    if let Some(kind) = args.scenario {
        config.scenario.kind = kind;
    }

    if let Some(steps) = args.steps {
        config.scenario.steps = steps;
    }

    if let Some(body_count) = args.bodies {
        info!("Overriding body count to: {body_count}");
        config.scenario.body_count = body_count;
    }

    if let Some(seed) = args.seed {
        info!("Using random seed: {seed}");
        config.scenario.seed = seed;
    }

    Ok(())
}

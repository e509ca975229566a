use std::fmt;
use std::path::{Path, PathBuf};

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::physics::integrators::{Composition, Janus};
use crate::physics::math::Scalar;
use crate::physics::scenarios::ScenarioKind;

/// Prefix for environment variable overrides, e.g. `JANUS_INTEGRATOR__SCALE`
pub const ENV_PREFIX: &str = "JANUS";

#[derive(Debug)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized
    Load(config::ConfigError),
    Serialize(toml::ser::Error),
    Io(std::io::Error),
    /// The configuration parsed but violates an invariant
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Failed to load configuration: {e}"),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize configuration: {e}"),
            ConfigError::Io(e) => write!(f, "Failed to write configuration: {e}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Load(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub integrator: IntegratorConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    /// Plummer softening length
    pub softening: Scalar,
    pub timestep: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            softening: 0.0,
            timestep: 0.01,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Integrator name or alias, resolved through the registry
    pub scheme: String,
    /// Fixed-point multiplier; coordinates are stored in units of `1 / scale`
    pub scale: Scalar,
    /// Composition order of the fixed-point scheme
    pub order: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            scheme: "janus".to_string(),
            scale: Janus::DEFAULT_SCALE,
            order: 4,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    /// Number of bodies for scenarios that take one
    pub body_count: usize,
    pub seed: u64,
    pub steps: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::TwoBody,
            body_count: 16,
            seed: 42,
            steps: 10_000,
        }
    }
}

impl SimulationConfig {
    /// Layer the defaults, an optional TOML file and `JANUS_*` environment
    /// variables, in that order of increasing precedence.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&SimulationConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config: SimulationConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if the file
    /// doesn't exist or can't be parsed
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("Config file {} not found. Using defaults.", path.display());
            return Self::default();
        }

        match Self::load(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e} ({}). Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Platform-specific location of the user's configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "janus").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.integrator.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "integrator.scale must be finite and positive, got {scale}"
            )));
        }

        let order = self.integrator.order;
        if Composition::for_order(order).is_none() {
            return Err(ConfigError::Invalid(format!(
                "integrator.order {order} is not supported (expected one of {:?})",
                Composition::supported_orders()
            )));
        }

        let dt = self.physics.timestep;
        if !dt.is_finite() || dt == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "physics.timestep must be finite and non-zero, got {dt}"
            )));
        }

        let softening = self.physics.softening;
        if !softening.is_finite() || softening < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "physics.softening must be finite and non-negative, got {softening}"
            )));
        }

        if !self.physics.gravitational_constant.is_finite() {
            return Err(ConfigError::Invalid(
                "physics.gravitational_constant must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

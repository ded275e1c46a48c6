//! Configuration module with sub-modules per concern
//!
//! - `environment` - Environment detection and logging configuration
//! - `pin` - PIN issuance and validation policy
//! - `cache` - Redis record store configuration
//!
//! Values are layered: environment-specific defaults, then an optional
//! `config/{environment}.toml`, then `PV_`-prefixed environment variables
//! using `__` between sections (`PV_PIN__EXPIRY_MINUTES=15`).

pub mod cache;
pub mod environment;
pub mod pin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use pin::{
    PinPolicyConfig, DEFAULT_PIN_EXPIRY_MINUTES, DEFAULT_PIN_MAX_ATTEMPTS, MAX_PIN_EXPIRY_MINUTES,
};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PV";

/// Directory searched for per-environment config files
pub const CONFIG_DIR: &str = "config";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// PIN policy configuration
    pub pin: PinPolicyConfig,

    /// Record store configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in configuration for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let pin = if environment.is_production() {
            PinPolicyConfig::hardened()
        } else {
            PinPolicyConfig::default()
        };

        Self {
            environment,
            pin,
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// Reads `.env.{environment}` and `.env` first when present.
    pub fn load() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();

        Self::load_with(environment, ENV_PREFIX, Path::new(CONFIG_DIR))
    }

    /// Load configuration with an explicit environment, variable prefix and config directory
    pub fn load_with(
        environment: Environment,
        env_prefix: &str,
        config_dir: &Path,
    ) -> Result<Self, ConfigurationError> {
        Self::load_from(environment, env_prefix, config_dir, None)
    }

    /// Like `load_with`, reading overrides from `env_vars` instead of the
    /// process environment when given
    pub fn load_from(
        environment: Environment,
        env_prefix: &str,
        config_dir: &Path,
        env_vars: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigurationError> {
        let defaults = Self::for_environment(environment);
        let file = config_dir.join(environment.config_file_stem());

        let settings = ::config::Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("pin.expiry_minutes", defaults.pin.expiry_minutes)?
            .set_default("pin.max_attempts", i64::from(defaults.pin.max_attempts))?
            .set_default("pin.cap_attempts_at_ceiling", defaults.pin.cap_attempts_at_ceiling)?
            .set_default("pin.secure_rng", defaults.pin.secure_rng)?
            .set_default("logging.level", defaults.logging.level.clone())?
            .set_default("logging.format", defaults.logging.format.as_str())?
            .set_default("logging.colored", defaults.logging.colored)?
            .set_default("logging.source_location", defaults.logging.source_location)?
            .add_source(::config::File::with_name(&file.to_string_lossy()).required(false))
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_vars),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.pin.validate()?;

        tracing::debug!(
            environment = %loaded.environment,
            expiry_minutes = loaded.pin.expiry_minutes,
            max_attempts = loaded.pin.max_attempts,
            "Loaded application configuration"
        );

        Ok(loaded)
    }
}

//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::ConfigurationError;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigurationError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigurationError::invalid("logging.level", e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| ConfigurationError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig {
            level: String::from("info"),
            format: LogFormat::Compact,
            colored: false,
            source_location: false,
        };

        // Whichever call installs first, the other must report an error.
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(first.is_err() || second.is_err());
        assert!(matches!(second, Err(ConfigurationError::Logging(_))));
    }
}

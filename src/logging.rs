//! Tracing subscriber setup shared by both binaries

use crate::config::LoggingConfig;
use crate::{Result, WeatherDeskError};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Output goes to stderr so prompts and results on stdout stay readable.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weatherdesk={0},tempconv={0}", config.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };

    installed.map_err(|e| WeatherDeskError::config(format!("Failed to install logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        let config = LoggingConfig::default();
        // This is the only test touching the global subscriber
        init(&config).unwrap();

        let err = init(&config).unwrap_err();
        assert!(matches!(err, WeatherDeskError::Config { .. }));
        assert!(err.to_string().contains("Failed to install logger"));
    }
}

use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for the server and batch jobs.
    Json,
    /// Human-readable lines on stderr, for interactive tools.
    Pretty,
}

/// Validates that a log level string is valid
pub fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            Error::config(format!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            ))
        })?;
    Ok(())
}

/// Builds the filter: `RUST_LOG` directives win over the configured level.
pub fn env_filter(configured_level: &str) -> Result<EnvFilter> {
    match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::try_new(&directives)
            .map_err(|e| Error::config(format!("Invalid RUST_LOG '{}': {}", directives, e))),
        Err(_) => {
            validate_log_level(configured_level)?;
            EnvFilter::try_new(configured_level)
                .map_err(|e| Error::config(format!("Invalid log level: {}", e)))
        }
    }
}

pub fn init(configured_level: &str, format: LogFormat) -> Result<()> {
    let filter = env_filter(configured_level)?;
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("error")]
    #[case("warn")]
    #[case("info")]
    #[case("DEBUG")]
    #[case("trace")]
    fn test_valid_levels(#[case] level: &str) {
        assert!(validate_log_level(level).is_ok());
    }

    #[test]
    fn test_invalid_level() {
        let err = validate_log_level("loud").unwrap_err();
        assert!(err.to_string().contains("Invalid log level: 'loud'"));
    }
}

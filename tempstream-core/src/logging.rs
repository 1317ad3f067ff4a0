//! Tracing initialization for the tempstream crates.
//!
//! Consumers that want structured log output (including cleanup failures
//! reported by dropped streams) call [`init`] once at startup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Result, TempStreamError};

/// Initialize the tracing subscriber with environment-based configuration
///
/// Uses standard RUST_LOG environment variable for filtering:
/// - `RUST_LOG=debug` - Set global level
/// - `RUST_LOG=tempstream=info` - Set per-module levels
///
/// Uses RUST_LOG_FORMAT for output format (optional):
/// - `json` - JSON formatted output
/// - `pretty` - Pretty formatted output (default)
/// - `compact` - Compact single-line output
pub fn init() -> Result<()> {
    init_with_defaults("info")
}

/// Initialize with a default filter if RUST_LOG is not set
///
/// # Arguments
/// * `default_filter` - The filter string to use if RUST_LOG is not set (e.g., "info", "debug")
pub fn init_with_defaults(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    match format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_ansi(false).json())
                .try_init()
                .map_err(|e| {
                    TempStreamError::Config(format!("Failed to initialize tracing: {}", e))
                })?;
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init()
                .map_err(|e| {
                    TempStreamError::Config(format!("Failed to initialize tracing: {}", e))
                })?;
        }
        _ => {
            // Default to pretty format
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .try_init()
                .map_err(|e| {
                    TempStreamError::Config(format!("Failed to initialize tracing: {}", e))
                })?;
        }
    }

    Ok(())
}

/// Initialize for testing with a test-friendly writer
#[cfg(test)]
pub fn init_for_testing() -> Result<()> {
    let env_filter = EnvFilter::new("debug");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer())
        .try_init()
        .map_err(|e| TempStreamError::Config(format!("Failed to initialize test tracing: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info, warn};

    #[test]
    fn test_tracing_initialization() {
        // Note: Can only initialize once per process
        // This test may fail if run with other tests
        if init_for_testing().is_ok() {
            info!("Test info message");
            debug!("Test debug message");
            warn!("Test warning message");
            error!("Test error message");
        }
    }
}

//! Process-wide logging setup.
//!
//! The library logs through the `log` facade. [`init_logging`] bridges those
//! records into a `tracing` subscriber writing to stderr.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::LoggingError;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_logging(default_filter: &str, format: LogFormat) -> Result<(), LoggingError> {
    let default = EnvFilter::try_new(default_filter).map_err(|e| LoggingError::InvalidFilter {
        filter: default_filter.to_string(),
        reason: e.to_string(),
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(default);

    let json = format == LogFormat::Json;
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::AlreadyInitialized)?;
    tracing_log::LogTracer::init().map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(())
}

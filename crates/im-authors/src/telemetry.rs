//! Log output for the command-line tool

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("log subscriber setup failed: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Parse a `--log-level` value such as `info` or `im_authors=debug`.
pub fn log_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::Filter {
        filter: log_level.to_string(),
        source,
    })
}

/// Send log events to stderr. A valid `RUST_LOG` overrides `log_level`.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => log_filter(log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .without_time()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

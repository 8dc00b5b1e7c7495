//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Translate the `debuglevel` option into filter directives
//!
//! # Design Decisions
//! - `debuglevel` accepts a global level (`debug`) or comma separated
//!   `target=level` pairs, the same syntax as `RUST_LOG`
//! - An empty level falls back to `info`

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::DEFAULT_LOG_LEVEL;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid debug level: {0}")]
    InvalidLevel(#[from] ParseError),

    #[error("logging already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Build the filter for a `debuglevel` value.
pub fn build_filter(debug_level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = match debug_level.trim() {
        "" => DEFAULT_LOG_LEVEL,
        level => level,
    };
    Ok(EnvFilter::try_new(directives)?)
}

/// Install the global subscriber.
pub fn init_logging(debug_level: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(debug_level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

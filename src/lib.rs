//! Configuration core for the tollgate payment-gated reverse proxy.
//!
//! Builds the default [`Config`], merges operator settings on top, and runs
//! the validation gate before the proxy, authenticator, mailbox and storage
//! subsystems receive it.

pub mod config;
pub mod observability;

pub use config::{Config, ConfigError};

/// Application name; also names the data directory.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

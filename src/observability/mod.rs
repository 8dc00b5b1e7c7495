//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured events through the `tracing` crate
//! - Filter built from the configured debug level, `RUST_LOG` wins when set
//! - Config validation never logs; callers decide how to report failures

pub mod logging;

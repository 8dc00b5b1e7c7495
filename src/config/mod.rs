//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! AppDataDir (resolved once at start-up)
//!     → schema.rs (Config::new_default)
//!     → loader.rs (merge config file, then key=value overrides via fields.rs)
//!     → validation.rs (start-up gate)
//!     → Config (validated, read-only)
//!     → handed to proxy, authenticator, mailbox and storage subsystems
//! ```
//!
//! # Design Decisions
//! - Every leaf group is always present with well-formed defaults
//! - Storage reads only the selected backend, through `Config::backend`
//! - The gate checks start-up critical fields only; each subsystem
//!   validates the settings it consumes

pub mod auth;
pub mod backends;
pub mod duration;
pub mod fields;
pub mod loader;
pub mod paths;
pub mod schema;
pub mod sections;
pub mod services;
pub mod validation;

pub use auth::{AuthenticatorConfig, LndEndpoint, Network};
pub use backends::{Backend, BackendKind, EtcdConfig, PostgresConfig, SqliteConfig};
pub use duration::StaleTimeout;
pub use loader::{load_config, LoadError, LoadOptions, Override};
pub use paths::AppDataDir;
pub use schema::Config;
pub use sections::{HashMailConfig, PrometheusConfig, TorConfig};
pub use services::ServiceDescriptor;
pub use validation::ConfigError;

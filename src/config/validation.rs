//! Configuration validation.
//!
//! # Responsibilities
//! - Decide whether a loaded [`Config`] may be handed to the proxy
//! - Check the authenticator group, then the listen address
//!
//! # Design Decisions
//! - Stops at the first failure
//! - Pure function: `&Config → Result<(), ConfigError>`, no logging
//! - Only start-up critical fields are checked here; each subsystem checks
//!   the settings it consumes (storage validates its own backend on open)

use thiserror::Error;

use crate::config::schema::Config;

/// Reason a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Authenticator enabled without a Lightning node host.
    #[error("lnd host required")]
    MissingLndHost,

    /// Authenticator enabled without the node's TLS certificate.
    #[error("lnd tls required")]
    MissingLndTls,

    /// Authenticator enabled without a macaroon directory.
    #[error("lnd mac dir required")]
    MissingLndMacDir,

    #[error("missing listen address for server")]
    MissingListenAddr,
}

/// Run the start-up validation gate.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config.authenticator.validate()?;

    if config.listen_addr.is_empty() {
        return Err(ConfigError::MissingListenAddr);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::auth::{AuthenticatorConfig, LndEndpoint};
    use crate::config::paths::AppDataDir;

    fn config() -> Config {
        Config::new_default(&AppDataDir::from_path("/tmp/tollgate-test"))
    }

    #[test]
    fn test_authenticator_checked_first() {
        let cfg = config();
        assert!(cfg.listen_addr.is_empty());
        assert_eq!(validate_config(&cfg), Err(ConfigError::MissingLndHost));
    }

    #[test]
    fn test_missing_listen_addr() {
        let mut cfg = config();
        cfg.authenticator = AuthenticatorConfig::Disabled;
        assert_eq!(validate_config(&cfg), Err(ConfigError::MissingListenAddr));
    }

    #[test]
    fn test_valid_config() {
        let mut cfg = config();
        cfg.listen_addr = "0.0.0.0:8081".into();
        cfg.authenticator = AuthenticatorConfig::Enabled(LndEndpoint {
            host: "localhost:10009".into(),
            tls_path: "/lnd/tls.cert".into(),
            mac_dir: "/lnd/data/chain/bitcoin/mainnet".into(),
            network: None,
        });
        assert_eq!(validate_config(&cfg), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::MissingListenAddr.to_string(),
            "missing listen address for server"
        );
        assert_eq!(ConfigError::MissingLndTls.to_string(), "lnd tls required");
    }
}

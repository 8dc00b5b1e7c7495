//! Settings for reaching the Lightning node that backs token issuance.
//!
//! In files the group is a flat table (`disable`, `lndhost`, `tlspath`,
//! `macdir`, `network`). In memory it is either [`AuthenticatorConfig::Disabled`]
//! or an enabled [`LndEndpoint`], so a disabled authenticator carries no
//! connection settings that could be read by mistake.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::validation::ConfigError;

/// Bitcoin network the Lightning node runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Regtest,
    Simnet,
    Testnet,
    Mainnet,
}

impl Network {
    pub const NAMES: &'static [&'static str] = &["regtest", "simnet", "testnet", "mainnet"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regtest => "regtest",
            Self::Simnet => "simnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regtest" => Ok(Self::Regtest),
            "simnet" => Ok(Self::Simnet),
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            other => Err(format!("unknown network: {other}")),
        }
    }
}

/// Connection settings for an enabled authenticator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LndEndpoint {
    /// `host:port` of the node's RPC interface.
    pub host: String,
    /// Node TLS certificate.
    pub tls_path: PathBuf,
    /// Directory holding the node's macaroons.
    pub mac_dir: PathBuf,
    pub network: Option<Network>,
}

/// Authenticator group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "AuthenticatorFields", into = "AuthenticatorFields")]
pub enum AuthenticatorConfig {
    /// Token checks are off. Only meant for non-production setups.
    Disabled,
    Enabled(LndEndpoint),
}

impl Default for AuthenticatorConfig {
    /// Enabled with nothing filled in; fails validation until configured.
    fn default() -> Self {
        Self::Enabled(LndEndpoint::default())
    }
}

impl AuthenticatorConfig {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub fn endpoint(&self) -> Option<&LndEndpoint> {
        match self {
            Self::Disabled => None,
            Self::Enabled(endpoint) => Some(endpoint),
        }
    }

    /// Check that an enabled authenticator names its host, TLS certificate
    /// and macaroon directory, in that order. The network is not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self::Enabled(endpoint) = self else {
            return Ok(());
        };

        if endpoint.host.is_empty() {
            return Err(ConfigError::MissingLndHost);
        }
        if endpoint.tls_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingLndTls);
        }
        if endpoint.mac_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingLndMacDir);
        }

        Ok(())
    }
}

/// Flat file representation of [`AuthenticatorConfig`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
struct AuthenticatorFields {
    #[serde(rename = "lndhost")]
    lnd_host: String,
    #[serde(rename = "tlspath")]
    tls_path: PathBuf,
    #[serde(rename = "macdir")]
    mac_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    network: Option<Network>,
    disable: bool,
}

impl From<AuthenticatorFields> for AuthenticatorConfig {
    fn from(fields: AuthenticatorFields) -> Self {
        if fields.disable {
            return Self::Disabled;
        }
        Self::Enabled(LndEndpoint {
            host: fields.lnd_host,
            tls_path: fields.tls_path,
            mac_dir: fields.mac_dir,
            network: fields.network,
        })
    }
}

impl From<AuthenticatorConfig> for AuthenticatorFields {
    fn from(config: AuthenticatorConfig) -> Self {
        match config {
            AuthenticatorConfig::Disabled => Self {
                disable: true,
                ..Self::default()
            },
            AuthenticatorConfig::Enabled(endpoint) => Self {
                lnd_host: endpoint.host,
                tls_path: endpoint.tls_path,
                mac_dir: endpoint.mac_dir,
                network: endpoint.network,
                disable: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(host: &str, tls: &str, mac: &str) -> AuthenticatorConfig {
        AuthenticatorConfig::Enabled(LndEndpoint {
            host: host.into(),
            tls_path: tls.into(),
            mac_dir: mac.into(),
            network: Some(Network::Regtest),
        })
    }

    #[test]
    fn test_disabled_always_valid() {
        assert_eq!(AuthenticatorConfig::Disabled.validate(), Ok(()));
    }

    #[test]
    fn test_disable_flag_ignores_garbage_fields() {
        let cfg: AuthenticatorConfig = toml::from_str(
            r#"
            disable = true
            lndhost = ""
            tlspath = "/nowhere"
            "#,
        )
        .unwrap();
        assert!(cfg.is_disabled());
        assert_eq!(cfg.endpoint(), None);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_default_is_enabled_and_empty() {
        let cfg = AuthenticatorConfig::default();
        assert!(!cfg.is_disabled());
        assert_eq!(cfg.validate(), Err(ConfigError::MissingLndHost));
    }

    #[test]
    fn test_first_missing_field_reported() {
        let cases = [
            (("", "", ""), Err(ConfigError::MissingLndHost)),
            (("", "tls.cert", "mac"), Err(ConfigError::MissingLndHost)),
            (("host:10009", "", ""), Err(ConfigError::MissingLndTls)),
            (("host:10009", "", "mac"), Err(ConfigError::MissingLndTls)),
            (("host:10009", "tls.cert", ""), Err(ConfigError::MissingLndMacDir)),
            (("host:10009", "tls.cert", "mac"), Ok(())),
        ];

        for ((host, tls, mac), expected) in cases {
            assert_eq!(endpoint(host, tls, mac).validate(), expected, "{host}/{tls}/{mac}");
        }
    }

    #[test]
    fn test_network_not_required() {
        let mut cfg = endpoint("host:10009", "tls.cert", "mac");
        if let AuthenticatorConfig::Enabled(ep) = &mut cfg {
            ep.network = None;
        }
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_flat_table_round_trip() {
        let cfg: AuthenticatorConfig = toml::from_str(
            r#"
            lndhost = "localhost:10009"
            tlspath = "/lnd/tls.cert"
            macdir = "/lnd/macaroons"
            network = "testnet"
            "#,
        )
        .unwrap();

        let ep = cfg.endpoint().unwrap();
        assert_eq!(ep.host, "localhost:10009");
        assert_eq!(ep.network, Some(Network::Testnet));

        let encoded = toml::to_string(&cfg).unwrap();
        let decoded: AuthenticatorConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, cfg);
    }

    #[test]
    fn test_unknown_network_rejected() {
        let res: Result<AuthenticatorConfig, _> = toml::from_str(r#"network = "signet""#);
        assert!(res.is_err());
    }
}

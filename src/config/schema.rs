//! Root configuration definition.
//!
//! [`Config`] owns every leaf group by value. Field names in files follow
//! the dotted paths listed in [`fields`](crate::config::fields).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::auth::AuthenticatorConfig;
use crate::config::backends::{Backend, BackendKind, EtcdConfig, PostgresConfig, SqliteConfig};
use crate::config::paths::AppDataDir;
use crate::config::sections::{HashMailConfig, PrometheusConfig, TorConfig};
use crate::config::services::ServiceDescriptor;
use crate::config::validation::{validate_config, ConfigError};

pub const DEFAULT_CONFIG_FILENAME: &str = "tollgate.toml";
pub const DEFAULT_TLS_KEY_FILENAME: &str = "tls.key";
pub const DEFAULT_TLS_CERT_FILENAME: &str = "tls.cert";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILENAME: &str = "tollgate.log";
pub const DEFAULT_LOG_DIRNAME: &str = "logs";

/// Root configuration for the gateway.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Interface the proxy listens on for client requests.
    #[serde(rename = "listenaddr")]
    pub listen_addr: String,

    /// FQDN used when requesting a Let's Encrypt certificate.
    #[serde(rename = "servername")]
    pub server_name: String,

    /// Obtain a certificate for `server_name` automatically.
    #[serde(rename = "autocert")]
    pub auto_cert: bool,

    /// Serve plain HTTP, no TLS on incoming connections.
    pub insecure: bool,

    /// Folder holding static content.
    #[serde(rename = "staticroot")]
    pub static_root: PathBuf,

    #[serde(rename = "servestatic")]
    pub serve_static: bool,

    /// Which of `etcd`, `sqlite` and `postgres` is used.
    #[serde(rename = "dbbackend")]
    pub db_backend: BackendKind,

    pub sqlite: SqliteConfig,
    pub postgres: PostgresConfig,
    pub etcd: EtcdConfig,
    pub authenticator: AuthenticatorConfig,
    pub tor: TorConfig,

    /// Services the proxy fronts.
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,

    pub hashmail: HashMailConfig,
    pub prometheus: PrometheusConfig,

    /// Global level (`info`) or comma separated `target=level` directives.
    #[serde(rename = "debuglevel")]
    pub debug_level: String,

    /// Alternative config file.
    #[serde(rename = "configfile")]
    pub config_file: PathBuf,

    /// Directory for all of tollgate's files. Empty means the app data dir.
    #[serde(rename = "basedir")]
    pub base_dir: PathBuf,

    /// Port for the profiling endpoint; 0 disables it.
    #[serde(rename = "profile")]
    pub profile_port: u16,
}

impl Config {
    /// Fully populated defaults.
    ///
    /// Every backend group is filled in regardless of the selected kind.
    /// The backend defaults to etcd even though sqlite has a ready-made
    /// path; existing deployments rely on that.
    pub fn new_default(app_dir: &AppDataDir) -> Self {
        Self {
            listen_addr: String::new(),
            server_name: String::new(),
            auto_cert: false,
            insecure: false,
            static_root: PathBuf::new(),
            serve_static: false,
            db_backend: BackendKind::Etcd,
            sqlite: SqliteConfig::new_default(app_dir),
            postgres: PostgresConfig::default(),
            etcd: EtcdConfig::default(),
            authenticator: AuthenticatorConfig::default(),
            tor: TorConfig::default(),
            services: Vec::new(),
            hashmail: HashMailConfig::default(),
            prometheus: PrometheusConfig::default(),
            debug_level: DEFAULT_LOG_LEVEL.to_string(),
            config_file: PathBuf::new(),
            base_dir: PathBuf::new(),
            profile_port: 0,
        }
    }

    /// Start-up validation gate. See [`validate_config`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)
    }

    /// Settings of the selected database backend.
    pub fn backend(&self) -> Backend<'_> {
        match self.db_backend {
            BackendKind::Etcd => Backend::Etcd(&self.etcd),
            BackendKind::Sqlite => Backend::Sqlite(&self.sqlite),
            BackendKind::Postgres => Backend::Postgres(&self.postgres),
        }
    }

    /// `base_dir` if set, otherwise the app data directory.
    pub fn effective_base_dir(&self, app_dir: &AppDataDir) -> PathBuf {
        if self.base_dir.as_os_str().is_empty() {
            app_dir.path().to_path_buf()
        } else {
            self.base_dir.clone()
        }
    }

    /// `config_file` if set, otherwise `tollgate.toml` in the base dir.
    pub fn config_file_path(&self, app_dir: &AppDataDir) -> PathBuf {
        if self.config_file.as_os_str().is_empty() {
            self.effective_base_dir(app_dir).join(DEFAULT_CONFIG_FILENAME)
        } else {
            self.config_file.clone()
        }
    }

    pub fn tls_cert_path(&self, app_dir: &AppDataDir) -> PathBuf {
        self.effective_base_dir(app_dir).join(DEFAULT_TLS_CERT_FILENAME)
    }

    pub fn tls_key_path(&self, app_dir: &AppDataDir) -> PathBuf {
        self.effective_base_dir(app_dir).join(DEFAULT_TLS_KEY_FILENAME)
    }

    pub fn log_file_path(&self, app_dir: &AppDataDir) -> PathBuf {
        self.effective_base_dir(app_dir)
            .join(DEFAULT_LOG_DIRNAME)
            .join(DEFAULT_LOG_FILENAME)
    }
}

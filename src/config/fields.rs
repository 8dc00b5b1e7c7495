//! Field schema: every settable option, addressed by its dotted path.
//!
//! The table is what loaders consult to turn `key=value` text into typed
//! values. It is kept next to the structs in [`schema`](crate::config::schema)
//! and a test checks that both describe the same set of paths.

use std::fmt;

use toml::Value;

use crate::config::auth::Network;
use crate::config::backends::BackendKind;
use crate::config::duration;
use crate::config::loader::LoadError;
use crate::config::services::ServiceDescriptor;
use FieldKind::*;

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Path,
    Bool,
    Port,
    Count,
    /// Humantime duration such as `"250ms"`.
    Duration,
    /// Duration, or negative to never expire.
    StaleTimeout,
    /// One of a fixed set of names.
    Choice(&'static [&'static str]),
    /// JSON object appended to the service list.
    ServiceJson,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Path => "path",
            Self::Bool => "bool",
            Self::Port => "port",
            Self::Count => "integer",
            Self::Duration | Self::StaleTimeout => "duration",
            Self::Choice(_) => "choice",
            Self::ServiceJson => "json",
        }
    }
}

/// One entry of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub path: &'static str,
    pub kind: FieldKind,
    /// Default as shown to operators.
    pub default: &'static str,
    pub description: &'static str,
}

impl FieldSpec {
    /// Allowed values for choice fields.
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            FieldKind::Choice(choices) => Some(choices),
            _ => None,
        }
    }

    /// Whether values accumulate into a list instead of replacing it.
    pub fn is_repeated(&self) -> bool {
        matches!(self.kind, FieldKind::ServiceJson)
    }

    /// Convert raw text into the TOML value stored under this path.
    pub fn parse(&self, raw: &str) -> Result<Value, LoadError> {
        let invalid = |reason: String| LoadError::InvalidValue {
            path: self.path.to_string(),
            value: raw.to_string(),
            reason,
        };

        match self.kind {
            FieldKind::Str | FieldKind::Path => Ok(Value::String(raw.to_string())),
            FieldKind::Bool => raw
                .parse::<bool>()
                .map(Value::Boolean)
                .map_err(|e| invalid(e.to_string())),
            FieldKind::Port => raw
                .parse::<u16>()
                .map(|n| Value::Integer(i64::from(n)))
                .map_err(|e| invalid(e.to_string())),
            FieldKind::Count => raw
                .parse::<u32>()
                .map(|n| Value::Integer(i64::from(n)))
                .map_err(|e| invalid(e.to_string())),
            FieldKind::Duration => humantime::parse_duration(raw)
                .map(|_| Value::String(raw.to_string()))
                .map_err(|e| invalid(e.to_string())),
            FieldKind::StaleTimeout => raw
                .parse::<duration::StaleTimeout>()
                .map(|t| Value::String(t.to_string()))
                .map_err(|e| invalid(e.to_string())),
            FieldKind::Choice(choices) => {
                if choices.contains(&raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(LoadError::InvalidChoice {
                        path: self.path.to_string(),
                        value: raw.to_string(),
                        choices: choices.join(", "),
                    })
                }
            }
            FieldKind::ServiceJson => {
                let service =
                    ServiceDescriptor::from_json(raw).map_err(|e| invalid(e.to_string()))?;
                Value::try_from(service).map_err(|e| invalid(e.to_string()))
            }
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<34} <{}> {}",
            self.path,
            self.kind.type_name(),
            self.description
        )?;
        if !self.default.is_empty() {
            write!(f, " (default: {})", self.default)?;
        }
        if let Some(choices) = self.choices() {
            write!(f, " [{}]", choices.join("|"))?;
        }
        Ok(())
    }
}

const fn field(
    path: &'static str,
    kind: FieldKind,
    default: &'static str,
    description: &'static str,
) -> FieldSpec {
    FieldSpec {
        path,
        kind,
        default,
        description,
    }
}

#[rustfmt::skip]
pub static FIELDS: &[FieldSpec] = &[
    field("listenaddr", Str, "", "The interface we should listen on for client requests."),
    field("servername", Str, "", "Server name (FQDN) to use for the TLS certificate."),
    field("autocert", Bool, "false", "Automatically create a Let's Encrypt cert using servername."),
    field("insecure", Bool, "false", "Listen without TLS on incoming connections."),
    field("staticroot", Path, "", "The folder where the static content is located."),
    field("servestatic", Bool, "false", "Serve static content from staticroot."),
    field("dbbackend", Choice(BackendKind::NAMES), "etcd", "The database backend used for storing tokens and secrets."),
    field("sqlite.skipmigrations", Bool, "false", "Skip applying migrations on startup."),
    field("sqlite.dbfile", Path, "<app data dir>/tollgate.db", "The full path to the database file."),
    field("postgres.skipmigrations", Bool, "false", "Skip applying migrations on startup."),
    field("postgres.host", Str, "", "Database server hostname."),
    field("postgres.port", Port, "0", "Database server port."),
    field("postgres.user", Str, "", "Database user."),
    field("postgres.password", Str, "", "Database user's password."),
    field("postgres.dbname", Str, "", "Database name to use."),
    field("postgres.maxconnections", Count, "0", "Maximum number of open connections, 0 for no limit."),
    field("postgres.maxidleconnections", Count, "0", "Maximum number of idle connections."),
    field("postgres.connmaxlifetime", Duration, "0s", "Maximum time a connection may be reused."),
    field("postgres.connmaxidletime", Duration, "0s", "Maximum time a connection may be idle."),
    field("postgres.requiressl", Bool, "false", "Require TLS for the database connection."),
    field("etcd.host", Str, "", "host:port of an active etcd instance."),
    field("etcd.user", Str, "", "User authorized to access the etcd host."),
    field("etcd.password", Str, "", "Password of the etcd user."),
    field("authenticator.lndhost", Str, "", "Hostname of the LND instance to connect to."),
    field("authenticator.tlspath", Path, "", "Path to the LND instance's TLS certificate."),
    field("authenticator.macdir", Path, "", "Directory containing the LND instance's macaroons."),
    field("authenticator.network", Choice(Network::NAMES), "", "The network LND is connected to."),
    field("authenticator.disable", Bool, "false", "Disable LND authentication."),
    field("tor.control", Str, "", "The host:port of the Tor instance."),
    field("tor.listenport", Port, "0", "Local port for client requests arriving over Tor."),
    field("tor.virtualport", Port, "0", "The port through which the onion services can be reached."),
    field("tor.v3", Bool, "false", "Listen for client requests through a v3 onion service."),
    field("services", ServiceJson, "", "Configuration for one backend service, repeatable."),
    field("hashmail.enabled", Bool, "false", "Run the mailbox server."),
    field("hashmail.messagerate", Duration, "0s", "The average minimum time between each message."),
    field("hashmail.messageburstallowance", Count, "0", "The burst rate allowed for messages."),
    field("hashmail.staletimeout", StaleTimeout, "0s", "Idle time before a mailbox is removed, -1s to disable."),
    field("prometheus.enabled", Bool, "false", "Expose a Prometheus metrics endpoint."),
    field("prometheus.listenaddr", Str, "", "The interface the metrics endpoint listens on."),
    field("debuglevel", Str, "info", "Log level for all targets, or target=level pairs."),
    field("configfile", Path, "", "Custom path to a config file."),
    field("basedir", Path, "", "Directory to place all of tollgate's files in."),
    field("profile", Port, "0", "Serve the profiling endpoint on this port, 0 to disable."),
];

/// Find a field by dotted path. Paths are case-insensitive.
pub fn lookup(path: &str) -> Option<&'static FieldSpec> {
    let path = path.trim().to_ascii_lowercase();
    FIELDS.iter().find(|f| f.path == path)
}

/// One line per field, for `--listfields`.
pub fn render_help() -> String {
    FIELDS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

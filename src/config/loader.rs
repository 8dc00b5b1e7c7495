//! Configuration loading from disk and `key=value` overrides.
//!
//! Layers, lowest first: [`Config::new_default`], the TOML config file,
//! then overrides. The merged table is decoded once, so the order of keys
//! inside a layer never matters.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use toml::{Table, Value};

use crate::config::fields;
use crate::config::paths::AppDataDir;
use crate::config::schema::{Config, DEFAULT_CONFIG_FILENAME};
use crate::config::validation::ConfigError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Decode(#[source] toml::de::Error),

    #[error("unknown config field: {0}")]
    UnknownField(String),

    #[error("malformed override '{0}', expected key=value")]
    MalformedOverride(String),

    #[error("invalid value '{value}' for {path}: {reason}")]
    InvalidValue {
        path: String,
        value: String,
        reason: String,
    },

    #[error("invalid value '{value}' for {path}, expected one of: {choices}")]
    InvalidChoice {
        path: String,
        value: String,
        choices: String,
    },

    #[error(transparent)]
    Validation(#[from] ConfigError),
}

/// A single `key=value` override, e.g. `authenticator.disable=true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub path: String,
    pub value: String,
}

impl FromStr for Override {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((path, value)) if !path.trim().is_empty() => Ok(Self {
                path: path.trim().to_string(),
                value: value.to_string(),
            }),
            _ => Err(LoadError::MalformedOverride(s.to_string())),
        }
    }
}

/// Where to look and what to apply on top.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub app_dir: AppDataDir,
    /// Explicit config file. Must exist when given.
    pub config_file: Option<PathBuf>,
    /// Replaces the app data dir as the home of the default config file.
    pub base_dir: Option<PathBuf>,
    pub overrides: Vec<Override>,
}

impl LoadOptions {
    pub fn new(app_dir: AppDataDir) -> Self {
        Self {
            app_dir,
            config_file: None,
            base_dir: None,
            overrides: Vec::new(),
        }
    }
}

/// Load, merge and validate the configuration.
pub fn load_config(options: &LoadOptions) -> Result<Config, LoadError> {
    let config = resolve_config(options)?;
    config.validate()?;
    Ok(config)
}

/// Load and merge without running the validation gate.
pub fn resolve_config(options: &LoadOptions) -> Result<Config, LoadError> {
    let defaults = Config::new_default(&options.app_dir);
    let mut root = match Value::try_from(&defaults)? {
        Value::Table(table) => table,
        _ => {
            return Err(LoadError::Encode(serde::ser::Error::custom(
                "configuration did not encode as a table",
            )))
        }
    };

    let (base_dir, config_file) = file_location(options);
    let (path, explicit) = match config_file {
        Some(path) => (path, true),
        None => {
            let base = base_dir
                .clone()
                .unwrap_or_else(|| options.app_dir.path().to_path_buf());
            (base.join(DEFAULT_CONFIG_FILENAME), false)
        }
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            let file: Table = toml::from_str(&content).map_err(|source| LoadError::Parse {
                path: path.clone(),
                source,
            })?;
            merge_tables(&mut root, file, "")?;
            root.insert("configfile".into(), path_value(&path));
            tracing::info!(path = %path.display(), "Loaded config file");
        }
        Err(e) if e.kind() == ErrorKind::NotFound && !explicit => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
        }
        Err(source) => return Err(LoadError::Io { path, source }),
    }

    // The directory the file was looked up in beats a `basedir` inside it.
    if let Some(base_dir) = &base_dir {
        root.insert("basedir".into(), path_value(base_dir));
    }

    for o in &options.overrides {
        apply_override(&mut root, o)?;
        tracing::debug!(field = %o.path, "Applied override");
    }

    Value::Table(root).try_into().map_err(LoadError::Decode)
}

/// Base dir and config file used to find the file, after `basedir=` and
/// `configfile=` overrides. Empty values fall back to the defaults.
fn file_location(options: &LoadOptions) -> (Option<PathBuf>, Option<PathBuf>) {
    let mut base_dir = options.base_dir.clone();
    let mut config_file = options.config_file.clone();

    for o in &options.overrides {
        let path = Some(PathBuf::from(&o.value)).filter(|p| !p.as_os_str().is_empty());
        match fields::lookup(&o.path).map(|spec| spec.path) {
            Some("basedir") => base_dir = path,
            Some("configfile") => config_file = path,
            _ => {}
        }
    }

    (base_dir, config_file)
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

/// Overlay `overlay` onto `base`, rejecting keys the schema does not know.
fn merge_tables(base: &mut Table, overlay: Table, prefix: &str) -> Result<(), LoadError> {
    for (key, value) in overlay {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let value = match (base.get_mut(&key), value) {
            (Some(Value::Table(inner)), Value::Table(table)) => {
                merge_tables(inner, table, &path)?;
                continue;
            }
            (_, value) => value,
        };

        match fields::lookup(&path) {
            Some(spec) if spec.path == path => {}
            _ => return Err(LoadError::UnknownField(path)),
        }
        base.insert(key, value);
    }
    Ok(())
}

/// Set one dotted path, typed through the field schema.
fn apply_override(root: &mut Table, o: &Override) -> Result<(), LoadError> {
    let spec = fields::lookup(&o.path).ok_or_else(|| LoadError::UnknownField(o.path.clone()))?;
    let value = spec.parse(&o.value)?;

    let mut segments: Vec<&str> = spec.path.split('.').collect();
    let leaf = segments.pop().unwrap_or(spec.path);

    let mut table = root;
    for segment in segments {
        let entry = table
            .entry(segment.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        table = match entry {
            Value::Table(inner) => inner,
            _ => return Err(LoadError::UnknownField(spec.path.to_string())),
        };
    }

    if spec.is_repeated() {
        match table
            .entry(leaf.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => items.push(value),
            slot => *slot = Value::Array(vec![value]),
        }
    } else {
        table.insert(leaf.to_string(), value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_parsing() {
        let o: Override = "authenticator.lndhost=localhost:10009".parse().unwrap();
        assert_eq!(o.path, "authenticator.lndhost");
        assert_eq!(o.value, "localhost:10009");

        let o: Override = "servername=".parse().unwrap();
        assert_eq!(o.value, "");

        assert!("listenaddr".parse::<Override>().is_err());
        assert!("=value".parse::<Override>().is_err());
    }

    #[test]
    fn test_merge_nested_tables() {
        let mut base: Table = toml::from_str(
            r#"
            listenaddr = ""
            [tor]
            control = ""
            v3 = false
            "#,
        )
        .unwrap();
        let overlay: Table = toml::from_str(
            r#"
            listenaddr = "0.0.0.0:8081"
            [tor]
            v3 = true
            "#,
        )
        .unwrap();

        merge_tables(&mut base, overlay, "").unwrap();
        assert_eq!(base["listenaddr"].as_str(), Some("0.0.0.0:8081"));
        assert_eq!(base["tor"]["v3"].as_bool(), Some(true));
        assert_eq!(base["tor"]["control"].as_str(), Some(""));
    }

    #[test]
    fn test_merge_rejects_unknown_keys() {
        let mut base: Table = toml::from_str("[tor]\ncontrol = \"\"").unwrap();
        let overlay: Table = toml::from_str("[tor]\ncontroll = \"x\"").unwrap();
        match merge_tables(&mut base, overlay, "") {
            Err(LoadError::UnknownField(path)) => assert_eq!(path, "tor.controll"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_services_override_appends() {
        let mut root = Table::new();
        for name in ["a", "b"] {
            let o = Override {
                path: "services".into(),
                value: format!(r#"{{"name": "{name}"}}"#),
            };
            apply_override(&mut root, &o).unwrap();
        }
        let services = root["services"].as_array().unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[1]["name"].as_str(), Some("b"));
    }
}

//! tollgate start-up configuration check.
//!
//! ```text
//! AppDataDir ──▶ defaults ──▶ config file ──▶ --set overrides ──▶ validate
//!                                                                   │
//!                                  logging initialized from debuglevel
//!                                                                   │
//!                                                 effective settings reported
//! ```
//!
//! Exits non-zero when the configuration is rejected.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tollgate::config::{fields, load_config, AppDataDir, Backend, Config, LoadOptions, Override};
use tollgate::observability::logging::init_logging;
use tollgate::APP_NAME;

#[derive(Parser)]
#[command(name = "tollgate", version)]
#[command(about = "Configuration check for the tollgate reverse proxy", long_about = None)]
struct Cli {
    /// Custom path to a config file.
    #[arg(long = "configfile")]
    config_file: Option<PathBuf>,

    /// Directory to place all of tollgate's files in.
    #[arg(long = "basedir")]
    base_dir: Option<PathBuf>,

    /// Override a config field, e.g. --set authenticator.disable=true
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<Override>,

    /// List every config field and exit.
    #[arg(long = "listfields")]
    list_fields: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_fields {
        println!("{}", fields::render_help());
        return ExitCode::SUCCESS;
    }

    let app_dir = AppDataDir::for_app(APP_NAME);
    let options = LoadOptions {
        app_dir: app_dir.clone(),
        config_file: cli.config_file,
        base_dir: cli.base_dir,
        overrides: cli.overrides,
    };

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{APP_NAME}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.debug_level) {
        eprintln!("{APP_NAME}: {e}");
        return ExitCode::FAILURE;
    }

    report(&config, &app_dir);
    ExitCode::SUCCESS
}

fn report(config: &Config, app_dir: &AppDataDir) {
    tracing::info!(
        listen_addr = %config.listen_addr,
        insecure = config.insecure,
        auto_cert = config.auto_cert,
        base_dir = %config.effective_base_dir(app_dir).display(),
        "Configuration loaded"
    );

    match config.backend() {
        Backend::Etcd(etcd) => tracing::info!(host = %etcd.host, "Using etcd backend"),
        Backend::Sqlite(sqlite) => tracing::info!(
            path = %sqlite.database_file.display(),
            skip_migrations = sqlite.skip_migrations,
            "Using sqlite backend"
        ),
        Backend::Postgres(pg) => tracing::info!(dsn = %pg.dsn(true), "Using postgres backend"),
    }

    match config.authenticator.endpoint() {
        Some(lnd) => tracing::info!(
            host = %lnd.host,
            network = ?lnd.network,
            "Authenticator enabled"
        ),
        None => tracing::warn!("Authenticator disabled, requests are not checked"),
    }

    for service in &config.services {
        tracing::debug!(name = service.name().unwrap_or("<unnamed>"), "Service configured");
    }

    if config.hashmail.enabled {
        tracing::info!(
            message_rate = ?config.hashmail.message_rate,
            burst = config.hashmail.message_burst_allowance,
            stale_timeout = %config.hashmail.stale_timeout,
            "Mailbox server enabled"
        );
    }
    if config.prometheus.enabled {
        tracing::info!(listen_addr = %config.prometheus.listen_addr, "Metrics endpoint enabled");
    }
    if !config.tor.control.is_empty() {
        tracing::info!(
            control = %config.tor.control,
            v3 = config.tor.v3,
            "Tor onion service configured"
        );
    }
}

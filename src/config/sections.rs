//! Leaf groups for the collaborators started next to the proxy: the Tor
//! onion service, the hashmail mailbox server and the Prometheus endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::duration::{humantime_serde, StaleTimeout};

/// Tor onion service settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TorConfig {
    /// `host:port` of the Tor control port.
    pub control: String,

    /// Local port for client requests arriving over Tor. Only the onion
    /// service should reach it.
    #[serde(rename = "listenport")]
    pub listen_port: u16,

    /// Port the onion service is reachable at.
    #[serde(rename = "virtualport")]
    pub virtual_port: u16,

    /// Serve through a v3 onion service.
    pub v3: bool,
}

/// Mailbox (hashmail) server rate policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HashMailConfig {
    pub enabled: bool,

    /// Average minimum time between two messages.
    #[serde(rename = "messagerate", with = "humantime_serde")]
    pub message_rate: Duration,

    /// Messages allowed in a burst above the rate.
    #[serde(rename = "messageburstallowance")]
    pub message_burst_allowance: u32,

    /// Idle time after which a mailbox is removed.
    #[serde(rename = "staletimeout")]
    pub stale_timeout: StaleTimeout,
}

/// Prometheus scrape endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrometheusConfig {
    pub enabled: bool,

    /// Address the metrics endpoint binds to.
    #[serde(rename = "listenaddr")]
    pub listen_addr: String,
}

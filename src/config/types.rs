use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::orchestration::{Timing, DEFAULT_PRE_WAIT, DEFAULT_RECHECK_INTERVAL};
use crate::syncthing_client::HttpSettings;

/// Group used when none is named on the command line.
pub const DEFAULT_GROUP: &str = "general";

/// Configuration file contents. Loaded once at startup and passed down explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Group name to ordered device names.
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub devices: BTreeMap<String, DeviceConfig>,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// REST base, e.g. `http://nas:8384/rest`.
    pub api: String,

    /// Optional here so it can come from the environment instead.
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_before_status_check_secs")]
    pub before_status_check_secs: u64,

    #[serde(default = "default_status_check_interval_secs")]
    pub status_check_interval_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            before_status_check_secs: default_before_status_check_secs(),
            status_check_interval_secs: default_status_check_interval_secs(),
        }
    }
}

impl From<&TimingConfig> for Timing {
    fn from(config: &TimingConfig) -> Self {
        Timing {
            pre_wait: Duration::from_secs(config.before_status_check_secs),
            recheck_interval: Duration::from_secs(config.status_check_interval_secs),
        }
    }
}

fn default_before_status_check_secs() -> u64 {
    DEFAULT_PRE_WAIT.as_secs()
}

fn default_status_check_interval_secs() -> u64 {
    DEFAULT_RECHECK_INTERVAL.as_secs()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Syncthing ships a self-signed GUI certificate; enable to talk HTTPS to it.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl From<&HttpConfig> for HttpSettings {
    fn from(config: &HttpConfig) -> Self {
        HttpSettings {
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Upper bound for one triggered run. Unset means wait until converged.
    #[serde(default)]
    pub run_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            run_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

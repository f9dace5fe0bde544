use std::env;
use std::path::Path;

use reqwest::header::HeaderValue;
use reqwest::Url;
use tokio::fs;
use tracing::{debug, info};

use crate::orchestration::Timing;
use crate::syncthing_client::{Endpoint, HttpSettings};
use crate::types::ConfigError;

use super::Config;

impl Config {
    /// Read and parse the config file. A missing or malformed file is an error;
    /// there is nothing sensible to sync without one.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::parse(path, &contents)?;
        info!(
            path = %path.display(),
            groups = config.groups.len(),
            devices = config.devices.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timing(&self) -> Timing {
        Timing::from(&self.timing)
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings::from(&self.http)
    }

    /// Endpoints of `group` in configured order, API keys from env taking precedence.
    pub fn endpoints(&self, group: &str) -> Result<Vec<Endpoint>, ConfigError> {
        self.endpoints_with_env(group, |name| env::var(name).ok())
    }

    pub fn endpoints_with_env<F>(&self, group: &str, lookup: F) -> Result<Vec<Endpoint>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let devices = self
            .groups
            .get(group)
            .ok_or_else(|| ConfigError::UnknownGroup(group.to_string()))?;
        if devices.is_empty() {
            return Err(ConfigError::EmptyGroup(group.to_string()));
        }

        let mut endpoints = Vec::with_capacity(devices.len());
        for name in devices {
            let name = name.trim();
            let device = self
                .devices
                .get(name)
                .ok_or_else(|| ConfigError::UnknownDevice {
                    group: group.to_string(),
                    device: name.to_string(),
                })?;

            let api = device.api.trim();
            validate_api_url(name, api)?;

            let env_var = key_env_var(name);
            let key = lookup(&env_var)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| device.key.clone().filter(|value| !value.trim().is_empty()))
                .ok_or_else(|| ConfigError::MissingApiKey {
                    device: name.to_string(),
                    env_var: env_var.clone(),
                })?;
            let key = key.trim();
            validate_api_key(name, key)?;

            debug!(device = name, api, "Configured endpoint");
            endpoints.push(Endpoint::new(name, api, key));
        }

        Ok(endpoints)
    }
}

/// `STSYNC_KEY_<DEVICE>`, device name upper-cased with non-alphanumerics as `_`.
pub(super) fn key_env_var(device: &str) -> String {
    let suffix: String = device
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("STSYNC_KEY_{suffix}")
}

fn validate_api_url(device: &str, api: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        device: device.to_string(),
        url: api.to_string(),
        reason,
    };

    let url = Url::parse(api).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// The key travels in the `X-API-Key` header and must be a valid header value.
fn validate_api_key(device: &str, key: &str) -> Result<(), ConfigError> {
    HeaderValue::from_str(key)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidApiKey {
            device: device.to_string(),
        })
}

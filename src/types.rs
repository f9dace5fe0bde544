use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single request against one daemon's control API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, DNS, timeout, truncated body.
    #[error("{url} unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The daemon answered, but with a non-2xx status or a body we could not parse.
    #[error("{url} returned a bad response: {reason}")]
    BadResponse { url: String, reason: String },
}

impl ClientError {
    pub fn unreachable(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Unreachable {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn bad_response(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// The orchestration stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Trigger,
    Wait,
    Deadline,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Resolve => "resolve",
            Stage::Trigger => "trigger",
            Stage::Wait => "wait",
            Stage::Deadline => "deadline",
        };
        f.write_str(name)
    }
}

/// Terminal outcome of a failed sync run. Every variant aborts the whole run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("empty folder {kind} given; nothing to sync")]
    EmptyDesignator { kind: &'static str },

    #[error("error while looking up folder on {endpoint}: {source}")]
    ResolutionFailed {
        endpoint: String,
        #[source]
        source: ClientError,
    },

    #[error("folder {designator} not found on any device")]
    FolderNotFound { designator: String },

    #[error("error while triggering scan on {endpoint}: {source}")]
    TriggerFailed {
        endpoint: String,
        #[source]
        source: ClientError,
    },

    #[error("error while waiting for completion on {endpoint}: {source}")]
    StatusCheckFailed {
        endpoint: String,
        #[source]
        source: ClientError,
    },

    #[error("folder {designator} did not sync within {}s", .deadline.as_secs())]
    DeadlineExceeded {
        designator: String,
        deadline: Duration,
    },
}

impl SyncError {
    pub fn stage(&self) -> Stage {
        match self {
            SyncError::EmptyDesignator { .. }
            | SyncError::ResolutionFailed { .. }
            | SyncError::FolderNotFound { .. } => Stage::Resolve,
            SyncError::TriggerFailed { .. } => Stage::Trigger,
            SyncError::StatusCheckFailed { .. } => Stage::Wait,
            SyncError::DeadlineExceeded { .. } => Stage::Deadline,
        }
    }

    /// The endpoint that caused the failure, if a specific one did.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            SyncError::ResolutionFailed { endpoint, .. }
            | SyncError::TriggerFailed { endpoint, .. }
            | SyncError::StatusCheckFailed { endpoint, .. } => Some(endpoint),
            SyncError::EmptyDesignator { .. }
            | SyncError::FolderNotFound { .. }
            | SyncError::DeadlineExceeded { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot determine config directory; pass --config or set STSYNC_CONFIG")]
    NoConfigDir,

    #[error("group '{0}' is not defined")]
    UnknownGroup(String),

    #[error("group '{0}' has no devices")]
    EmptyGroup(String),

    #[error("group '{group}' references unknown device '{device}'")]
    UnknownDevice { group: String, device: String },

    #[error("device '{device}' has an invalid api url '{url}': {reason}")]
    InvalidApiUrl {
        device: String,
        url: String,
        reason: String,
    },

    #[error("device '{device}' has no api key; set \"key\" or {env_var}")]
    MissingApiKey { device: String, env_var: String },

    #[error("device '{device}' has an api key that cannot be sent as an HTTP header")]
    InvalidApiKey { device: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

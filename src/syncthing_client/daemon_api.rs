use async_trait::async_trait;

use crate::types::ClientError;

use super::api::FolderConfig;
use super::models::{Endpoint, SyncStatus};

/// The three control-API calls the sync orchestration needs from a daemon.
///
/// Implementations must not retry; every failure is reported to the caller as-is.
#[async_trait]
pub trait DaemonApi: Send + Sync {
    /// Folder list from the daemon's configuration.
    async fn get_config(&self, endpoint: &Endpoint) -> Result<Vec<FolderConfig>, ClientError>;

    /// Ask the daemon to rescan `folder_id` now. Returns once the request is accepted,
    /// not when the scan completes.
    async fn trigger_rescan(&self, endpoint: &Endpoint, folder_id: &str) -> Result<(), ClientError>;

    /// Current sync counters for `folder_id`.
    async fn get_status(
        &self,
        endpoint: &Endpoint,
        folder_id: &str,
    ) -> Result<SyncStatus, ClientError>;
}

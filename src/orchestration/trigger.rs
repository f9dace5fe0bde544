use tracing::info;

use crate::syncthing_client::{DaemonApi, ResolvedFolder};
use crate::types::SyncError;

/// Request a rescan on every resolved folder, in order, stopping at the first failure.
/// Scans already accepted are left running.
pub async fn trigger_all<A>(api: &A, folders: &[ResolvedFolder]) -> Result<(), SyncError>
where
    A: DaemonApi + ?Sized,
{
    for folder in folders {
        info!(
            endpoint = %folder.endpoint.name,
            folder_id = %folder.folder_id,
            "Triggering scan"
        );
        api.trigger_rescan(&folder.endpoint, &folder.folder_id)
            .await
            .map_err(|source| SyncError::TriggerFailed {
                endpoint: folder.endpoint.to_string(),
                source,
            })?;
    }
    Ok(())
}

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::syncthing_client::{DaemonApi, ResolvedFolder};
use crate::types::SyncError;

use super::Timing;

/// Wait until every folder reports convergence, one folder after the other.
///
/// Sleeps `timing.pre_wait` once up front so freshly triggered scans can start, then
/// polls each folder every `timing.recheck_interval`. There is no upper bound on the
/// wait; callers wanting one wrap this in a timeout. Returns the number of status reads
/// spent on each folder.
pub async fn wait_all<A>(
    api: &A,
    folders: &[ResolvedFolder],
    timing: &Timing,
) -> Result<Vec<usize>, SyncError>
where
    A: DaemonApi + ?Sized,
{
    info!(
        seconds = timing.pre_wait.as_secs_f64(),
        "Waiting before first status check"
    );
    sleep(timing.pre_wait).await;

    let mut reads = Vec::with_capacity(folders.len());
    for folder in folders {
        reads.push(wait_one(api, folder, timing.recheck_interval).await?);
    }
    Ok(reads)
}

async fn wait_one<A>(
    api: &A,
    folder: &ResolvedFolder,
    recheck_interval: Duration,
) -> Result<usize, SyncError>
where
    A: DaemonApi + ?Sized,
{
    info!(
        endpoint = %folder.endpoint.name,
        folder_id = %folder.folder_id,
        "Checking status"
    );

    let mut reads = 0;
    loop {
        let status = api
            .get_status(&folder.endpoint, &folder.folder_id)
            .await
            .map_err(|source| SyncError::StatusCheckFailed {
                endpoint: folder.endpoint.to_string(),
                source,
            })?;
        reads += 1;

        if status.is_converged() {
            info!(
                endpoint = %folder.endpoint.name,
                folder_id = %folder.folder_id,
                reads,
                "Synced"
            );
            return Ok(reads);
        }

        debug!(
            endpoint = %folder.endpoint.name,
            folder_id = %folder.folder_id,
            need_bytes = status.need_bytes,
            need_files = status.need_files,
            "Not synced yet"
        );
        sleep(recheck_interval).await;
    }
}

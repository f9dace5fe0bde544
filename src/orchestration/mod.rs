//! Resolve → trigger → wait, over one designator and one ordered endpoint list.
//!
//! Every run is stateless: the resolved folder set is derived from live queries,
//! fixed once resolution finishes, and shared by the trigger and wait stages.

mod resolver;
mod trigger;
mod waiter;

#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use tracing::info;

use crate::syncthing_client::{DaemonApi, Endpoint, FolderDesignator, ResolvedFolder};
use crate::types::SyncError;

pub use resolver::resolve;
pub use trigger::trigger_all;
pub use waiter::wait_all;

pub const DEFAULT_PRE_WAIT: Duration = Duration::from_secs(5);
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_secs(2);

/// Delays used by the convergence wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Applied once after triggering, before the first status read.
    pub pre_wait: Duration,
    /// Applied between two status reads of the same folder.
    pub recheck_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            pre_wait: DEFAULT_PRE_WAIT,
            recheck_interval: DEFAULT_RECHECK_INTERVAL,
        }
    }
}

/// Outcome of a successful run: every resolved folder converged.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub designator: FolderDesignator,
    pub folders: Vec<FolderReport>,
}

#[derive(Debug, Clone)]
pub struct FolderReport {
    pub folder: ResolvedFolder,
    pub status_reads: usize,
}

/// Sync one folder across `endpoints` and block until all of them converge.
pub async fn sync<A>(
    api: &A,
    designator: &FolderDesignator,
    endpoints: &[Endpoint],
    timing: &Timing,
) -> Result<SyncReport, SyncError>
where
    A: DaemonApi + ?Sized,
{
    let folders = resolve(api, designator, endpoints).await?;
    if folders.is_empty() {
        return Err(SyncError::FolderNotFound {
            designator: designator.to_string(),
        });
    }

    trigger_all(api, &folders).await?;
    let reads = wait_all(api, &folders, timing).await?;

    info!(folder = %designator, devices = folders.len(), "Folder in sync");
    Ok(SyncReport {
        designator: designator.clone(),
        folders: folders
            .into_iter()
            .zip(reads)
            .map(|(folder, status_reads)| FolderReport {
                folder,
                status_reads,
            })
            .collect(),
    })
}

/// [`sync`] with an optional overall deadline. `None` waits indefinitely.
///
/// Hitting the deadline drops the run wherever it is, possibly in the middle of a
/// request; scans already triggered keep running on their daemons.
pub async fn sync_with_deadline<A>(
    api: &A,
    designator: &FolderDesignator,
    endpoints: &[Endpoint],
    timing: &Timing,
    deadline: Option<Duration>,
) -> Result<SyncReport, SyncError>
where
    A: DaemonApi + ?Sized,
{
    let Some(deadline) = deadline else {
        return sync(api, designator, endpoints, timing).await;
    };

    tokio::time::timeout(deadline, sync(api, designator, endpoints, timing))
        .await
        .map_err(|_| SyncError::DeadlineExceeded {
            designator: designator.to_string(),
            deadline,
        })?
}

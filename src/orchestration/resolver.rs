use tracing::{info, warn};

use crate::syncthing_client::{DaemonApi, Endpoint, FolderDesignator, ResolvedFolder};
use crate::types::SyncError;

/// Find every (endpoint, folder id) pair the designator refers to.
///
/// Endpoints are queried one at a time in the given order. An endpoint that answers
/// but has no matching folder is skipped; one that fails to answer aborts resolution.
/// An empty result is not an error here; an empty designator is, since as a label
/// it would select every unlabeled folder on every device.
pub async fn resolve<A>(
    api: &A,
    designator: &FolderDesignator,
    endpoints: &[Endpoint],
) -> Result<Vec<ResolvedFolder>, SyncError>
where
    A: DaemonApi + ?Sized,
{
    if designator.as_str().trim().is_empty() {
        return Err(SyncError::EmptyDesignator {
            kind: designator.kind(),
        });
    }

    let mut resolved = Vec::new();

    for endpoint in endpoints {
        info!(
            endpoint = %endpoint.name,
            folder = %designator,
            by = designator.kind(),
            "Looking up folder"
        );
        let folders = api
            .get_config(endpoint)
            .await
            .map_err(|source| SyncError::ResolutionFailed {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let before = resolved.len();
        let matches = match designator {
            // Folder ids are unique within one daemon.
            FolderDesignator::Id(_) => folders
                .iter()
                .find(|folder| designator.matches(folder))
                .into_iter()
                .collect::<Vec<_>>(),
            FolderDesignator::Label(_) => folders
                .iter()
                .filter(|folder| designator.matches(folder))
                .collect(),
        };
        for folder in matches {
            info!(endpoint = %endpoint.name, folder_id = %folder.id, "Found folder");
            resolved.push(ResolvedFolder::new(endpoint.clone(), folder.id.clone()));
        }

        match resolved.len() - before {
            0 => info!(endpoint = %endpoint.name, "Folder not configured on this device"),
            1 => {}
            n => warn!(
                endpoint = %endpoint.name,
                matches = n,
                "Label matches several folders on this device; syncing all of them"
            ),
        }
    }

    Ok(resolved)
}

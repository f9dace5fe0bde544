use serde::Deserialize;

/// Live counters from `/db/status` for one folder. Read fresh on every poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub global_bytes: u64,
    pub local_bytes: u64,
    pub global_deleted: u64,
    pub local_deleted: u64,
    pub global_files: u64,
    pub local_files: u64,
    pub in_sync_bytes: u64,
    pub in_sync_files: u64,
    pub need_bytes: u64,
    pub need_files: u64,
}

impl SyncStatus {
    /// The local replica matches the global state and nothing is pending.
    pub fn is_converged(&self) -> bool {
        self.global_bytes == self.local_bytes
            && self.global_deleted == self.local_deleted
            && self.global_files == self.local_files
            && self.in_sync_bytes == self.local_bytes
            && self.in_sync_files == self.local_files
            && self.need_bytes == 0
            && self.need_files == 0
    }
}

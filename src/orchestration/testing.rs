//! In-memory daemons for exercising the orchestration without HTTP.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::syncthing_client::{DaemonApi, Endpoint, FolderConfig, SyncStatus};
use crate::types::ClientError;

pub fn endpoint(name: &str) -> Endpoint {
    Endpoint::new(name, format!("http://{name}:8384/rest"), format!("key-{name}"))
}

pub fn converged() -> SyncStatus {
    SyncStatus {
        global_bytes: 100,
        local_bytes: 100,
        global_deleted: 2,
        local_deleted: 2,
        global_files: 10,
        local_files: 10,
        in_sync_bytes: 100,
        in_sync_files: 10,
        need_bytes: 0,
        need_files: 0,
    }
}

pub fn pending(need_bytes: u64) -> SyncStatus {
    SyncStatus {
        in_sync_bytes: 100 - need_bytes,
        in_sync_files: 9,
        need_bytes,
        need_files: 1,
        ..converged()
    }
}

/// Virtual-clock durations land on exact millisecond ticks; allow a little slack anyway.
pub fn assert_elapsed(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(5),
        "expected {expected:?}, got {actual:?}"
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: String,
    pub folder_id: String,
}

impl Call {
    pub fn new(endpoint: &str, folder_id: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            folder_id: folder_id.to_string(),
        }
    }
}

#[derive(Default)]
struct Recorded {
    statuses: HashMap<(String, String), VecDeque<SyncStatus>>,
    triggers: Vec<Call>,
    status_reads: Vec<(Call, Instant)>,
}

/// Scriptable daemons keyed by endpoint name.
///
/// Status scripts are consumed one entry per read; the last entry repeats forever.
/// A folder without a script reports converged.
#[derive(Default)]
pub struct FakeDaemons {
    folders: HashMap<String, Vec<FolderConfig>>,
    unreachable: HashSet<String>,
    failing_trigger: HashSet<String>,
    failing_status: HashSet<String>,
    recorded: Mutex<Recorded>,
}

impl FakeDaemons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folders(mut self, endpoint: &str, folders: &[(&str, &str)]) -> Self {
        let folders = folders
            .iter()
            .map(|(id, label)| FolderConfig {
                id: id.to_string(),
                label: Some(label.to_string()),
                path: None,
                paused: None,
            })
            .collect();
        self.folders.insert(endpoint.to_string(), folders);
        self
    }

    pub fn with_folder_configs(mut self, endpoint: &str, folders: Vec<FolderConfig>) -> Self {
        self.folders.insert(endpoint.to_string(), folders);
        self
    }

    pub fn with_statuses(mut self, endpoint: &str, folder_id: &str, script: Vec<SyncStatus>) -> Self {
        self.recorded
            .get_mut()
            .unwrap()
            .statuses
            .insert((endpoint.to_string(), folder_id.to_string()), script.into());
        self
    }

    pub fn unreachable(mut self, endpoint: &str) -> Self {
        self.unreachable.insert(endpoint.to_string());
        self
    }

    pub fn failing_trigger(mut self, endpoint: &str) -> Self {
        self.failing_trigger.insert(endpoint.to_string());
        self
    }

    pub fn failing_status(mut self, endpoint: &str) -> Self {
        self.failing_status.insert(endpoint.to_string());
        self
    }

    pub fn triggers(&self) -> Vec<Call> {
        self.recorded.lock().unwrap().triggers.clone()
    }

    pub fn status_reads(&self) -> Vec<Call> {
        self.recorded
            .lock()
            .unwrap()
            .status_reads
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    pub fn status_read_times(&self) -> Vec<Instant> {
        self.recorded
            .lock()
            .unwrap()
            .status_reads
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }

    fn refused(endpoint: &Endpoint, path: &str) -> ClientError {
        ClientError::unreachable(
            endpoint.url(path),
            io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        )
    }
}

#[async_trait]
impl DaemonApi for FakeDaemons {
    async fn get_config(&self, endpoint: &Endpoint) -> Result<Vec<FolderConfig>, ClientError> {
        if self.unreachable.contains(&endpoint.name) {
            return Err(Self::refused(endpoint, "/system/config"));
        }
        self.folders
            .get(&endpoint.name)
            .cloned()
            .ok_or_else(|| ClientError::bad_response(endpoint.url("/system/config"), "HTTP 404"))
    }

    async fn trigger_rescan(&self, endpoint: &Endpoint, folder_id: &str) -> Result<(), ClientError> {
        self.recorded
            .lock()
            .unwrap()
            .triggers
            .push(Call::new(&endpoint.name, folder_id));

        if self.unreachable.contains(&endpoint.name) {
            return Err(Self::refused(endpoint, "/db/scan"));
        }
        if self.failing_trigger.contains(&endpoint.name) {
            return Err(ClientError::bad_response(endpoint.url("/db/scan"), "HTTP 500"));
        }
        Ok(())
    }

    async fn get_status(
        &self,
        endpoint: &Endpoint,
        folder_id: &str,
    ) -> Result<SyncStatus, ClientError> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded
            .status_reads
            .push((Call::new(&endpoint.name, folder_id), Instant::now()));

        if self.unreachable.contains(&endpoint.name) {
            return Err(Self::refused(endpoint, "/db/status"));
        }
        if self.failing_status.contains(&endpoint.name) {
            return Err(ClientError::bad_response(endpoint.url("/db/status"), "HTTP 500"));
        }

        let key = (endpoint.name.clone(), folder_id.to_string());
        let status = match recorded.statuses.get_mut(&key) {
            Some(script) if script.len() > 1 => script.pop_front().unwrap_or_else(converged),
            Some(script) => script.front().copied().unwrap_or_else(converged),
            None => converged(),
        };
        Ok(status)
    }
}

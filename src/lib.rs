//! Trigger a Syncthing folder rescan on several devices and wait until every one of
//! them reports the folder fully in sync.

pub mod config;
pub mod logging;
pub mod orchestration;
pub mod server;
pub mod syncthing_client;
pub mod types;

pub use orchestration::{sync, sync_with_deadline, SyncReport, Timing};
pub use syncthing_client::{DaemonApi, Endpoint, FolderDesignator, ResolvedFolder, SyncStatus};
pub use types::{ClientError, ConfigError, Stage, SyncError};

pub mod api;
mod client;
mod daemon_api;
pub mod models;

pub use api::FolderConfig;
pub use client::{HttpSettings, SyncthingClient};
pub use daemon_api::DaemonApi;
pub use models::{Endpoint, FolderDesignator, ResolvedFolder, SyncStatus};

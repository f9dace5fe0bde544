mod queries;
mod types;

pub use queries::FolderQuery;
pub use types::{FolderConfig, SyncthingConfig};

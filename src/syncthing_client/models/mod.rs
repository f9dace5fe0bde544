mod endpoint;
mod folder;
mod status;

pub use endpoint::Endpoint;
pub use folder::{FolderDesignator, ResolvedFolder};
pub use status::SyncStatus;

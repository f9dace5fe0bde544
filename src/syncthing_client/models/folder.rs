use std::fmt;

use crate::syncthing_client::api::FolderConfig;

use super::Endpoint;

/// How the user named the folder to sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderDesignator {
    /// Syncthing folder id, e.g. `abcde-fghij`.
    Id(String),
    /// Human-readable label. Need not be unique, nor map to the same id on every device.
    Label(String),
}

impl FolderDesignator {
    pub fn as_str(&self) -> &str {
        match self {
            FolderDesignator::Id(value) | FolderDesignator::Label(value) => value,
        }
    }

    pub fn matches(&self, folder: &FolderConfig) -> bool {
        match self {
            FolderDesignator::Id(id) => folder.id == *id,
            // Syncthing reports unlabeled folders as "", older configs omit the field.
            FolderDesignator::Label(label) => folder.label.as_deref().unwrap_or("") == label,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FolderDesignator::Id(_) => "id",
            FolderDesignator::Label(_) => "label",
        }
    }
}

impl fmt::Display for FolderDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete (daemon, folder id) pair confirmed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFolder {
    pub endpoint: Endpoint,
    pub folder_id: String,
}

impl ResolvedFolder {
    pub fn new(endpoint: Endpoint, folder_id: impl Into<String>) -> Self {
        Self {
            endpoint,
            folder_id: folder_id.into(),
        }
    }
}

use serde::Deserialize;

/// The part of `/system/config` needed to locate folders.
#[derive(Debug, Deserialize)]
pub struct SyncthingConfig {
    pub folders: Vec<FolderConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FolderConfig {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub paused: Option<bool>,
}

impl FolderConfig {
    /// Label shown to operators; Syncthing falls back to the id when unset.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.id,
        }
    }
}

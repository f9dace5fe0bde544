use serde::Serialize;

/// `?folder=<id>` query shared by `/db/scan` and `/db/status`.
#[derive(Debug, Serialize)]
pub struct FolderQuery<'a> {
    pub folder: &'a str,
}

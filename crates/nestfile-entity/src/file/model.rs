//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nestfile_core::types::{FileId, UserId};

/// A file record.
///
/// The binary payload itself lives with the external storage collaborator;
/// `content_ref` is an opaque pointer to it and may be absent for a
/// placeholder record. A file whose folder was deleted is retained with
/// `folder_id = None` — unfiled, still owned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Storage-assigned internal key.
    #[serde(skip_serializing)]
    pub id: i64,
    /// Public opaque identifier used in all external references.
    pub public_id: FileId,
    /// File name.
    pub name: String,
    /// Opaque reference to the stored binary payload.
    pub content_ref: Option<String>,
    /// Internal key of the containing folder (None when unfiled).
    #[serde(skip_serializing)]
    pub folder_id: Option<i64>,
    /// The file owner.
    pub owner_id: UserId,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Check if the file is attached to a folder.
    pub fn is_filed(&self) -> bool {
        self.folder_id.is_some()
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone)]
pub struct CreateFile {
    /// File name.
    pub name: String,
    /// Opaque reference to the stored binary payload.
    pub content_ref: Option<String>,
    /// Internal key of the containing folder (None for unfiled).
    pub folder_id: Option<i64>,
    /// The file owner.
    pub owner_id: UserId,
}

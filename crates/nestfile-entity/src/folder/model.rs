//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nestfile_core::types::{FolderId, UserId};

/// A folder in a user's hierarchy.
///
/// The storage-assigned `id` and the internal `parent_id` reference are
/// kept out of serialized output; external callers only ever see
/// `public_id` (the same split the users table avoids by using its opaque
/// key as the primary key).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Storage-assigned internal key.
    #[serde(skip_serializing)]
    pub id: i64,
    /// Public opaque identifier used in all external references.
    pub public_id: FolderId,
    /// Folder name. Not required to be unique within a parent.
    pub name: String,
    /// Internal key of the parent folder (None for the root).
    #[serde(skip_serializing)]
    pub parent_id: Option<i64>,
    /// The folder owner.
    pub owner_id: UserId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Internal key of the parent folder (None for a root).
    pub parent_id: Option<i64>,
    /// The folder owner.
    pub owner_id: UserId,
}

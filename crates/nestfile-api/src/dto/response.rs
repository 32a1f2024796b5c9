//! Response DTOs.
//!
//! Everything serialized here carries public identifiers only; internal
//! keys never appear in a response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nestfile_core::types::{FileId, FolderId, UserId};
use nestfile_entity::file::File;
use nestfile_entity::folder::Folder;
use nestfile_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User key.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Folder summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderResponse {
    /// Public folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.public_id,
            name: folder.name,
            created_at: folder.created_at,
        }
    }
}

/// File summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    /// Public file identifier.
    pub id: FileId,
    /// File name.
    pub name: String,
    /// Opaque reference to the stored payload.
    pub content_ref: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        Self {
            id: file.public_id,
            name: file.name,
            content_ref: file.content_ref,
            created_at: file.created_at,
        }
    }
}

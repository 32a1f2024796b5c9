//! Request DTOs with validation.
//!
//! Folder references are plain strings here: either the `default`
//! sentinel or a public id, parsed into a selector by the handler.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Parent folder reference (`default` or a public id). Omitted means
    /// "under the caller's root".
    pub parent: Option<String>,
}

/// Rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Move folder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// New parent reference (`default` or a public id).
    pub new_parent: String,
}

/// Create file request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// File name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Folder reference (`default` or a public id); omit for an unfiled
    /// record.
    pub folder: Option<String>,
    /// Opaque reference to the uploaded payload.
    pub content_ref: Option<String>,
}

//! Folder tree view types for hierarchical display.
//!
//! Expansion is deliberately one level deep: a node lists summaries of its
//! immediate subfolders rather than expanding them recursively, which
//! bounds response size regardless of tree depth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nestfile_core::types::{FileId, FolderId};

use crate::file::File;
use crate::folder::Folder;

/// An expanded folder: its own attributes, summaries of direct
/// subfolders, and its files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Public folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// Immediate subfolders, not expanded further.
    pub subfolders: Vec<SubfolderSummary>,
    /// Files directly inside this folder.
    pub files: Vec<FileEntry>,
}

/// A subfolder reference inside a [`TreeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubfolderSummary {
    /// Public folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
}

/// A fully-serialized file inside a [`TreeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Public file identifier.
    pub id: FileId,
    /// File name.
    pub name: String,
    /// Opaque reference to the stored binary payload.
    pub content_ref: Option<String>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Folder> for SubfolderSummary {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.public_id,
            name: folder.name.clone(),
        }
    }
}

impl From<&File> for FileEntry {
    fn from(file: &File) -> Self {
        Self {
            id: file.public_id,
            name: file.name.clone(),
            content_ref: file.content_ref.clone(),
            created_at: file.created_at,
        }
    }
}

//! Shared core types: typed identifiers and caller-supplied selectors.

pub mod id;
pub mod selector;

pub use id::{FileId, FolderId, UserId};
pub use selector::{FolderSelector, UserSelector};

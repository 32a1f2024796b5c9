//! Folder entity and tree view types.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, Folder};
pub use tree::{FileEntry, SubfolderSummary, TreeNode};

//! Folder services: ownership-scoped CRUD and tree expansion.

pub mod service;
pub mod tree;

pub use service::FolderService;
pub use tree::TreeService;

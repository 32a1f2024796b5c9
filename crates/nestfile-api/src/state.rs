//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use nestfile_core::config::AppConfig;
use nestfile_service::file::FileService;
use nestfile_service::folder::{FolderService, TreeService};
use nestfile_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks only — handlers go
    /// through the services).
    pub db_pool: PgPool,
    /// User registration and retrieval.
    pub user_service: Arc<UserService>,
    /// Scoped folder operations.
    pub folder_service: Arc<FolderService>,
    /// Scoped file operations.
    pub file_service: Arc<FileService>,
    /// Folder tree expansion.
    pub tree_service: Arc<TreeService>,
}

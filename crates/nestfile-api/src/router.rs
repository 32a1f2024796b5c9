//! Route definitions for the Nestfile HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(user_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// User endpoints: registration and retrieval.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::register))
        .route("/users/{id}", get(handlers::user::get_user))
}

/// Folder CRUD and tree.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_folders))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", put(handlers::folder::rename_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
        .route(
            "/folders/{id}/files",
            get(handlers::folder::list_folder_files),
        )
}

/// File CRUD.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files", post(handlers::file::create_file))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

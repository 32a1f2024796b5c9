//! Folder CRUD and tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use nestfile_core::error::AppError;
use nestfile_core::types::FolderSelector;
use nestfile_entity::folder::TreeNode;

use crate::dto::request::{CreateFolderRequest, MoveFolderRequest, RenameFolderRequest};
use crate::dto::response::{ApiResponse, FileResponse, FolderResponse};
use crate::extractors::Principal;
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<ApiResponse<Vec<FolderResponse>>>, AppError> {
    let folders = state.folder_service.list(principal.context()).await?;
    let data = folders.into_iter().map(FolderResponse::from).collect();
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/folders/{id} — returns the folder expanded one level deep.
/// The literal `default` resolves to the caller's root.
pub async fn get_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TreeNode>>, AppError> {
    let selector: FolderSelector = id.parse()?;
    let tree = state
        .tree_service
        .expand(principal.context(), selector)
        .await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/folders/{id}/files
pub async fn list_folder_files(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, AppError> {
    let selector: FolderSelector = id.parse()?;
    let files = state
        .file_service
        .list_in(principal.context(), selector)
        .await?;
    let data = files.into_iter().map(FileResponse::from).collect();
    Ok(Json(ApiResponse::ok(data)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FolderResponse>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let parent = req
        .parent
        .as_deref()
        .map(str::parse::<FolderSelector>)
        .transpose()?;

    let folder = state
        .folder_service
        .create(principal.context(), &req.name, parent)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(FolderResponse::from(folder))),
    ))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(req): Json<RenameFolderRequest>,
) -> Result<Json<ApiResponse<FolderResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let selector: FolderSelector = id.parse()?;
    let folder = state
        .folder_service
        .rename(principal.context(), selector, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(FolderResponse::from(folder))))
}

/// PUT /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(req): Json<MoveFolderRequest>,
) -> Result<Json<ApiResponse<FolderResponse>>, AppError> {
    let selector: FolderSelector = id.parse()?;
    let new_parent: FolderSelector = req.new_parent.parse()?;
    let folder = state
        .folder_service
        .relocate(principal.context(), selector, new_parent)
        .await?;
    Ok(Json(ApiResponse::ok(FolderResponse::from(folder))))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let selector: FolderSelector = id.parse()?;
    state
        .folder_service
        .delete(principal.context(), selector)
        .await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Folder deleted" }),
    )))
}

//! File CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use nestfile_core::error::AppError;
use nestfile_core::types::{FileId, FolderSelector};

use crate::dto::request::CreateFileRequest;
use crate::dto::response::{ApiResponse, FileResponse};
use crate::extractors::Principal;
use crate::state::AppState;

fn parse_file_id(id: &str) -> Result<FileId, AppError> {
    id.parse::<FileId>()
        .map_err(|_| AppError::validation(format!("Malformed file identifier '{id}'")))
}

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, AppError> {
    let files = state.file_service.list(principal.context()).await?;
    let data = files.into_iter().map(FileResponse::from).collect();
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FileResponse>>, AppError> {
    let file_id = parse_file_id(&id)?;
    let file = state
        .file_service
        .resolve(principal.context(), file_id)
        .await?;
    Ok(Json(ApiResponse::ok(FileResponse::from(file))))
}

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateFileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FileResponse>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = req
        .folder
        .as_deref()
        .map(str::parse::<FolderSelector>)
        .transpose()?;

    let file = state
        .file_service
        .create(principal.context(), &req.name, folder, req.content_ref)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(FileResponse::from(file))),
    ))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let file_id = parse_file_id(&id)?;
    state
        .file_service
        .delete(principal.context(), file_id)
        .await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "File deleted" }),
    )))
}

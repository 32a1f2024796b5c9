//! User registration and retrieval handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use nestfile_core::error::AppError;
use nestfile_core::types::UserSelector;

use crate::dto::request::RegisterRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::Principal;
use crate::state::AppState;

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state.user_service.register(&req.username).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// GET /api/users/{id} — `default` resolves to the caller.
pub async fn get_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let selector: UserSelector = id.parse()?;
    let user = state.user_service.get(principal.context(), selector).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

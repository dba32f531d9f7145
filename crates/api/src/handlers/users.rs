use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use spark_core::{
    errors::SparkError,
    models::{
        profile::{GetProfileResponse, Profile, SaveProfileRequest},
        user::{LoginRequest, LoginResponse, RegisterUserRequest, RegisterUserResponse, User},
    },
};
use std::sync::Arc;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), AppError> {
    let response = state.accounts.register(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(state.accounts.login(payload).await?))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<GetProfileResponse>, AppError> {
    let profile = state.accounts.get_profile(&user_id).await?;
    Ok(Json(GetProfileResponse { user_id, profile }))
}

#[axum::debug_handler]
pub async fn save_profile(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<SaveProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.accounts.save_profile(&user_id, payload).await?))
}

#[axum::debug_handler]
pub async fn current_user(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.accounts.current_user(&user_id).await?))
}

/// Raw image body; the `content-type` header names the format.
#[axum::debug_handler]
pub async fn upload_profile_image(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Profile>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| SparkError::Validation("Missing content-type header".to_string()))?;

    let profile = state
        .accounts
        .upload_profile_image(&user_id, content_type, body.to_vec())
        .await?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn get_profile_image(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let image = state.accounts.get_profile_image(&user_id).await?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.data))
}

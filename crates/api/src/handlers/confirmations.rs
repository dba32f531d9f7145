use axum::{
    extract::{Path, State},
    Json,
};
use spark_core::{
    keys::ConfirmationKey,
    models::meeting::{AddCommentRequest, ChatChannelResponse, CommentsResponse, ConfirmedMeeting},
};
use std::sync::Arc;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_confirmations(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<ConfirmedMeeting>>, AppError> {
    Ok(Json(state.matching.list_confirmations(&user_id).await?))
}

#[axum::debug_handler]
pub async fn list_comments(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<CommentsResponse>, AppError> {
    let key = ConfirmationKey::from_raw(id);
    Ok(Json(state.matching.list_comments(&user_id, &key).await?))
}

#[axum::debug_handler]
pub async fn add_comment(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<Json<CommentsResponse>, AppError> {
    let key = ConfirmationKey::from_raw(id);
    Ok(Json(
        state.matching.add_comment(&user_id, &key, &payload.text).await?,
    ))
}

#[axum::debug_handler]
pub async fn open_chat(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ChatChannelResponse>, AppError> {
    let key = ConfirmationKey::from_raw(id);
    Ok(Json(state.matching.open_chat(&user_id, &key).await?))
}

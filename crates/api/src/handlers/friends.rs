use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use spark_core::models::user::{
    AddFriendRequest, AddFriendResponse, BlockUserRequest, BlockedUser, FriendsResponse,
    RecommendedUser,
};
use std::sync::Arc;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Serialize)]
pub struct BlockUserResponse {
    pub user_id: String,
    pub blocked: bool,
}

#[axum::debug_handler]
pub async fn list_friends(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<FriendsResponse>, AppError> {
    Ok(Json(state.directory.fetch_friends(&user_id).await?))
}

#[axum::debug_handler]
pub async fn add_friend(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<AddFriendRequest>,
) -> Result<Json<AddFriendResponse>, AppError> {
    Ok(Json(state.directory.add_friend(&user_id, payload).await?))
}

#[axum::debug_handler]
pub async fn remove_friend(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(friend_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.directory.remove_friend(&user_id, &friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn recommendations(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<RecommendedUser>>, AppError> {
    Ok(Json(state.directory.recommend_friends(&user_id).await?))
}

#[axum::debug_handler]
pub async fn list_blocked(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<BlockedUser>>, AppError> {
    Ok(Json(state.directory.list_blocked_users(&user_id).await?))
}

#[axum::debug_handler]
pub async fn block_user(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<BlockUserRequest>,
) -> Result<Json<BlockUserResponse>, AppError> {
    let blocked = state.directory.block_user(&user_id, &payload.user_id).await?;
    Ok(Json(BlockUserResponse {
        user_id: payload.user_id,
        blocked,
    }))
}

#[axum::debug_handler]
pub async fn unblock_user(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(blocked_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.directory.unblock_user(&user_id, &blocked_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

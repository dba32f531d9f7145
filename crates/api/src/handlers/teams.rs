use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use spark_core::models::team::{CreateTeamRequest, DeleteTeamResponse, Team};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_teams(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<Team>>, AppError> {
    Ok(Json(state.directory.list_teams(&user_id).await?))
}

#[axum::debug_handler]
pub async fn create_team(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), AppError> {
    let team = state.directory.create_team(&user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

#[axum::debug_handler]
pub async fn delete_team(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(team_id): Path<Uuid>,
) -> Result<Json<DeleteTeamResponse>, AppError> {
    Ok(Json(state.directory.delete_team(&user_id, team_id).await?))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use spark_core::{
    keys::ReservationKey,
    models::meeting::{
        ConfirmReservationRequest, ConfirmedMeeting, CreateReservationRequest,
        CreateReservationResponse, MeetingReservation, ReservationQuery,
    },
};
use std::sync::Arc;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_reservations(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ReservationQuery>,
) -> Result<Json<Vec<MeetingReservation>>, AppError> {
    Ok(Json(state.reservations.list_reservations(query.date).await?))
}

#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), AppError> {
    let response = state.reservations.create_reservation(&user_id, payload).await?;
    let status = if response.replaced {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(response)))
}

#[axum::debug_handler]
pub async fn cancel_reservation(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .reservations
        .cancel_reservation(&user_id, &ReservationKey::from_raw(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn confirm_reservation(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmReservationRequest>,
) -> Result<(StatusCode, Json<ConfirmedMeeting>), AppError> {
    let meeting = state
        .matching
        .confirm(&user_id, &ReservationKey::from_raw(id), payload.team_id)
        .await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

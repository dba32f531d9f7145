use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::reservations, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/api/reservations/:id", delete(reservations::cancel_reservation))
        .route(
            "/api/reservations/:id/confirm",
            post(reservations::confirm_reservation),
        )
}

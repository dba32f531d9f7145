use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::confirmations, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/confirmations", get(confirmations::list_confirmations))
        .route(
            "/api/confirmations/:id/comments",
            get(confirmations::list_comments).post(confirmations::add_comment),
        )
        .route("/api/confirmations/:id/chat", post(confirmations::open_chat))
}

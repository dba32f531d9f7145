use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers::friends, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/friends",
            get(friends::list_friends).post(friends::add_friend),
        )
        .route("/api/friends/recommendations", get(friends::recommendations))
        .route("/api/friends/:id", delete(friends::remove_friend))
        .route(
            "/api/blocks",
            get(friends::list_blocked).post(friends::block_user),
        )
        .route("/api/blocks/:id", delete(friends::unblock_user))
}

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers::users, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users", post(users::register))
        .route("/api/users/me", get(users::current_user))
        .route("/api/sessions", post(users::login))
        .route("/api/profiles/:id", get(users::get_profile))
        .route("/api/profile", put(users::save_profile))
        .route("/api/profile/image", put(users::upload_profile_image))
        .route("/api/images/profiles/:id", get(users::get_profile_image))
}

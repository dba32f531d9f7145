use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers::teams, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route("/api/teams/:id", delete(teams::delete_team))
}

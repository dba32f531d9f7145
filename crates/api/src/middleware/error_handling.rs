//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a JSON body of the form
//! `{"error": "..."}`, so every endpoint fails the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use spark_core::errors::SparkError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that
/// yields a `SparkError` or an `eyre::Report`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use spark_api::middleware::error_handling::AppError;
/// use spark_core::errors::SparkError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.is_empty() {
///         return Err(SparkError::Validation("name is required".to_string()).into());
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SparkError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SparkError::NotFound(_) => StatusCode::NOT_FOUND,
            SparkError::Validation(_) => StatusCode::BAD_REQUEST,
            SparkError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SparkError::Authorization(_) => StatusCode::FORBIDDEN,
            SparkError::Conflict(_) => StatusCode::CONFLICT,
            SparkError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SparkError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<SparkError> for AppError {
    fn from(err: SparkError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SparkError::Database(err))
    }
}

/// Maps a SparkError to an HTTP response
pub fn map_error(err: SparkError) -> Response {
    AppError(err).into_response()
}

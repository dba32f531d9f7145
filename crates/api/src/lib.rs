//! # Spark API
//!
//! The web server for Spark, a group-meeting matchmaking service. Users
//! form teams with friends, reserve a date for their team, and another
//! team confirms the reservation to turn it into a meeting.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract requests and shape responses
//! - **Services**: Accounts, the friend/team directory, reservations and
//!   the matching confirmer
//! - **Middleware**: Caller identity, password hashing and error mapping
//! - **Config**: Environment configuration
//!
//! Services only see repository traits, so the server runs against
//! PostgreSQL in production and the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Caller identity, password hashing and error responses
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Service components holding the business rules
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use eyre::Result;
use spark_chat::ChatBridge;
use spark_db::repositories::{
    ConfirmationRepository, ProfileRepository, ReservationRepository, TeamRepository,
    UserRepository,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::services::{
    accounts::Accounts, directory::Directory, matching::MatchingConfirmer,
    reservations::ReservationStore,
};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub accounts: Accounts,
    pub directory: Directory,
    pub reservations: ReservationStore,
    pub matching: MatchingConfirmer,
}

impl ApiState {
    /// Builds every service over one store implementing all repositories.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use spark_api::ApiState;
    /// use spark_chat::DisabledChatBridge;
    /// use spark_db::MemoryStore;
    ///
    /// let state = ApiState::from_store(Arc::new(MemoryStore::new()), Arc::new(DisabledChatBridge));
    /// let app = spark_api::app(Arc::new(state));
    /// ```
    pub fn from_store<S>(store: Arc<S>, chat: Arc<dyn ChatBridge>) -> Self
    where
        S: UserRepository
            + ProfileRepository
            + TeamRepository
            + ReservationRepository
            + ConfirmationRepository
            + 'static,
    {
        Self {
            accounts: Accounts::new(store.clone(), store.clone(), chat.clone()),
            directory: Directory::new(store.clone(), store.clone(), store.clone()),
            reservations: ReservationStore::new(store.clone(), store.clone()),
            matching: MatchingConfirmer::new(store.clone(), store.clone(), store, chat),
        }
    }
}

/// Builds the application router with all routes
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::users::routes())
        .merge(routes::friends::routes())
        .merge(routes::teams::routes())
        .merge(routes::reservations::routes())
        .merge(routes::confirmations::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(middleware::auth::USER_ID_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Installs the global tracing subscriber. Fails when one is already set,
/// so binaries call it once, before anything logs.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and state
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = app(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

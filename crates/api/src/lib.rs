//! # Cut&Go API
//!
//! The API crate provides the web server of the Cut&Go booking service:
//! salons, their admins, staff schedules and their weekly rows, services and
//! customer appointments.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into repository calls
//! - **Middleware**: Bearer-token authentication, password hashing and error mapping
//! - **Config**: Environment configuration
//!
//! A handful of read-only routes and registration/login are public. Every
//! other route sits behind [`middleware::auth::auth_middleware`].

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    Router,
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use config::JwtSettings;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState { db_pool, jwt: config.jwt.clone() });
/// let app = cutandgo_api::build_router(state);
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Settings used to issue and verify access tokens
    pub jwt: JwtSettings,
}

/// Builds the application router with every route attached.
///
/// Protected routes are wrapped in the authentication layer before being
/// merged with the public ones, so the layer never runs for public routes.
pub fn build_router(state: Arc<ApiState>) -> Router {
    let protected = Router::new()
        .merge(routes::auth::routes())
        .merge(routes::token::routes())
        .merge(routes::user::routes())
        .merge(routes::hairdresser::routes())
        .merge(routes::admin::routes())
        .merge(routes::schedule::routes())
        .merge(routes::schedule_row::routes())
        .merge(routes::appointment::routes())
        .merge(routes::service::routes())
        .merge(routes::appointment_service::routes())
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::auth_middleware));

    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public endpoints
        .merge(routes::auth::public_routes())
        .merge(routes::user::public_routes())
        .merge(routes::hairdresser::public_routes())
        .merge(routes::service::public_routes())
        .merge(routes::schedule_row::public_routes())
        // Everything else needs a bearer token
        .merge(protected)
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
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
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the log subscriber, builds the router, adds request tracing,
/// the optional CORS policy and the request timeout, then serves until the
/// process is stopped.
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = cutandgo_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        db_pool,
        jwt: config.jwt.clone(),
    });

    let app = build_router(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

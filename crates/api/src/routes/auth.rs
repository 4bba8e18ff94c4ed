use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn public_routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/auth/login", post(handlers::auth::login))
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/auth/me", get(handlers::auth::me))
}

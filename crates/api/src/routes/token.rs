use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/tokens/generate", get(handlers::token::generate_token))
        .route("/api/tokens/users/:user_id", post(handlers::token::assign_user_token))
        .route(
            "/api/tokens/users/:user_id/validate",
            get(handlers::token::validate_user_token),
        )
        .route(
            "/api/tokens/hairdressers/:hairdresser_id/validate",
            get(handlers::token::validate_hairdresser_token),
        )
}

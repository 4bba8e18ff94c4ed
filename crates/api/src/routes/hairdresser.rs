use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn public_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/hairdressers", get(handlers::hairdresser::list_hairdressers))
        .route(
            "/api/hairdressers/:hairdresser_id",
            get(handlers::hairdresser::get_hairdresser),
        )
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/hairdressers", post(handlers::hairdresser::create_hairdresser))
        .route(
            "/api/hairdressers/:hairdresser_id",
            put(handlers::hairdresser::update_hairdresser)
                .delete(handlers::hairdresser::delete_hairdresser),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/emails",
            get(handlers::hairdresser::get_hairdresser_emails),
        )
}

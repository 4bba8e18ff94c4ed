use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn public_routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/users", post(handlers::user::create_user))
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/users/:user_id",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route(
            "/api/users/:user_id/email-confirmation",
            put(handlers::user::confirm_email),
        )
        .route(
            "/api/users/:user_id/hairdressers",
            get(handlers::user::get_user_hairdressers),
        )
        .route(
            "/api/users/:user_id/appointments",
            get(handlers::user::get_user_appointments),
        )
}

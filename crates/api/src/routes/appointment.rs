use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/appointments", post(handlers::appointment::create_appointment))
        .route(
            "/api/appointments/:appointment_id",
            get(handlers::appointment::get_appointment)
                .put(handlers::appointment::update_appointment)
                .delete(handlers::appointment::delete_appointment),
        )
        .route(
            "/api/appointments/:appointment_id/approve",
            put(handlers::appointment::approve_appointment),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/appointments",
            get(handlers::appointment::list_hairdresser_appointments),
        )
}

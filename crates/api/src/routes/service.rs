use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn public_routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/hairdressers/:hairdresser_id/services",
        get(handlers::service::list_hairdresser_services),
    )
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/services",
            get(handlers::service::list_services_by_ids).post(handlers::service::create_service),
        )
        .route(
            "/api/services/:service_id",
            get(handlers::service::get_service)
                .put(handlers::service::update_service)
                .delete(handlers::service::delete_service),
        )
        .route(
            "/api/appointments/:appointment_id/services",
            get(handlers::service::list_appointment_services),
        )
}

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/:appointment_id/services/:service_id",
            get(handlers::appointment_service::get_link)
                .post(handlers::appointment_service::create_link)
                .delete(handlers::appointment_service::delete_link),
        )
        .route(
            "/api/appointments/:appointment_id/service-ids",
            get(handlers::appointment_service::list_service_ids),
        )
        .route(
            "/api/appointments/:appointment_id/service-links",
            get(handlers::appointment_service::list_links),
        )
}

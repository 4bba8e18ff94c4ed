use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedules", post(handlers::schedule::create_schedule))
        .route(
            "/api/schedules/:schedule_id",
            get(handlers::schedule::get_schedule)
                .put(handlers::schedule::update_schedule)
                .delete(handlers::schedule::delete_schedule),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/schedules",
            get(handlers::schedule::list_schedules),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/schedules/active",
            get(handlers::schedule::get_active_schedule),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/schedules/names",
            get(handlers::schedule::get_schedule_names),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/schedules/:schedule_id/activate",
            put(handlers::schedule::activate_schedule),
        )
}

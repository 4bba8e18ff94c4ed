use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn public_routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/hairdressers/:hairdresser_id/schedule-rows/active",
        get(handlers::schedule_row::get_active_schedule_rows),
    )
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedules/:schedule_id/rows",
            get(handlers::schedule_row::list_schedule_rows).post(handlers::schedule_row::create_schedule_row),
        )
        .route(
            "/api/schedules/:schedule_id/rows/validate",
            post(handlers::schedule_row::validate_schedule_row),
        )
        .route(
            "/api/schedule-rows/:row_id",
            get(handlers::schedule_row::get_schedule_row)
                .put(handlers::schedule_row::update_schedule_row)
                .delete(handlers::schedule_row::delete_schedule_row),
        )
}

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/hairdressers/:hairdresser_id/admins",
            get(handlers::admin::list_admins).post(handlers::admin::create_admin),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/admins/:user_id",
            get(handlers::admin::get_admin)
                .put(handlers::admin::update_admin)
                .delete(handlers::admin::delete_admin),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/admins/:user_id/exists",
            get(handlers::admin::admin_exists),
        )
        .route(
            "/api/hairdressers/:hairdresser_id/admins/:user_id/compare",
            get(handlers::admin::compare_admin),
        )
}

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/entries/validate",
            get(handlers::entries::validate_entry),
        )
        .route("/api/entries", post(handlers::entries::log_entry))
        .route("/api/logs", get(handlers::entries::get_activity_log))
}

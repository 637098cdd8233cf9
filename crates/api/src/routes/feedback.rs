use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/feedback", post(handlers::feedback::submit_feedback))
        .route(
            "/api/feedback/trainer/:id",
            get(handlers::feedback::get_trainer_feedback),
        )
        .route(
            "/api/feedback/workout/:id",
            get(handlers::feedback::get_workout_feedback),
        )
}

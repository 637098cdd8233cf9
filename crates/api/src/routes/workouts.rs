use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/workouts", post(handlers::workouts::create_workout))
        .route("/api/workouts/:id", put(handlers::workouts::update_workout))
        .route(
            "/api/workouts/:id",
            delete(handlers::workouts::delete_workout),
        )
        .route(
            "/api/workouts/created-by/:id",
            get(handlers::workouts::get_created_workouts),
        )
        .route(
            "/api/workouts/member/:id",
            get(handlers::workouts::get_member_workouts),
        )
        .route(
            "/api/workouts/assigned-by/:id",
            get(handlers::workouts::get_assigned_workouts),
        )
        .route(
            "/api/workouts/assign",
            post(handlers::workouts::assign_workout),
        )
        .route("/api/workouts/save", post(handlers::workouts::save_workout))
        .route(
            "/api/workouts/progress",
            put(handlers::workouts::update_progress),
        )
}

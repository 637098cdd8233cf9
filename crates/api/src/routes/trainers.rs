use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/trainers/assign",
            post(handlers::trainers::assign_trainer),
        )
        .route(
            "/api/trainers/:id/members",
            get(handlers::trainers::get_trainer_members),
        )
}

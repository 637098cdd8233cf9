use axum::{
    Json,
    extract::{Path, State},
};
use gymtrack_core::{
    errors::GymError,
    models::user::{AssignTrainerRequest, AssignTrainerResponse, TrainerMembersResponse},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::handlers::users::user_response;
use crate::{ApiState, middleware::error_handling::AppError};
use gymtrack_db::repositories::{trainers, users};

#[axum::debug_handler]
pub async fn assign_trainer(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AssignTrainerRequest>,
) -> Result<Json<AssignTrainerResponse>, AppError> {
    let trainer = users::get_user_by_id(&state.db_pool, payload.trainer_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("Trainer with ID {} not found", payload.trainer_id))
        })?;

    if trainer.role != "trainer" {
        return Err(AppError(GymError::Validation(
            "Assigning user is not a trainer".to_string(),
        )));
    }

    let member = users::get_user_by_id(&state.db_pool, payload.member_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("Member with ID {} not found", payload.member_id))
        })?;

    if member.role != "member" {
        return Err(AppError(GymError::Validation(
            "Target user is not a member".to_string(),
        )));
    }

    // At most one trainer per member
    if let Some(existing) = trainers::get_assignment_by_member(&state.db_pool, payload.member_id)
        .await
        .map_err(GymError::Database)?
    {
        let message = if existing.trainer_id == payload.trainer_id {
            "Member is already assigned to this trainer"
        } else {
            "Member already has a trainer assigned"
        };
        return Err(AppError(GymError::Conflict(message.to_string())));
    }

    trainers::create_assignment(&state.db_pool, payload.trainer_id, payload.member_id)
        .await
        .map_err(GymError::Database)?;

    Ok(Json(AssignTrainerResponse {
        success: true,
        message: "Trainer assigned".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn get_trainer_members(
    State(state): State<Arc<ApiState>>,
    Path(trainer_id): Path<Uuid>,
) -> Result<Json<TrainerMembersResponse>, AppError> {
    let members = trainers::get_members_by_trainer(&state.db_pool, trainer_id)
        .await
        .map_err(GymError::Database)?;

    let response = TrainerMembersResponse {
        members: members.into_iter().map(user_response).collect(),
    };

    Ok(Json(response))
}

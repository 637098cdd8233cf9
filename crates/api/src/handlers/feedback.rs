use axum::{
    Json,
    extract::{Path, State},
};
use gymtrack_core::{
    errors::GymError,
    models::feedback::{
        FeedbackListResponse, FeedbackResponse, SubmitFeedbackRequest, SubmitFeedbackResponse,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};
use gymtrack_db::models::DbFeedback;
use gymtrack_db::repositories::{feedback, users, workouts};

fn feedback_response(row: DbFeedback) -> FeedbackResponse {
    FeedbackResponse {
        id: row.id,
        workout_id: row.workout_id,
        user_id: row.user_id,
        trainer_id: row.trainer_id,
        content: row.content,
        rating: row.rating,
        created_at: row.created_at,
    }
}

#[axum::debug_handler]
pub async fn submit_feedback(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> Result<Json<SubmitFeedbackResponse>, AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError(GymError::Validation(
            "Feedback content must not be empty".to_string(),
        )));
    }
    if let Some(rating) = payload.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError(GymError::Validation(
                "Rating must be between 1 and 5".to_string(),
            )));
        }
    }

    users::get_user_by_id(&state.db_pool, payload.user_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("User with ID {} not found", payload.user_id)))?;

    if let Some(workout_id) = payload.workout_id {
        workouts::get_workout_by_id(&state.db_pool, workout_id)
            .await
            .map_err(GymError::Database)?
            .ok_or_else(|| {
                GymError::NotFound(format!("Workout with ID {} not found", workout_id))
            })?;
    }

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GymError::Database(e.into()))?;

    // One feedback row per (workout, user): a second submission updates the
    // first instead of inserting
    let message = if let Some(workout_id) = payload.workout_id {
        match feedback::find_workout_feedback(&mut tx, workout_id, payload.user_id)
            .await
            .map_err(GymError::Database)?
        {
            Some(existing) => {
                feedback::update_feedback(&mut tx, existing.id, &payload.content, payload.rating)
                    .await
                    .map_err(GymError::Database)?;
                "Feedback updated"
            }
            None => {
                feedback::insert_feedback(
                    &mut tx,
                    Some(workout_id),
                    payload.user_id,
                    payload.trainer_id,
                    &payload.content,
                    payload.rating,
                )
                .await
                .map_err(GymError::Database)?;
                "Feedback submitted"
            }
        }
    } else {
        feedback::insert_feedback(
            &mut tx,
            None,
            payload.user_id,
            payload.trainer_id,
            &payload.content,
            payload.rating,
        )
        .await
        .map_err(GymError::Database)?;
        "Feedback submitted"
    };

    tx.commit().await.map_err(|e| GymError::Database(e.into()))?;

    Ok(Json(SubmitFeedbackResponse {
        success: true,
        message: message.to_string(),
    }))
}

#[axum::debug_handler]
pub async fn get_trainer_feedback(
    State(state): State<Arc<ApiState>>,
    Path(trainer_id): Path<Uuid>,
) -> Result<Json<FeedbackListResponse>, AppError> {
    let rows = feedback::get_feedback_by_trainer(&state.db_pool, trainer_id)
        .await
        .map_err(GymError::Database)?;

    Ok(Json(FeedbackListResponse {
        feedback: rows.into_iter().map(feedback_response).collect(),
    }))
}

#[axum::debug_handler]
pub async fn get_workout_feedback(
    State(state): State<Arc<ApiState>>,
    Path(workout_id): Path<Uuid>,
) -> Result<Json<FeedbackListResponse>, AppError> {
    let rows = feedback::get_feedback_by_workout(&state.db_pool, workout_id)
        .await
        .map_err(GymError::Database)?;

    Ok(Json(FeedbackListResponse {
        feedback: rows.into_iter().map(feedback_response).collect(),
    }))
}

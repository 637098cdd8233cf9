//! # Workout Handlers
//!
//! This module contains handlers for workout templates and the assignment
//! engine: creating and editing workouts, deep-copying a template to trainees,
//! saving a copy for oneself, and tracking per-instance progress.
//!
//! ## Assignment Batch Semantics
//!
//! Assigning a template to several trainees runs inside one outer database
//! transaction, with a savepoint per trainee:
//!
//! 1. The template and its exercises are read once.
//! 2. Each trainee gets an independent copy of the workout row and every
//!    active exercise row; a failure for one trainee rolls back only that
//!    trainee's savepoint and is recorded as a per-trainee error.
//! 3. The outer transaction commits when at least one trainee succeeded and
//!    rolls back when none did, so a fully failed batch leaves no rows behind.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use gymtrack_core::{
    errors::GymError,
    models::workout::{
        AssignWorkoutRequest, AssignWorkoutResponse, AssignmentError, CreateExerciseRequest,
        CreateWorkoutRequest, CreateWorkoutResponse, DeleteWorkoutRequest, DeleteWorkoutResponse,
        ExerciseResponse, SaveAction, SaveWorkoutRequest, SaveWorkoutResponse,
        UpdateProgressRequest, UpdateProgressResponse, UpdateWorkoutRequest, UpdateWorkoutResponse,
        WorkoutListResponse, WorkoutProgress, WorkoutResponse,
    },
};
use sqlx::{Acquire, PgPool, Postgres, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};
use gymtrack_db::models::DbWorkout;
use gymtrack_db::repositories::workouts;

fn validate_exercises(exercises: &[CreateExerciseRequest]) -> Result<(), AppError> {
    for exercise in exercises {
        if exercise.name.trim().is_empty() {
            return Err(AppError(GymError::Validation(
                "Exercise name must not be empty".to_string(),
            )));
        }
        if exercise.sets <= 0 || exercise.reps <= 0 {
            return Err(AppError(GymError::Validation(
                "Exercise sets and reps must be positive".to_string(),
            )));
        }
    }
    Ok(())
}

async fn workout_response(pool: &PgPool, workout: DbWorkout) -> Result<WorkoutResponse, AppError> {
    let exercises = workouts::get_exercises_by_workout_id(pool, workout.id)
        .await
        .map_err(GymError::Database)?;

    Ok(WorkoutResponse {
        id: workout.id,
        name: workout.name,
        description: workout.description,
        level: workout.level,
        created_by: workout.created_by,
        assigned_by: workout.assigned_by,
        assigned_to: workout.assigned_to,
        progress: workout.progress,
        created_at: workout.created_at,
        exercises: exercises
            .into_iter()
            .map(|e| ExerciseResponse {
                id: e.id,
                name: e.name,
                sets: e.sets,
                reps: e.reps,
            })
            .collect(),
    })
}

async fn list_response(
    pool: &PgPool,
    workouts: Vec<DbWorkout>,
) -> Result<Json<WorkoutListResponse>, AppError> {
    let mut out = Vec::with_capacity(workouts.len());
    for workout in workouts {
        out.push(workout_response(pool, workout).await?);
    }
    Ok(Json(WorkoutListResponse { workouts: out }))
}

/// Copies the template row and its active exercises into a new instance
/// assigned to one trainee. Runs on the caller's (nested) transaction.
async fn copy_to_trainee(
    tx: &mut Transaction<'_, Postgres>,
    template: &DbWorkout,
    assigned_by: Uuid,
    trainee_id: Uuid,
) -> eyre::Result<()> {
    let instance = workouts::insert_workout(
        tx,
        &template.name,
        template.description.as_deref(),
        template.level.as_deref(),
        template.created_by,
        Some(assigned_by),
        Some(trainee_id),
        WorkoutProgress::Assigned.as_str(),
        Some(template.id),
    )
    .await?;

    workouts::copy_exercises(tx, template.id, instance.id).await?;

    Ok(())
}

#[axum::debug_handler]
pub async fn create_workout(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<Json<CreateWorkoutResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(GymError::Validation(
            "Workout name must not be empty".to_string(),
        )));
    }
    validate_exercises(&payload.exercises)?;

    // The creator must exist before anything is written
    gymtrack_db::repositories::users::get_user_by_id(&state.db_pool, payload.created_by)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("User with ID {} not found", payload.created_by))
        })?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GymError::Database(e.into()))?;

    let workout = workouts::insert_workout(
        &mut tx,
        &payload.name,
        payload.description.as_deref(),
        payload.level.as_deref(),
        payload.created_by,
        None,
        None,
        WorkoutProgress::Assigned.as_str(),
        None,
    )
    .await
    .map_err(GymError::Database)?;

    for exercise in &payload.exercises {
        workouts::insert_exercise(&mut tx, workout.id, &exercise.name, exercise.sets, exercise.reps)
            .await
            .map_err(GymError::Database)?;
    }

    tx.commit().await.map_err(|e| GymError::Database(e.into()))?;

    let response = CreateWorkoutResponse {
        id: workout.id,
        name: workout.name,
        created_at: workout.created_at,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn update_workout(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWorkoutRequest>,
) -> Result<Json<UpdateWorkoutResponse>, AppError> {
    let workout = workouts::get_workout_by_id(&state.db_pool, id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("Workout with ID {} not found", id)))?;

    // Only the creator may edit a workout
    if workout.created_by != payload.requester_id {
        return Err(AppError(GymError::Authorization(
            "Only the creator may modify this workout".to_string(),
        )));
    }

    validate_exercises(&payload.exercises)?;

    let name = payload.name.as_deref().unwrap_or(&workout.name);
    let description = payload.description.as_deref().or(workout.description.as_deref());
    let level = payload.level.as_deref().or(workout.level.as_deref());

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GymError::Database(e.into()))?;

    workouts::update_workout(&mut tx, id, name, description, level)
        .await
        .map_err(GymError::Database)?;

    // The exercise list is replaced wholesale
    workouts::delete_exercises_by_workout_id(&mut tx, id)
        .await
        .map_err(GymError::Database)?;

    for exercise in &payload.exercises {
        workouts::insert_exercise(&mut tx, id, &exercise.name, exercise.sets, exercise.reps)
            .await
            .map_err(GymError::Database)?;
    }

    tx.commit().await.map_err(|e| GymError::Database(e.into()))?;

    let response = UpdateWorkoutResponse {
        id,
        updated_at: Utc::now(),
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn delete_workout(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeleteWorkoutRequest>,
) -> Result<Json<DeleteWorkoutResponse>, AppError> {
    let workout = workouts::get_workout_by_id(&state.db_pool, id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("Workout with ID {} not found", id)))?;

    if workout.created_by != payload.requester_id {
        return Err(AppError(GymError::Authorization(
            "Only the creator may delete this workout".to_string(),
        )));
    }

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GymError::Database(e.into()))?;

    workouts::soft_delete_workout(&mut tx, id)
        .await
        .map_err(GymError::Database)?;

    tx.commit().await.map_err(|e| GymError::Database(e.into()))?;

    let response = DeleteWorkoutResponse {
        success: true,
        message: "Workout deleted".to_string(),
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_created_workouts(
    State(state): State<Arc<ApiState>>,
    Path(creator_id): Path<Uuid>,
) -> Result<Json<WorkoutListResponse>, AppError> {
    let rows = workouts::get_created_workouts(&state.db_pool, creator_id)
        .await
        .map_err(GymError::Database)?;

    list_response(&state.db_pool, rows).await
}

#[axum::debug_handler]
pub async fn get_member_workouts(
    State(state): State<Arc<ApiState>>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<WorkoutListResponse>, AppError> {
    let rows = workouts::get_member_workouts(&state.db_pool, member_id)
        .await
        .map_err(GymError::Database)?;

    list_response(&state.db_pool, rows).await
}

#[axum::debug_handler]
pub async fn get_assigned_workouts(
    State(state): State<Arc<ApiState>>,
    Path(trainer_id): Path<Uuid>,
) -> Result<Json<WorkoutListResponse>, AppError> {
    let rows = workouts::get_assigned_workouts(&state.db_pool, trainer_id)
        .await
        .map_err(GymError::Database)?;

    list_response(&state.db_pool, rows).await
}

#[axum::debug_handler]
pub async fn assign_workout(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AssignWorkoutRequest>,
) -> Result<Json<AssignWorkoutResponse>, AppError> {
    if payload.trainee_ids.is_empty() {
        return Err(AppError(GymError::Validation(
            "At least one trainee ID must be provided".to_string(),
        )));
    }

    // Preconditions checked before any write: the template and the assigning
    // trainer must both exist
    let template = workouts::get_workout_by_id(&state.db_pool, payload.workout_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("Workout with ID {} not found", payload.workout_id))
        })?;

    gymtrack_db::repositories::users::get_user_by_id(&state.db_pool, payload.assigned_by)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("User with ID {} not found", payload.assigned_by))
        })?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GymError::Database(e.into()))?;

    let mut assigned_count = 0usize;
    let mut errors = Vec::new();

    for trainee_id in &payload.trainee_ids {
        // Savepoint per trainee: one trainee's failure must not block the rest
        let mut sp = tx
            .begin()
            .await
            .map_err(|e| GymError::Database(e.into()))?;

        match workouts::find_assigned_copy(&mut sp, template.id, *trainee_id).await {
            Ok(Some(_)) => {
                sp.rollback().await.ok();
                errors.push(AssignmentError {
                    trainee_id: *trainee_id,
                    message: "Workout already assigned to this trainee".to_string(),
                });
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Duplicate check failed for trainee {}: {}", trainee_id, e);
                sp.rollback().await.ok();
                errors.push(AssignmentError {
                    trainee_id: *trainee_id,
                    message: "Failed to assign workout".to_string(),
                });
                continue;
            }
        }

        match copy_to_trainee(&mut sp, &template, payload.assigned_by, *trainee_id).await {
            Ok(()) => match sp.commit().await {
                Ok(()) => assigned_count += 1,
                Err(e) => {
                    tracing::warn!("Savepoint commit failed for trainee {}: {}", trainee_id, e);
                    errors.push(AssignmentError {
                        trainee_id: *trainee_id,
                        message: "Failed to assign workout".to_string(),
                    });
                }
            },
            Err(e) => {
                tracing::warn!("Workout copy failed for trainee {}: {}", trainee_id, e);
                sp.rollback().await.ok();
                errors.push(AssignmentError {
                    trainee_id: *trainee_id,
                    message: "Failed to assign workout".to_string(),
                });
            }
        }
    }

    // The batch is all-or-nothing only when every trainee failed
    if assigned_count > 0 {
        tx.commit().await.map_err(|e| GymError::Database(e.into()))?;
    } else {
        tx.rollback()
            .await
            .map_err(|e| GymError::Database(e.into()))?;
    }

    let response = AssignWorkoutResponse {
        success: assigned_count > 0,
        message: format!(
            "Assigned workout to {} of {} trainees",
            assigned_count,
            payload.trainee_ids.len()
        ),
        assigned_count,
        errors,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn save_workout(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SaveWorkoutRequest>,
) -> Result<Json<SaveWorkoutResponse>, AppError> {
    let template = workouts::get_workout_by_id(&state.db_pool, payload.workout_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("Workout with ID {} not found", payload.workout_id))
        })?;

    gymtrack_db::repositories::users::get_user_by_id(&state.db_pool, payload.member_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("User with ID {} not found", payload.member_id))
        })?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GymError::Database(e.into()))?;

    let existing = workouts::find_saved_copy(&mut tx, template.id, payload.member_id)
        .await
        .map_err(GymError::Database)?;

    let message = match payload.action {
        SaveAction::Save => {
            if existing.is_some() {
                // Idempotent: re-saving is a no-op
                tx.rollback()
                    .await
                    .map_err(|e| GymError::Database(e.into()))?;
                return Ok(Json(SaveWorkoutResponse {
                    success: true,
                    message: "Workout already saved".to_string(),
                }));
            }

            let copy = workouts::insert_workout(
                &mut tx,
                &template.name,
                template.description.as_deref(),
                template.level.as_deref(),
                payload.member_id,
                None,
                None,
                WorkoutProgress::Assigned.as_str(),
                Some(template.id),
            )
            .await
            .map_err(GymError::Database)?;

            workouts::copy_exercises(&mut tx, template.id, copy.id)
                .await
                .map_err(GymError::Database)?;

            "Workout saved".to_string()
        }
        SaveAction::Unsave => {
            let copy = existing.ok_or_else(|| {
                GymError::NotFound("No saved copy of this workout".to_string())
            })?;

            // Exercises go first to satisfy referential integrity
            workouts::delete_exercises_by_workout_id(&mut tx, copy.id)
                .await
                .map_err(GymError::Database)?;
            workouts::delete_workout_row(&mut tx, copy.id)
                .await
                .map_err(GymError::Database)?;

            "Workout removed from saved".to_string()
        }
    };

    tx.commit().await.map_err(|e| GymError::Database(e.into()))?;

    Ok(Json(SaveWorkoutResponse {
        success: true,
        message,
    }))
}

#[axum::debug_handler]
pub async fn update_progress(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateProgressRequest>,
) -> Result<Json<UpdateProgressResponse>, AppError> {
    let rows = workouts::update_progress(
        &state.db_pool,
        payload.workout_id,
        payload.member_id,
        payload.status.as_str(),
    )
    .await
    .map_err(GymError::Database)?;

    // Existence and ownership are deliberately not distinguished
    if rows == 0 {
        return Err(AppError(GymError::NotFound(
            "Workout not found or not assigned to this member".to_string(),
        )));
    }

    Ok(Json(UpdateProgressResponse {
        success: true,
        message: format!("Progress updated to {}", payload.status.as_str()),
    }))
}

use axum::{Json, extract::State};
use gymtrack_core::{
    errors::GymError,
    models::user::{
        ChangePasswordRequest, LoginRequest, LoginResponse, PasswordChangeResponse,
        ResetPasswordRequest,
    },
};
use std::sync::Arc;

use crate::handlers::users::user_response;
use crate::{ApiState, middleware::auth, middleware::error_handling::AppError};
use gymtrack_db::repositories::{logs, users};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError(GymError::Validation(
            "Username and password are required".to_string(),
        )));
    }

    let user = users::verify_password(&state.db_pool, &payload.username, &payload.password)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::Authentication("Invalid username or password".to_string()))?;

    let response = LoginResponse {
        success: true,
        user: user_response(user),
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn change_password(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<PasswordChangeResponse>, AppError> {
    if payload.new_password.is_empty() {
        return Err(AppError(GymError::Validation(
            "New password must not be empty".to_string(),
        )));
    }

    users::get_user_by_id(&state.db_pool, payload.user_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("User with ID {} not found", payload.user_id)))?;

    let is_valid =
        auth::verify_user_password(&state.db_pool, payload.user_id, &payload.old_password)
            .await
            .map_err(GymError::Database)?;

    if !is_valid {
        return Err(AppError(GymError::Authentication(
            "Current password is incorrect".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.new_password)?;
    users::update_password(&state.db_pool, payload.user_id, &password_hash)
        .await
        .map_err(GymError::Database)?;

    Ok(Json(PasswordChangeResponse {
        success: true,
        message: "Password changed".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<PasswordChangeResponse>, AppError> {
    if payload.new_password.is_empty() {
        return Err(AppError(GymError::Validation(
            "New password must not be empty".to_string(),
        )));
    }

    // Resets are a staff-side operation
    let actor = users::get_user_by_id(&state.db_pool, payload.reset_by)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("User with ID {} not found", payload.reset_by))
        })?;

    if actor.role != "staff" && actor.role != "admin" {
        return Err(AppError(GymError::Authorization(
            "Only staff may reset passwords".to_string(),
        )));
    }

    let user = users::get_user_by_id(&state.db_pool, payload.user_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("User with ID {} not found", payload.user_id)))?;

    let password_hash = auth::hash_password(&payload.new_password)?;
    users::update_password(&state.db_pool, payload.user_id, &password_hash)
        .await
        .map_err(GymError::Database)?;

    logs::insert_log(
        &state.db_pool,
        payload.reset_by,
        "password_reset",
        Some(&format!("Password reset for {}", user.username)),
    )
    .await
    .map_err(GymError::Database)?;

    Ok(Json(PasswordChangeResponse {
        success: true,
        message: "Password reset".to_string(),
    }))
}

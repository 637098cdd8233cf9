use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{Duration, Utc};
use gymtrack_core::{
    errors::GymError,
    models::user::{
        CreateUserRequest, CreateUserResponse, ExtendMembershipRequest, ExtendMembershipResponse,
        GetUserResponse, UpdateProfileRequest, UpdateProfileResponse,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::auth, middleware::error_handling::AppError};
use gymtrack_db::models::DbUser;
use gymtrack_db::repositories::{logs, users};

pub(crate) fn user_response(user: DbUser) -> GetUserResponse {
    GetUserResponse {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        contact: user.contact,
        role: user.role,
        membership_expires_at: user.membership_expires_at,
        qr_code: user.qr_code,
        created_at: user.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, AppError> {
    // Collect every missing required field and fail fast
    let mut missing = Vec::new();
    if payload.username.trim().is_empty() {
        missing.push("username");
    }
    if payload.full_name.trim().is_empty() {
        missing.push("full_name");
    }
    if payload.email.trim().is_empty() {
        missing.push("email");
    }
    if payload.password.is_empty() {
        missing.push("password");
    }
    if !missing.is_empty() {
        return Err(AppError(GymError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))));
    }

    // Accounts are created by staff or admin users
    let creator = users::get_user_by_id(&state.db_pool, payload.created_by)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| {
            GymError::NotFound(format!("User with ID {} not found", payload.created_by))
        })?;

    if creator.role != "staff" && creator.role != "admin" {
        return Err(AppError(GymError::Authorization(
            "Only staff may create accounts".to_string(),
        )));
    }

    if users::get_user_by_username(&state.db_pool, &payload.username)
        .await
        .map_err(GymError::Database)?
        .is_some()
    {
        return Err(AppError(GymError::Conflict(
            "Username is already taken".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password)?;
    let qr_code = auth::generate_qr_code();
    let membership_expires_at = payload
        .membership_days
        .map(|days| Utc::now() + Duration::days(days));

    let user = users::create_user(
        &state.db_pool,
        &payload.username,
        &payload.full_name,
        &payload.email,
        payload.contact.as_deref(),
        payload.role.as_str(),
        &password_hash,
        membership_expires_at,
        &qr_code,
    )
    .await
    .map_err(GymError::Database)?;

    logs::insert_log(
        &state.db_pool,
        payload.created_by,
        "user_created",
        Some(&format!("Created account {}", user.username)),
    )
    .await
    .map_err(GymError::Database)?;

    let response = CreateUserResponse {
        id: user.id,
        username: user.username,
        qr_code: user.qr_code,
        created_at: user.created_at,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GetUserResponse>, AppError> {
    let user = users::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("User with ID {} not found", id)))?;

    Ok(Json(user_response(user)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    users::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("User with ID {} not found", id)))?;

    users::update_profile(
        &state.db_pool,
        id,
        payload.full_name.as_deref(),
        payload.email.as_deref(),
        payload.contact.as_deref(),
    )
    .await
    .map_err(GymError::Database)?;

    let response = UpdateProfileResponse {
        id,
        updated_at: Utc::now(),
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn extend_membership(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExtendMembershipRequest>,
) -> Result<Json<ExtendMembershipResponse>, AppError> {
    if payload.days <= 0 {
        return Err(AppError(GymError::Validation(
            "days must be a positive number".to_string(),
        )));
    }

    let user = users::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("User with ID {} not found", id)))?;

    // An expired membership extends from now, an active one from its expiry
    let now = Utc::now();
    let base = match user.membership_expires_at {
        Some(expiry) if expiry > now => expiry,
        _ => now,
    };
    let expires_at = base + Duration::days(payload.days);

    let updated = users::extend_membership(&state.db_pool, id, expires_at)
        .await
        .map_err(GymError::Database)?;

    logs::insert_log(
        &state.db_pool,
        payload.extended_by,
        "membership_extended",
        Some(&format!("Extended membership of {} by {} days", user.username, payload.days)),
    )
    .await
    .map_err(GymError::Database)?;

    let response = ExtendMembershipResponse {
        id: updated.id,
        membership_expires_at: expires_at,
    };

    Ok(Json(response))
}

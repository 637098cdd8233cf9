use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use gymtrack_core::{
    errors::GymError,
    models::entry::{
        ActivityLogEntry, ActivityLogResponse, LogEntryRequest, LogEntryResponse,
        ValidateEntryResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;

use crate::handlers::users::user_response;
use crate::{ApiState, middleware::error_handling::AppError};
use gymtrack_db::repositories::{logs, users};

const ENTRY_ACTION: &str = "gym_entry";

/// Query parameters for the QR validation endpoint
#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    pub qr_code: String,
}

/// Query parameters for the activity log endpoint
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub limit: Option<i64>,
}

#[axum::debug_handler]
pub async fn validate_entry(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ValidateQuery>,
) -> Result<Json<ValidateEntryResponse>, AppError> {
    let user = users::get_user_by_qr_code(&state.db_pool, &query.qr_code)
        .await
        .map_err(GymError::Database)?;

    let user = match user {
        Some(user) => user,
        None => {
            return Ok(Json(ValidateEntryResponse {
                user_exists: false,
                already_entered: false,
                membership_active: false,
                user: None,
            }));
        }
    };

    let already_entered = logs::has_entry_today(&state.db_pool, user.id, ENTRY_ACTION)
        .await
        .map_err(GymError::Database)?;

    let membership_active = user
        .membership_expires_at
        .map(|expiry| expiry > Utc::now())
        .unwrap_or(false);

    Ok(Json(ValidateEntryResponse {
        user_exists: true,
        already_entered,
        membership_active,
        user: Some(user_response(user)),
    }))
}

#[axum::debug_handler]
pub async fn log_entry(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LogEntryRequest>,
) -> Result<Json<LogEntryResponse>, AppError> {
    users::get_user_by_id(&state.db_pool, payload.user_id)
        .await
        .map_err(GymError::Database)?
        .ok_or_else(|| GymError::NotFound(format!("User with ID {} not found", payload.user_id)))?;

    // One entry per user per day
    let already_entered = logs::has_entry_today(&state.db_pool, payload.user_id, ENTRY_ACTION)
        .await
        .map_err(GymError::Database)?;

    if already_entered {
        return Err(AppError(GymError::Conflict(
            "Entry already logged today".to_string(),
        )));
    }

    logs::insert_log(&state.db_pool, payload.user_id, ENTRY_ACTION, None)
        .await
        .map_err(GymError::Database)?;

    Ok(Json(LogEntryResponse {
        success: true,
        message: "Entry logged".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn get_activity_log(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LogQuery>,
) -> Result<Json<ActivityLogResponse>, AppError> {
    let limit = query.limit.unwrap_or(50);
    let rows = logs::list_logs(&state.db_pool, limit)
        .await
        .map_err(GymError::Database)?;

    let response = ActivityLogResponse {
        entries: rows
            .into_iter()
            .map(|e| ActivityLogEntry {
                id: e.id,
                user_id: e.user_id,
                action: e.action,
                info: e.info,
                created_at: e.created_at,
            })
            .collect(),
    };

    Ok(Json(response))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::GetUserResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateEntryResponse {
    pub user_exists: bool,
    pub already_entered: bool,
    pub membership_active: bool,
    pub user: Option<GetUserResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub info: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogResponse {
    pub entries: Vec<ActivityLogEntry>,
}

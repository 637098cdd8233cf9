use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub contact: Option<String>,
    pub role: String,
    pub password_hash: String,
    pub membership_expires_at: Option<DateTime<Utc>>,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWorkout {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub created_by: Uuid,
    pub assigned_by: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub progress: String,
    pub source_workout_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbExercise {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTrainerAssignment {
    pub trainer_id: Uuid,
    pub member_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFeedback {
    pub id: Uuid,
    pub workout_id: Option<Uuid>,
    pub user_id: Uuid,
    pub trainer_id: Option<Uuid>,
    pub content: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub info: Option<String>,
    pub created_at: DateTime<Utc>,
}

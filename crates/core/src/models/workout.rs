use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutProgress {
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl WorkoutProgress {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutProgress::Assigned => "Assigned",
            WorkoutProgress::InProgress => "In Progress",
            WorkoutProgress::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveAction {
    Save,
    Unsave,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub name: String,
    pub sets: i32,
    pub reps: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub created_by: Uuid,
    pub assigned_by: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub progress: String,
    pub created_at: DateTime<Utc>,
    pub exercises: Vec<ExerciseResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutListResponse {
    pub workouts: Vec<WorkoutResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub created_by: Uuid,
    #[serde(default)]
    pub exercises: Vec<CreateExerciseRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkoutResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkoutRequest {
    pub requester_id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    #[serde(default)]
    pub exercises: Vec<CreateExerciseRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkoutResponse {
    pub id: Uuid,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWorkoutRequest {
    pub requester_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWorkoutResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignWorkoutRequest {
    pub workout_id: Uuid,
    pub assigned_by: Uuid,
    pub trainee_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentError {
    pub trainee_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignWorkoutResponse {
    pub success: bool,
    pub message: String,
    pub assigned_count: usize,
    pub errors: Vec<AssignmentError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWorkoutRequest {
    pub workout_id: Uuid,
    pub member_id: Uuid,
    pub action: SaveAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWorkoutResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProgressRequest {
    pub workout_id: Uuid,
    pub member_id: Uuid,
    pub status: WorkoutProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProgressResponse {
    pub success: bool,
    pub message: String,
}

use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbExercise, DbFeedback, DbLogEntry, DbTrainerAssignment, DbUser, DbWorkout};

// Mock repositories for testing

mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            username: &'static str,
            full_name: &'static str,
            email: &'static str,
            role: &'static str,
            password_hash: &'static str,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_username(
            &self,
            username: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_qr_code(
            &self,
            qr_code: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn extend_membership(
            &self,
            id: Uuid,
            expires_at: DateTime<Utc>,
        ) -> eyre::Result<DbUser>;

        pub async fn update_password(
            &self,
            id: Uuid,
            password_hash: &'static str,
        ) -> eyre::Result<()>;

        pub async fn verify_password(
            &self,
            username: &'static str,
            password: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn verify_password_by_id(
            &self,
            id: Uuid,
            password: &'static str,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub WorkoutRepo {
        pub async fn get_workout_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbWorkout>>;

        pub async fn get_exercises_by_workout_id(
            &self,
            workout_id: Uuid,
        ) -> eyre::Result<Vec<DbExercise>>;

        pub async fn find_assigned_copy(
            &self,
            source_workout_id: Uuid,
            trainee_id: Uuid,
        ) -> eyre::Result<Option<DbWorkout>>;

        pub async fn find_saved_copy(
            &self,
            source_workout_id: Uuid,
            member_id: Uuid,
        ) -> eyre::Result<Option<DbWorkout>>;

        pub async fn copy_workout(
            &self,
            source_workout_id: Uuid,
            assigned_by: Option<Uuid>,
            assigned_to: Option<Uuid>,
        ) -> eyre::Result<DbWorkout>;

        pub async fn copy_exercises(
            &self,
            from_workout_id: Uuid,
            to_workout_id: Uuid,
        ) -> eyre::Result<u64>;

        pub async fn update_progress(
            &self,
            workout_id: Uuid,
            member_id: Uuid,
            progress: &'static str,
        ) -> eyre::Result<u64>;

        pub async fn delete_exercises_by_workout_id(
            &self,
            workout_id: Uuid,
        ) -> eyre::Result<()>;

        pub async fn delete_workout_row(
            &self,
            id: Uuid,
        ) -> eyre::Result<()>;

        pub async fn get_member_workouts(
            &self,
            member_id: Uuid,
        ) -> eyre::Result<Vec<DbWorkout>>;
    }
}

mock! {
    pub TrainerRepo {
        pub async fn create_assignment(
            &self,
            trainer_id: Uuid,
            member_id: Uuid,
        ) -> eyre::Result<DbTrainerAssignment>;

        pub async fn get_assignment_by_member(
            &self,
            member_id: Uuid,
        ) -> eyre::Result<Option<DbTrainerAssignment>>;

        pub async fn get_members_by_trainer(
            &self,
            trainer_id: Uuid,
        ) -> eyre::Result<Vec<DbUser>>;
    }
}

mock! {
    pub FeedbackRepo {
        pub async fn find_workout_feedback(
            &self,
            workout_id: Uuid,
            user_id: Uuid,
        ) -> eyre::Result<Option<DbFeedback>>;

        pub async fn insert_feedback(
            &self,
            workout_id: Option<Uuid>,
            user_id: Uuid,
            trainer_id: Option<Uuid>,
            content: &'static str,
            rating: Option<i32>,
        ) -> eyre::Result<DbFeedback>;

        pub async fn update_feedback(
            &self,
            id: Uuid,
            content: &'static str,
            rating: Option<i32>,
        ) -> eyre::Result<DbFeedback>;
    }
}

mock! {
    pub LogRepo {
        pub async fn insert_log(
            &self,
            user_id: Uuid,
            action: &'static str,
            info: Option<&'static str>,
        ) -> eyre::Result<DbLogEntry>;

        pub async fn has_entry_today(
            &self,
            user_id: Uuid,
            action: &'static str,
        ) -> eyre::Result<bool>;

        pub async fn list_logs(
            &self,
            limit: i64,
        ) -> eyre::Result<Vec<DbLogEntry>>;
    }
}

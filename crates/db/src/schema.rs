use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            username VARCHAR(255) NOT NULL UNIQUE,
            full_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            contact VARCHAR(255) NULL,
            role VARCHAR(32) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            membership_expires_at TIMESTAMP WITH TIME ZONE NULL,
            qr_code VARCHAR(255) NOT NULL UNIQUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('member', 'trainer', 'staff', 'admin'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create workouts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS workouts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            level VARCHAR(64) NULL,
            created_by UUID NOT NULL REFERENCES users(id),
            assigned_by UUID NULL REFERENCES users(id),
            assigned_to UUID NULL REFERENCES users(id),
            progress VARCHAR(32) NOT NULL DEFAULT 'Assigned',
            source_workout_id UUID NULL REFERENCES workouts(id),
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_progress CHECK (progress IN ('Assigned', 'In Progress', 'Completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create exercises table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS exercises (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            workout_id UUID NOT NULL REFERENCES workouts(id),
            name VARCHAR(255) NOT NULL,
            sets INTEGER NOT NULL,
            reps INTEGER NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_sets CHECK (sets > 0),
            CONSTRAINT positive_reps CHECK (reps > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create trainer_assignments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trainer_assignments (
            trainer_id UUID NOT NULL REFERENCES users(id),
            member_id UUID NOT NULL REFERENCES users(id),
            assigned_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (trainer_id, member_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create feedback table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            workout_id UUID NULL REFERENCES workouts(id),
            user_id UUID NOT NULL REFERENCES users(id),
            trainer_id UUID NULL REFERENCES users(id),
            content TEXT NOT NULL,
            rating INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_rating CHECK (rating IS NULL OR (rating >= 1 AND rating <= 5))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create activity_log table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activity_log (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id),
            action VARCHAR(64) NOT NULL,
            info TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes. Unique indexes back the application-level duplicate
    // checks: one active instance per (template, trainee), one active saved
    // copy per (template, member), at most one trainer per member.
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_workouts_created_by ON workouts(created_by)",
        "CREATE INDEX IF NOT EXISTS idx_workouts_assigned_to ON workouts(assigned_to)",
        "CREATE INDEX IF NOT EXISTS idx_workouts_assigned_by ON workouts(assigned_by)",
        "CREATE INDEX IF NOT EXISTS idx_exercises_workout_id ON exercises(workout_id)",
        "CREATE INDEX IF NOT EXISTS idx_feedback_workout_id ON feedback(workout_id)",
        "CREATE INDEX IF NOT EXISTS idx_feedback_trainer_id ON feedback(trainer_id)",
        "CREATE INDEX IF NOT EXISTS idx_activity_log_user_id ON activity_log(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_activity_log_action ON activity_log(action)",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_workouts_assignment \
         ON workouts(source_workout_id, assigned_to) \
         WHERE assigned_to IS NOT NULL AND is_active",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_workouts_saved_copy \
         ON workouts(source_workout_id, created_by) \
         WHERE assigned_to IS NULL AND source_workout_id IS NOT NULL AND is_active",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_trainer_assignments_member \
         ON trainer_assignments(member_id)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

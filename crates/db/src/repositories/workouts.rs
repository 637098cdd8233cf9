use crate::models::{DbExercise, DbWorkout};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

pub async fn get_workout_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbWorkout>> {
    let workout = sqlx::query_as::<_, DbWorkout>(
        r#"
        SELECT id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        FROM workouts
        WHERE id = $1 AND is_active
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(workout)
}

pub async fn get_exercises_by_workout_id(
    pool: &Pool<Postgres>,
    workout_id: Uuid,
) -> Result<Vec<DbExercise>> {
    let exercises = sqlx::query_as::<_, DbExercise>(
        r#"
        SELECT id, workout_id, name, sets, reps, is_active, created_at
        FROM exercises
        WHERE workout_id = $1 AND is_active
        ORDER BY created_at
        "#,
    )
    .bind(workout_id)
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}

pub async fn insert_workout(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    description: Option<&str>,
    level: Option<&str>,
    created_by: Uuid,
    assigned_by: Option<Uuid>,
    assigned_to: Option<Uuid>,
    progress: &str,
    source_workout_id: Option<Uuid>,
) -> Result<DbWorkout> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Inserting workout: id={}, name={}, assigned_to={:?}",
        id,
        name,
        assigned_to
    );

    let workout = sqlx::query_as::<_, DbWorkout>(
        r#"
        INSERT INTO workouts (id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, $10)
        RETURNING id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(level)
    .bind(created_by)
    .bind(assigned_by)
    .bind(assigned_to)
    .bind(progress)
    .bind(source_workout_id)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(workout)
}

pub async fn insert_exercise(
    tx: &mut Transaction<'_, Postgres>,
    workout_id: Uuid,
    name: &str,
    sets: i32,
    reps: i32,
) -> Result<DbExercise> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let exercise = sqlx::query_as::<_, DbExercise>(
        r#"
        INSERT INTO exercises (id, workout_id, name, sets, reps, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, $6)
        RETURNING id, workout_id, name, sets, reps, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(workout_id)
    .bind(name)
    .bind(sets)
    .bind(reps)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(exercise)
}

/// Copies every active exercise row of one workout to another in a single
/// statement. Returns the number of rows copied.
pub async fn copy_exercises(
    tx: &mut Transaction<'_, Postgres>,
    from_workout_id: Uuid,
    to_workout_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO exercises (workout_id, name, sets, reps, is_active)
        SELECT $2, name, sets, reps, TRUE
        FROM exercises
        WHERE workout_id = $1 AND is_active
        "#,
    )
    .bind(from_workout_id)
    .bind(to_workout_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

pub async fn find_assigned_copy(
    tx: &mut Transaction<'_, Postgres>,
    source_workout_id: Uuid,
    trainee_id: Uuid,
) -> Result<Option<DbWorkout>> {
    let workout = sqlx::query_as::<_, DbWorkout>(
        r#"
        SELECT id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        FROM workouts
        WHERE source_workout_id = $1 AND assigned_to = $2 AND is_active
        "#,
    )
    .bind(source_workout_id)
    .bind(trainee_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(workout)
}

pub async fn find_saved_copy(
    tx: &mut Transaction<'_, Postgres>,
    source_workout_id: Uuid,
    member_id: Uuid,
) -> Result<Option<DbWorkout>> {
    let workout = sqlx::query_as::<_, DbWorkout>(
        r#"
        SELECT id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        FROM workouts
        WHERE source_workout_id = $1 AND created_by = $2 AND assigned_to IS NULL AND is_active
        "#,
    )
    .bind(source_workout_id)
    .bind(member_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(workout)
}

pub async fn update_workout(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    name: &str,
    description: Option<&str>,
    level: Option<&str>,
) -> Result<DbWorkout> {
    let workout = sqlx::query_as::<_, DbWorkout>(
        r#"
        UPDATE workouts
        SET name = $2, description = $3, level = $4
        WHERE id = $1
        RETURNING id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(level)
    .fetch_one(&mut **tx)
    .await?;

    Ok(workout)
}

/// Hard-deletes the exercise rows of a workout. Used when replacing a
/// workout's exercise list and when unsaving a copy; exercises must go
/// before the owning workout row.
pub async fn delete_exercises_by_workout_id(
    tx: &mut Transaction<'_, Postgres>,
    workout_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM exercises
        WHERE workout_id = $1
        "#,
    )
    .bind(workout_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete_workout_row(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM workouts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn soft_delete_workout(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE exercises
        SET is_active = FALSE
        WHERE workout_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE workouts
        SET is_active = FALSE
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Single guarded UPDATE; the caller decides what zero affected rows means.
pub async fn update_progress(
    pool: &Pool<Postgres>,
    workout_id: Uuid,
    member_id: Uuid,
    progress: &str,
) -> Result<u64> {
    tracing::debug!(
        "Updating progress: workout_id={}, member_id={}, progress={}",
        workout_id,
        member_id,
        progress
    );

    let result = sqlx::query(
        r#"
        UPDATE workouts
        SET progress = $3
        WHERE id = $1 AND assigned_to = $2 AND is_active
        "#,
    )
    .bind(workout_id)
    .bind(member_id)
    .bind(progress)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn get_created_workouts(
    pool: &Pool<Postgres>,
    creator_id: Uuid,
) -> Result<Vec<DbWorkout>> {
    let workouts = sqlx::query_as::<_, DbWorkout>(
        r#"
        SELECT id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        FROM workouts
        WHERE created_by = $1 AND assigned_to IS NULL AND source_workout_id IS NULL AND is_active
        ORDER BY created_at DESC
        "#,
    )
    .bind(creator_id)
    .fetch_all(pool)
    .await?;

    Ok(workouts)
}

pub async fn get_member_workouts(pool: &Pool<Postgres>, member_id: Uuid) -> Result<Vec<DbWorkout>> {
    let workouts = sqlx::query_as::<_, DbWorkout>(
        r#"
        SELECT id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        FROM workouts
        WHERE is_active
          AND (assigned_to = $1
               OR (created_by = $1 AND assigned_to IS NULL AND source_workout_id IS NOT NULL))
        ORDER BY created_at DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(workouts)
}

pub async fn get_assigned_workouts(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
) -> Result<Vec<DbWorkout>> {
    let workouts = sqlx::query_as::<_, DbWorkout>(
        r#"
        SELECT id, name, description, level, created_by, assigned_by, assigned_to, progress, source_workout_id, is_active, created_at
        FROM workouts
        WHERE assigned_by = $1 AND assigned_to IS NOT NULL AND is_active
        ORDER BY created_at DESC
        "#,
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(workouts)
}

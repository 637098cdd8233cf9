use crate::models::DbFeedback;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

pub async fn find_workout_feedback(
    tx: &mut Transaction<'_, Postgres>,
    workout_id: Uuid,
    user_id: Uuid,
) -> Result<Option<DbFeedback>> {
    let feedback = sqlx::query_as::<_, DbFeedback>(
        r#"
        SELECT id, workout_id, user_id, trainer_id, content, rating, created_at
        FROM feedback
        WHERE workout_id = $1 AND user_id = $2
        "#,
    )
    .bind(workout_id)
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(feedback)
}

pub async fn insert_feedback(
    tx: &mut Transaction<'_, Postgres>,
    workout_id: Option<Uuid>,
    user_id: Uuid,
    trainer_id: Option<Uuid>,
    content: &str,
    rating: Option<i32>,
) -> Result<DbFeedback> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Inserting feedback: id={}, user_id={}, workout_id={:?}",
        id,
        user_id,
        workout_id
    );

    let feedback = sqlx::query_as::<_, DbFeedback>(
        r#"
        INSERT INTO feedback (id, workout_id, user_id, trainer_id, content, rating, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, workout_id, user_id, trainer_id, content, rating, created_at
        "#,
    )
    .bind(id)
    .bind(workout_id)
    .bind(user_id)
    .bind(trainer_id)
    .bind(content)
    .bind(rating)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(feedback)
}

pub async fn update_feedback(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    content: &str,
    rating: Option<i32>,
) -> Result<DbFeedback> {
    let feedback = sqlx::query_as::<_, DbFeedback>(
        r#"
        UPDATE feedback
        SET content = $2, rating = $3
        WHERE id = $1
        RETURNING id, workout_id, user_id, trainer_id, content, rating, created_at
        "#,
    )
    .bind(id)
    .bind(content)
    .bind(rating)
    .fetch_one(&mut **tx)
    .await?;

    Ok(feedback)
}

pub async fn get_feedback_by_trainer(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
) -> Result<Vec<DbFeedback>> {
    let feedback = sqlx::query_as::<_, DbFeedback>(
        r#"
        SELECT id, workout_id, user_id, trainer_id, content, rating, created_at
        FROM feedback
        WHERE trainer_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(feedback)
}

pub async fn get_feedback_by_workout(
    pool: &Pool<Postgres>,
    workout_id: Uuid,
) -> Result<Vec<DbFeedback>> {
    let feedback = sqlx::query_as::<_, DbFeedback>(
        r#"
        SELECT id, workout_id, user_id, trainer_id, content, rating, created_at
        FROM feedback
        WHERE workout_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(workout_id)
    .fetch_all(pool)
    .await?;

    Ok(feedback)
}

use crate::models::DbLogEntry;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn insert_log(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    action: &str,
    info: Option<&str>,
) -> Result<DbLogEntry> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Logging action: user_id={}, action={}", user_id, action);

    let entry = sqlx::query_as::<_, DbLogEntry>(
        r#"
        INSERT INTO activity_log (id, user_id, action, info, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, action, info, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(action)
    .bind(info)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(entry)
}

pub async fn has_entry_today(pool: &Pool<Postgres>, user_id: Uuid, action: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM activity_log
            WHERE user_id = $1
              AND action = $2
              AND created_at >= date_trunc('day', NOW())
        );
        "#,
    )
    .bind(user_id)
    .bind(action)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn list_logs(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbLogEntry>> {
    let entries = sqlx::query_as::<_, DbLogEntry>(
        r#"
        SELECT id, user_id, action, info, created_at
        FROM activity_log
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

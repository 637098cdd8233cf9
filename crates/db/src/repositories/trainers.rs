use crate::models::{DbTrainerAssignment, DbUser};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_assignment(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
    member_id: Uuid,
) -> Result<DbTrainerAssignment> {
    let now = Utc::now();

    tracing::debug!(
        "Creating trainer assignment: trainer_id={}, member_id={}",
        trainer_id,
        member_id
    );

    let assignment = sqlx::query_as::<_, DbTrainerAssignment>(
        r#"
        INSERT INTO trainer_assignments (trainer_id, member_id, assigned_at)
        VALUES ($1, $2, $3)
        RETURNING trainer_id, member_id, assigned_at
        "#,
    )
    .bind(trainer_id)
    .bind(member_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(assignment)
}

pub async fn get_assignment_by_member(
    pool: &Pool<Postgres>,
    member_id: Uuid,
) -> Result<Option<DbTrainerAssignment>> {
    let assignment = sqlx::query_as::<_, DbTrainerAssignment>(
        r#"
        SELECT trainer_id, member_id, assigned_at
        FROM trainer_assignments
        WHERE member_id = $1
        "#,
    )
    .bind(member_id)
    .fetch_optional(pool)
    .await?;

    Ok(assignment)
}

pub async fn get_members_by_trainer(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
) -> Result<Vec<DbUser>> {
    let members = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT u.id, u.username, u.full_name, u.email, u.contact, u.role, u.password_hash, u.membership_expires_at, u.qr_code, u.created_at
        FROM users u
        JOIN trainer_assignments ta ON u.id = ta.member_id
        WHERE ta.trainer_id = $1
        ORDER BY ta.assigned_at
        "#,
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

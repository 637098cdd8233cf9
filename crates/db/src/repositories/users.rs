use crate::models::DbUser;
use argon2::{Argon2, PasswordVerifier};
use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(
    pool: &Pool<Postgres>,
    username: &str,
    full_name: &str,
    email: &str,
    contact: Option<&str>,
    role: &str,
    password_hash: &str,
    membership_expires_at: Option<DateTime<Utc>>,
    qr_code: &str,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating user: id={}, username={}, role={}",
        id,
        username,
        role
    );

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, username, full_name, email, contact, role, password_hash, membership_expires_at, qr_code, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, username, full_name, email, contact, role, password_hash, membership_expires_at, qr_code, created_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(full_name)
    .bind(email)
    .bind(contact)
    .bind(role)
    .bind(password_hash)
    .bind(membership_expires_at)
    .bind(qr_code)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("User created successfully: id={}", id);
    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, full_name, email, contact, role, password_hash, membership_expires_at, qr_code, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_username(pool: &Pool<Postgres>, username: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, full_name, email, contact, role, password_hash, membership_expires_at, qr_code, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_qr_code(pool: &Pool<Postgres>, qr_code: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, full_name, email, contact, role, password_hash, membership_expires_at, qr_code, created_at
        FROM users
        WHERE qr_code = $1
        "#,
    )
    .bind(qr_code)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    full_name: Option<&str>,
    email: Option<&str>,
    contact: Option<&str>,
) -> Result<DbUser> {
    let user = get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("User not found"))?;

    let full_name = full_name.unwrap_or(&user.full_name);
    let email = email.unwrap_or(&user.email);
    let contact = contact.or(user.contact.as_deref());

    let updated_user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET full_name = $2, email = $3, contact = $4
        WHERE id = $1
        RETURNING id, username, full_name, email, contact, role, password_hash, membership_expires_at, qr_code, created_at
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(email)
    .bind(contact)
    .fetch_one(pool)
    .await?;

    Ok(updated_user)
}

pub async fn extend_membership(
    pool: &Pool<Postgres>,
    id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<DbUser> {
    tracing::debug!("Extending membership: id={}, expires_at={}", id, expires_at);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET membership_expires_at = $2
        WHERE id = $1
        RETURNING id, username, full_name, email, contact, role, password_hash, membership_expires_at, qr_code, created_at
        "#,
    )
    .bind(id)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn update_password(pool: &Pool<Postgres>, id: Uuid, password_hash: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre!("User not found"));
    }

    Ok(())
}

pub async fn verify_password(
    pool: &Pool<Postgres>,
    username: &str,
    password: &str,
) -> Result<Option<DbUser>> {
    let user = match get_user_by_username(pool, username).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    if is_valid { Ok(Some(user)) } else { Ok(None) }
}

pub async fn verify_password_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
    password: &str,
) -> Result<bool> {
    let user = get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("User not found"))?;

    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid)
}

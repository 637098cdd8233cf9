//! # Authentication Module
//!
//! This module provides authentication-related utilities for the GymTrack API,
//! including password hashing and QR identifier generation for user accounts.
//!
//! The implementation uses Argon2, a secure password hashing algorithm,
//! to protect user passwords from common attacks like rainbow tables
//! and brute force attempts.

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use eyre::Result;
use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

/// Hashes a password using the Argon2 algorithm
///
/// This function securely hashes passwords before storage in the database,
/// automatically generating a random salt and using industry-standard
/// parameters for Argon2.
///
/// # Arguments
///
/// * `password` - The plain text password to hash
///
/// # Returns
///
/// * `Result<String>` - The hashed password in PHC string format, or an error
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Generates a unique QR identifier for a user account
///
/// The identifier is rendered into a scannable code by the client; the server
/// only stores and matches the opaque string.
pub fn generate_qr_code() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    format!("GYM-{}", suffix)
}

/// Verifies a user's password against the stored hash
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user_id` - UUID of the user to authenticate
/// * `password` - Plain text password to verify
///
/// # Returns
///
/// * `Result<bool>` - True if password matches, false otherwise
pub async fn verify_user_password(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    password: &str,
) -> Result<bool> {
    // Delegate to the database repository for verification
    let is_valid =
        gymtrack_db::repositories::users::verify_password_by_id(pool, user_id, password).await?;
    Ok(is_valid)
}

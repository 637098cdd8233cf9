use argon2::PasswordVerifier;
use axum::response::IntoResponse;
use gymtrack_api::middleware::auth;
use gymtrack_api::middleware::error_handling::AppError;
use gymtrack_core::errors::GymError;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = GymError::NotFound("Workout not found".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = GymError::Validation("Invalid input".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = GymError::Authentication("Invalid password".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = GymError::Authorization("Not the creator".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    let error = GymError::Conflict("Workout already assigned".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = GymError::Database(eyre::eyre!("Database error"));

    let response = AppError(error).into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_body_shape() {
    let error = GymError::Conflict("Entry already logged today".to_string());

    let response = AppError(error).into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Conflict: Entry already logged today");
}

#[tokio::test]
async fn test_database_error_body_is_generic() {
    // Raw database detail must never reach the client
    let error = GymError::Database(eyre::eyre!("connection refused to 10.0.0.5:5432"));

    let response = AppError(error).into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn test_hash_password() {
    // Test that password hashing works
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    // Verify the hash is different from the original password
    assert_ne!(hashed, password);

    // Verify the hash starts with the argon2 prefix
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_hash_password_roundtrip() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();

    // Verify a correct password
    let result = argon2.verify_password(password.as_bytes(), &parsed_hash);
    assert!(result.is_ok());

    // Verify an incorrect password
    let result = argon2.verify_password("wrong_password".as_bytes(), &parsed_hash);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_generate_qr_code() {
    let first = auth::generate_qr_code();
    let second = auth::generate_qr_code();

    assert!(first.starts_with("GYM-"));
    assert_eq!(first.len(), "GYM-".len() + 16);
    assert_ne!(first, second);
}

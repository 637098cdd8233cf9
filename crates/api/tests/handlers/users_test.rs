use axum::Json;
use chrono::{Duration, Utc};
use gymtrack_core::{
    errors::GymError,
    models::user::{ExtendMembershipRequest, ExtendMembershipResponse},
};
use gymtrack_db::models::DbUser;
use mockall::predicate;
use uuid::Uuid;

use crate::test_utils::TestContext;
use gymtrack_api::middleware::error_handling::AppError;

fn db_user(id: Uuid, role: &str) -> DbUser {
    DbUser {
        id,
        username: format!("user-{}", id),
        full_name: "Test User".to_string(),
        email: "user@example.com".to_string(),
        contact: None,
        role: role.to_string(),
        password_hash: "$argon2id$fake".to_string(),
        membership_expires_at: None,
        qr_code: format!("GYM-{}", id),
        created_at: Utc::now(),
    }
}

// Mirrors the extend_membership handler control flow against the mocks
async fn test_extend_membership_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    request: ExtendMembershipRequest,
) -> Result<Json<ExtendMembershipResponse>, AppError> {
    if request.days <= 0 {
        return Err(AppError(GymError::Validation(
            "days must be a positive number".to_string(),
        )));
    }

    let user = match ctx.user_repo.get_user_by_id(id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(AppError(GymError::NotFound(format!(
                "User with ID {} not found",
                id
            ))));
        }
        Err(_) => return Err(AppError(GymError::Database(eyre::eyre!("Database error")))),
    };

    let now = Utc::now();
    let base = match user.membership_expires_at {
        Some(expiry) if expiry > now => expiry,
        _ => now,
    };
    let expires_at = base + Duration::days(request.days);

    let updated = ctx
        .user_repo
        .extend_membership(id, expires_at)
        .await
        .map_err(|_| AppError(GymError::Database(eyre::eyre!("Database error"))))?;

    Ok(Json(ExtendMembershipResponse {
        id: updated.id,
        membership_expires_at: expires_at,
    }))
}

#[tokio::test]
async fn test_extend_membership_from_now_when_expired() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    // Membership expired two weeks ago, so the extension starts from now
    ctx.user_repo
        .expect_get_user_by_id()
        .with(predicate::eq(user_id))
        .returning(move |id| {
            let mut user = db_user(id, "member");
            user.membership_expires_at = Some(Utc::now() - Duration::days(14));
            Ok(Some(user))
        });

    ctx.user_repo
        .expect_extend_membership()
        .times(1)
        .returning(move |id, expires_at| {
            let mut user = db_user(id, "member");
            user.membership_expires_at = Some(expires_at);
            Ok(user)
        });

    let request = ExtendMembershipRequest {
        days: 30,
        extended_by: Uuid::new_v4(),
    };

    let before = Utc::now();
    let result = test_extend_membership_wrapper(&mut ctx, user_id, request).await;

    assert!(result.is_ok());
    let response = result.unwrap();
    let expiry = response.0.membership_expires_at;
    assert!(expiry >= before + Duration::days(30));
    assert!(expiry <= Utc::now() + Duration::days(30));
}

#[tokio::test]
async fn test_extend_membership_stacks_on_active_membership() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let current_expiry = Utc::now() + Duration::days(10);

    ctx.user_repo
        .expect_get_user_by_id()
        .with(predicate::eq(user_id))
        .returning(move |id| {
            let mut user = db_user(id, "member");
            user.membership_expires_at = Some(current_expiry);
            Ok(Some(user))
        });

    ctx.user_repo
        .expect_extend_membership()
        .with(
            predicate::eq(user_id),
            predicate::eq(current_expiry + Duration::days(30)),
        )
        .times(1)
        .returning(move |id, expires_at| {
            let mut user = db_user(id, "member");
            user.membership_expires_at = Some(expires_at);
            Ok(user)
        });

    let request = ExtendMembershipRequest {
        days: 30,
        extended_by: Uuid::new_v4(),
    };

    let result = test_extend_membership_wrapper(&mut ctx, user_id, request).await;

    assert!(result.is_ok());
    assert_eq!(
        result.unwrap().0.membership_expires_at,
        current_expiry + Duration::days(30)
    );
}

#[tokio::test]
async fn test_extend_membership_rejects_non_positive_days() {
    let mut ctx = TestContext::new();

    let request = ExtendMembershipRequest {
        days: 0,
        extended_by: Uuid::new_v4(),
    };

    let result = test_extend_membership_wrapper(&mut ctx, Uuid::new_v4(), request).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        GymError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_extend_membership_unknown_user() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    ctx.user_repo
        .expect_get_user_by_id()
        .with(predicate::eq(user_id))
        .returning(|_| Ok(None));
    ctx.user_repo.expect_extend_membership().times(0);

    let request = ExtendMembershipRequest {
        days: 30,
        extended_by: Uuid::new_v4(),
    };

    let result = test_extend_membership_wrapper(&mut ctx, user_id, request).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        GymError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

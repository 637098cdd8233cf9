use axum::Json;
use chrono::Utc;
use gymtrack_core::{
    errors::GymError,
    models::feedback::{SubmitFeedbackRequest, SubmitFeedbackResponse},
};
use gymtrack_db::models::DbFeedback;
use mockall::predicate;
use uuid::Uuid;

use crate::test_utils::TestContext;
use gymtrack_api::middleware::error_handling::AppError;

// Mirrors the submit_feedback handler control flow against the mocks
async fn test_submit_feedback_wrapper(
    ctx: &mut TestContext,
    request: SubmitFeedbackRequest,
) -> Result<Json<SubmitFeedbackResponse>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError(GymError::Validation(
            "Feedback content must not be empty".to_string(),
        )));
    }
    if let Some(rating) = request.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError(GymError::Validation(
                "Rating must be between 1 and 5".to_string(),
            )));
        }
    }

    // Use Box::leak to create a 'static str - this is fine in tests
    let content: &'static str = Box::leak(request.content.clone().into_boxed_str());

    let message = if let Some(workout_id) = request.workout_id {
        match ctx
            .feedback_repo
            .find_workout_feedback(workout_id, request.user_id)
            .await
        {
            Ok(Some(existing)) => {
                ctx.feedback_repo
                    .update_feedback(existing.id, content, request.rating)
                    .await
                    .map_err(|_| AppError(GymError::Database(eyre::eyre!("Database error"))))?;
                "Feedback updated"
            }
            Ok(None) => {
                ctx.feedback_repo
                    .insert_feedback(
                        Some(workout_id),
                        request.user_id,
                        request.trainer_id,
                        content,
                        request.rating,
                    )
                    .await
                    .map_err(|_| AppError(GymError::Database(eyre::eyre!("Database error"))))?;
                "Feedback submitted"
            }
            Err(_) => return Err(AppError(GymError::Database(eyre::eyre!("Database error")))),
        }
    } else {
        ctx.feedback_repo
            .insert_feedback(None, request.user_id, request.trainer_id, content, request.rating)
            .await
            .map_err(|_| AppError(GymError::Database(eyre::eyre!("Database error"))))?;
        "Feedback submitted"
    };

    Ok(Json(SubmitFeedbackResponse {
        success: true,
        message: message.to_string(),
    }))
}

fn db_feedback(workout_id: Option<Uuid>, user_id: Uuid, content: &str) -> DbFeedback {
    DbFeedback {
        id: Uuid::new_v4(),
        workout_id,
        user_id,
        trainer_id: None,
        content: content.to_string(),
        rating: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_submit_workout_feedback_inserts_first_time() {
    let mut ctx = TestContext::new();
    let workout_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    ctx.feedback_repo
        .expect_find_workout_feedback()
        .with(predicate::eq(workout_id), predicate::eq(user_id))
        .returning(|_, _| Ok(None));

    ctx.feedback_repo
        .expect_insert_feedback()
        .times(1)
        .returning(|workout_id, user_id, _, content, _| {
            Ok(db_feedback(workout_id, user_id, content))
        });
    ctx.feedback_repo.expect_update_feedback().times(0);

    let request = SubmitFeedbackRequest {
        user_id,
        content: "Great session".to_string(),
        workout_id: Some(workout_id),
        trainer_id: None,
        rating: Some(5),
    };

    let result = test_submit_feedback_wrapper(&mut ctx, request).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0.message, "Feedback submitted");
}

#[tokio::test]
async fn test_submit_workout_feedback_updates_second_time() {
    let mut ctx = TestContext::new();
    let workout_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let existing = db_feedback(Some(workout_id), user_id, "First impression");
    let existing_id = existing.id;

    ctx.feedback_repo
        .expect_find_workout_feedback()
        .with(predicate::eq(workout_id), predicate::eq(user_id))
        .returning(move |_, _| Ok(Some(existing.clone())));

    // A second submission for the same (workout, user) updates the row
    ctx.feedback_repo
        .expect_update_feedback()
        .with(
            predicate::eq(existing_id),
            predicate::eq("Revised impression"),
            predicate::eq(Some(4)),
        )
        .times(1)
        .returning(move |id, content, rating| {
            Ok(DbFeedback {
                id,
                workout_id: Some(workout_id),
                user_id,
                trainer_id: None,
                content: content.to_string(),
                rating,
                created_at: Utc::now(),
            })
        });
    ctx.feedback_repo.expect_insert_feedback().times(0);

    let request = SubmitFeedbackRequest {
        user_id,
        content: "Revised impression".to_string(),
        workout_id: Some(workout_id),
        trainer_id: None,
        rating: Some(4),
    };

    let result = test_submit_feedback_wrapper(&mut ctx, request).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0.message, "Feedback updated");
}

#[tokio::test]
async fn test_submit_general_feedback_inserts_without_lookup() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let trainer_id = Uuid::new_v4();

    // No workout id, so the per-workout uniqueness check is skipped
    ctx.feedback_repo.expect_find_workout_feedback().times(0);
    ctx.feedback_repo
        .expect_insert_feedback()
        .with(
            predicate::eq(None),
            predicate::eq(user_id),
            predicate::eq(Some(trainer_id)),
            predicate::always(),
            predicate::eq(None),
        )
        .times(1)
        .returning(|workout_id, user_id, _, content, _| {
            Ok(db_feedback(workout_id, user_id, content))
        });

    let request = SubmitFeedbackRequest {
        user_id,
        content: "Very helpful trainer".to_string(),
        workout_id: None,
        trainer_id: Some(trainer_id),
        rating: None,
    };

    let result = test_submit_feedback_wrapper(&mut ctx, request).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0.message, "Feedback submitted");
}

#[tokio::test]
async fn test_submit_feedback_rejects_empty_content() {
    let mut ctx = TestContext::new();

    let request = SubmitFeedbackRequest {
        user_id: Uuid::new_v4(),
        content: "   ".to_string(),
        workout_id: None,
        trainer_id: None,
        rating: None,
    };

    let result = test_submit_feedback_wrapper(&mut ctx, request).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        GymError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_submit_feedback_rejects_out_of_range_rating() {
    let mut ctx = TestContext::new();

    let request = SubmitFeedbackRequest {
        user_id: Uuid::new_v4(),
        content: "Solid".to_string(),
        workout_id: None,
        trainer_id: None,
        rating: Some(6),
    };

    let result = test_submit_feedback_wrapper(&mut ctx, request).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        GymError::Validation(message) => {
            assert_eq!(message, "Rating must be between 1 and 5");
        }
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

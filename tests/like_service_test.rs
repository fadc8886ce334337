//! Like service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use social_core::domain::{Like, NewLike};
use social_core::errors::AppError;
use social_core::infra::repositories::{MockLikeRepository, MockUserRepository};
use social_core::infra::{LikeRepository, UnitOfWork, UserRepository};
use social_core::services::{LikeRegistry, LikeService};

fn create_test_like(id: i32, user_id: i32, post_id: i64) -> Like {
    Like {
        id,
        user_id,
        post_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Test mock for UnitOfWork that wraps mock repositories
struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    like_repo: Arc<MockLikeRepository>,
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn likes(&self) -> Arc<dyn LikeRepository> {
        self.like_repo.clone()
    }
}

fn service(repo: MockLikeRepository) -> LikeRegistry<TestUnitOfWork> {
    LikeRegistry::new(Arc::new(TestUnitOfWork {
        user_repo: Arc::new(MockUserRepository::new()),
        like_repo: Arc::new(repo),
    }))
}

#[tokio::test]
async fn test_create_like() {
    let mut repo = MockLikeRepository::new();
    repo.expect_create()
        .with(eq(1), eq(42))
        .times(1)
        .returning(|user_id, post_id| Ok(create_test_like(10, user_id, post_id)));

    let like = service(repo).create(NewLike::new(1, 42)).await.unwrap();

    assert_eq!(like.id, 10);
    assert_eq!(like.user_id, 1);
    assert_eq!(like.post_id, 42);
}

#[tokio::test]
async fn test_duplicate_like_is_conflict() {
    let mut repo = MockLikeRepository::new();
    repo.expect_create()
        .returning(|_, _| Err(AppError::conflict("Like")));

    let result = service(repo).create(NewLike::new(1, 42)).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_unlike_is_scoped_to_pair() {
    let mut repo = MockLikeRepository::new();
    repo.expect_delete_by_pair()
        .with(eq(1), eq(42))
        .times(1)
        .returning(|_, _| Ok(1));
    repo.expect_delete_one_by_user().never();

    let affected = service(repo).unlike(1, 42).await.unwrap();

    assert_eq!(affected, 1);
}

#[tokio::test]
async fn test_unlike_when_not_liked_returns_zero() {
    let mut repo = MockLikeRepository::new();
    repo.expect_delete_by_pair().returning(|_, _| Ok(0));

    assert_eq!(service(repo).unlike(1, 42).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_by_user_removes_single_row() {
    let mut repo = MockLikeRepository::new();
    repo.expect_delete_one_by_user()
        .with(eq(3))
        .times(1)
        .returning(|_| Ok(1));

    assert_eq!(service(repo).delete_by_user(3).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_by_post() {
    let mut repo = MockLikeRepository::new();
    repo.expect_list_by_post().with(eq(42)).returning(|post_id| {
        Ok(vec![
            create_test_like(1, 1, post_id),
            create_test_like(2, 2, post_id),
        ])
    });

    let likes = service(repo).list_by_post(42).await.unwrap();

    assert_eq!(likes.len(), 2);
    assert!(likes.iter().all(|l| l.post_id == 42));
}

#[tokio::test]
async fn test_has_user_liked_and_count() {
    let mut repo = MockLikeRepository::new();
    repo.expect_exists()
        .with(eq(1), eq(42))
        .returning(|_, _| Ok(true));
    repo.expect_exists()
        .with(eq(2), eq(42))
        .returning(|_, _| Ok(false));
    repo.expect_count_by_post().with(eq(42)).returning(|_| Ok(1));

    let service = service(repo);

    assert!(service.has_user_liked(1, 42).await.unwrap());
    assert!(!service.has_user_liked(2, 42).await.unwrap());
    assert_eq!(service.count_by_post(42).await.unwrap(), 1);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let mut repo = MockLikeRepository::new();
    repo.expect_list_by_post()
        .returning(|_| Err(AppError::Database(sea_orm::DbErr::Custom("gone".into()))));

    let result = service(repo).list_by_post(42).await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

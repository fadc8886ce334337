//! Like service - Like/unlike and per-post queries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Like, NewLike};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Like service trait for dependency injection.
#[async_trait]
pub trait LikeService: Send + Sync {
    /// Record a like. Liking the same post twice is a `Conflict`.
    async fn create(&self, like: NewLike) -> AppResult<Like>;

    /// Remove one like by this user regardless of post.
    ///
    /// Legacy scoping; prefer `unlike`.
    async fn delete_by_user(&self, user_id: i32) -> AppResult<u64>;

    /// Remove this user's like on this post
    async fn unlike(&self, user_id: i32, post_id: i64) -> AppResult<u64>;

    /// All likes on a post
    async fn list_by_post(&self, post_id: i64) -> AppResult<Vec<Like>>;

    /// Whether the user has liked the post
    async fn has_user_liked(&self, user_id: i32, post_id: i64) -> AppResult<bool>;

    /// Number of likes on a post
    async fn count_by_post(&self, post_id: i64) -> AppResult<u64>;
}

/// Concrete implementation of LikeService using Unit of Work.
pub struct LikeRegistry<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LikeRegistry<U> {
    /// Create new like service instance
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> LikeService for LikeRegistry<U> {
    async fn create(&self, like: NewLike) -> AppResult<Like> {
        let created = self.uow.likes().create(like.user_id, like.post_id).await?;
        tracing::debug!(
            like_id = created.id,
            user_id = like.user_id,
            post_id = like.post_id,
            "Like created"
        );
        Ok(created)
    }

    async fn delete_by_user(&self, user_id: i32) -> AppResult<u64> {
        let affected = self.uow.likes().delete_one_by_user(user_id).await?;
        tracing::debug!(user_id, affected, "Like removed by user");
        Ok(affected)
    }

    async fn unlike(&self, user_id: i32, post_id: i64) -> AppResult<u64> {
        let affected = self.uow.likes().delete_by_pair(user_id, post_id).await?;
        tracing::debug!(user_id, post_id, affected, "Like removed");
        Ok(affected)
    }

    async fn list_by_post(&self, post_id: i64) -> AppResult<Vec<Like>> {
        self.uow.likes().list_by_post(post_id).await
    }

    async fn has_user_liked(&self, user_id: i32, post_id: i64) -> AppResult<bool> {
        self.uow.likes().exists(user_id, post_id).await
    }

    async fn count_by_post(&self, post_id: i64) -> AppResult<u64> {
        self.uow.likes().count_by_post(post_id).await
    }
}

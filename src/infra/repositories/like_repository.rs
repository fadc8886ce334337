//! Like repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Order, Query},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::like::{self, ActiveModel, Entity as LikeEntity};
use crate::domain::Like;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Like repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Insert a like; a repeated (user, post) pair is a conflict
    async fn create(&self, user_id: i32, post_id: i64) -> AppResult<Like>;

    /// Remove the oldest like by this user, whatever the post
    async fn delete_one_by_user(&self, user_id: i32) -> AppResult<u64>;

    /// Remove the like for exactly this (user, post) pair
    async fn delete_by_pair(&self, user_id: i32, post_id: i64) -> AppResult<u64>;

    /// All likes on a post, ordered by id
    async fn list_by_post(&self, post_id: i64) -> AppResult<Vec<Like>>;

    /// Whether the pair exists, without loading the row
    async fn exists(&self, user_id: i32, post_id: i64) -> AppResult<bool>;

    /// Number of likes on a post
    async fn count_by_post(&self, post_id: i64) -> AppResult<u64>;
}

/// Concrete implementation of LikeRepository
pub struct LikeStore {
    db: DatabaseConnection,
}

impl LikeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LikeRepository for LikeStore {
    async fn create(&self, user_id: i32, post_id: i64) -> AppResult<Like> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            post_id: Set(post_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, &[], "Like"))?;
        Ok(Like::from(model))
    }

    async fn delete_one_by_user(&self, user_id: i32) -> AppResult<u64> {
        let oldest = Query::select()
            .column(like::Column::Id)
            .from(LikeEntity)
            .and_where(like::Column::UserId.eq(user_id))
            .order_by(like::Column::Id, Order::Asc)
            .limit(1)
            .to_owned();

        let result = LikeEntity::delete_many()
            .filter(like::Column::Id.in_subquery(oldest))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete_by_pair(&self, user_id: i32, post_id: i64) -> AppResult<u64> {
        let result = LikeEntity::delete_many()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn list_by_post(&self, post_id: i64) -> AppResult<Vec<Like>> {
        let models = LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .order_by_asc(like::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Like::from).collect())
    }

    async fn exists(&self, user_id: i32, post_id: i64) -> AppResult<bool> {
        let count = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn count_by_post(&self, post_id: i64) -> AppResult<u64> {
        LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}

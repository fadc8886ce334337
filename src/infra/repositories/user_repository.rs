//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Columns carrying a unique constraint, with the label reported on conflict.
const UNIQUE_COLUMNS: &[(&str, &str)] = &[("nickname", "Nickname"), ("email", "Email")];

fn write_error(err: DbErr) -> AppError {
    AppError::from_write(err, UNIQUE_COLUMNS, "User")
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by (sanitized) email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user whose password is already hashed
    async fn create(
        &self,
        nickname: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> AppResult<User>;

    /// Overwrite nickname, email and password, refresh `updated_at`,
    /// and return the re-read row
    async fn update(
        &self,
        id: i32,
        nickname: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User>;

    /// Hard delete; returns rows affected
    async fn delete(&self, id: i32) -> AppResult<u64>;

    /// List at most `limit` users, ordered by id
    async fn list(&self, limit: u64) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        nickname: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            nickname: Set(nickname),
            email: Set(email),
            password: Set(password_hash),
            created_at: Set(created_at),
            updated_at: Set(created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: i32,
        nickname: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User> {
        // Single statement: the timestamp only moves if the row is written
        let result = UserEntity::update_many()
            .col_expr(user::Column::Nickname, Expr::value(nickname))
            .col_expr(user::Column::Email, Expr::value(email))
            .col_expr(user::Column::Password, Expr::value(password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        self.find_by_id(id).await?.ok_or_not_found()
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn list(&self, limit: u64) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

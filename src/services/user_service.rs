//! User service - Credential lifecycle and identity lookups.
//!
//! Orchestrates draft preparation, validation and hashing in the domain
//! layer, then persists through the Unit of Work.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{CredentialHasher, Password, User, UserDraft, ValidationMode};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Prepare, validate, hash and insert a new user
    async fn create_user(&self, draft: UserDraft) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List at most `limit` users
    async fn list_users(&self, limit: u64) -> AppResult<Vec<User>>;

    /// Replace nickname, email and password of an existing user
    async fn update_user(&self, id: i32, draft: UserDraft) -> AppResult<User>;

    /// Hard delete; 0 when nothing matched
    async fn delete_user(&self, id: i32) -> AppResult<u64>;

    /// Check email and password, returning the matching user
    async fn authenticate(&self, credentials: UserDraft) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<CredentialHasher>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance
    pub fn new(uow: Arc<U>, hasher: Arc<CredentialHasher>) -> Self {
        Self { uow, hasher }
    }

    /// Hash the draft password on the blocking pool; argon2 is CPU bound.
    async fn hash_draft(&self, mut draft: UserDraft) -> AppResult<UserDraft> {
        let hasher = self.hasher.clone();
        run_blocking(move || {
            draft.hash_password(&hasher)?;
            Ok(draft)
        })
        .await
    }
}

fn ensure_valid(draft: &UserDraft, mode: ValidationMode) -> AppResult<()> {
    let errors = draft.validate(mode);
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(?mode, count = errors.len(), "User draft rejected");
        Err(AppError::Validation(errors))
    }
}

async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Blocking task failed: {}", e)))?
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, mut draft: UserDraft) -> AppResult<User> {
        draft.prepare();
        ensure_valid(&draft, ValidationMode::Create)?;

        let draft = self.hash_draft(draft).await?;
        let password_hash = draft.password().to_string();
        let created_at = draft.created_at.unwrap_or_else(Utc::now);

        let user = self
            .uow
            .users()
            .create(draft.nickname, draft.email, password_hash, created_at)
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, limit: u64) -> AppResult<Vec<User>> {
        self.uow.users().list(limit).await
    }

    async fn update_user(&self, id: i32, mut draft: UserDraft) -> AppResult<User> {
        draft.sanitize();
        ensure_valid(&draft, ValidationMode::Update)?;

        // A hashing failure ends the update before anything is written
        let draft = self.hash_draft(draft).await?;
        let password_hash = draft.password().to_string();

        let user = self
            .uow
            .users()
            .update(id, draft.nickname, draft.email, password_hash)
            .await?;

        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> AppResult<u64> {
        let affected = self.uow.users().delete(id).await?;
        if affected == 0 {
            tracing::debug!(user_id = id, "Delete matched no user");
        } else {
            tracing::info!(user_id = id, "User deleted");
        }
        Ok(affected)
    }

    async fn authenticate(&self, mut credentials: UserDraft) -> AppResult<User> {
        credentials.sanitize();
        ensure_valid(&credentials, ValidationMode::Login)?;

        let user = self.uow.users().find_by_email(&credentials.email).await?;

        // Verify even when the email is unknown so timing doesn't leak which
        // addresses are registered.
        let stored = user.as_ref().map(|u| u.password_hash.clone());
        let candidate = credentials.password().to_string();
        let hasher = self.hasher.clone();
        let password_valid = run_blocking(move || {
            let stored = match stored {
                Some(hash) => Password::from_hash(hash),
                None => hasher.decoy()?.clone(),
            };
            Ok(stored.verify(&candidate))
        })
        .await?;

        match user {
            Some(user) if password_valid => Ok(user),
            _ => {
                tracing::debug!("Authentication failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

//! Unit of Work - single access point to every repository.
//!
//! Services hold a `UnitOfWork` instead of individual repositories, so one
//! connection pool backs both aggregates and tests can swap in mocks.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{LikeRepository, LikeStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get like repository
    fn likes(&self) -> Arc<dyn LikeRepository>;
}

/// Concrete implementation of UnitOfWork over a SeaORM connection
pub struct Persistence {
    user_repo: Arc<UserStore>,
    like_repo: Arc<LikeStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            like_repo: Arc::new(LikeStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn likes(&self) -> Arc<dyn LikeRepository> {
        self.like_repo.clone()
    }
}

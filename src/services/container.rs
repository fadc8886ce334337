//! Service Container - Centralized service access.
//!
//! Wires both services over one Unit of Work and one configured hasher.

use std::sync::Arc;

use super::{LikeRegistry, LikeService, UserManager, UserService};
use crate::config::Config;
use crate::domain::CredentialHasher;
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get like service
    fn likes(&self) -> Arc<dyn LikeService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    like_service: Arc<dyn LikeService>,
}

impl Services {
    /// Create service container from database connection and config.
    ///
    /// Fails if the configured hash parameters are rejected by argon2.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> AppResult<Self> {
        let hasher = Arc::new(CredentialHasher::new(&config.hash)?);
        let uow = Arc::new(Persistence::new(db));

        Ok(Self {
            user_service: Arc::new(UserManager::new(uow.clone(), hasher)),
            like_service: Arc::new(LikeRegistry::new(uow)),
        })
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn likes(&self) -> Arc<dyn LikeService> {
        self.like_service.clone()
    }
}

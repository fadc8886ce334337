//! Social Core - users and post likes.
//!
//! Data-access and domain-validation layer for a small social application:
//! user accounts with hashed credentials, and one-like-per-post relations
//! between users and posts.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Database, migrations, repositories
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Apply the schema
//! cargo run -- migrate up
//!
//! # Check the database is reachable
//! cargo run -- check
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{CredentialHasher, Like, NewLike, Password, User, UserDraft, ValidationMode};
pub use errors::{AppError, AppResult};
pub use services::{LikeService, ServiceContainer, Services, UserService};

//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Contains: Entities, Value Objects, Domain Services.

pub mod like;
pub mod password;
pub mod user;

pub use like::{Like, NewLike};
pub use password::{CredentialHasher, Password};
pub use user::{sanitize, User, UserDraft, ValidationMode, ValidationRules};

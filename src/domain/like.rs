//! Like domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's like on a post. Both sides are referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like creation input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLike {
    pub user_id: i32,
    pub post_id: i64,
}

impl NewLike {
    pub fn new(user_id: i32, post_id: i64) -> Self {
        Self { user_id, post_id }
    }
}

//! User entity model.
//!
//! The user record is the anchor for ownership. Authentication lives in
//! the fronting identity provider; this row only ties a stable key to a
//! username and a creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nestfile_core::types::UserId;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Stable opaque key — the principal for all scoped operations.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
}

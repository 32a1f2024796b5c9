//! User-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Events related to user operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    /// A new user was created.
    Created {
        /// The user key.
        user_id: UserId,
        /// The username.
        username: String,
    },
    /// A user was deleted.
    Deleted {
        /// The user key.
        user_id: UserId,
    },
}

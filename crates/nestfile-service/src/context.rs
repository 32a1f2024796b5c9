//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nestfile_core::types::UserId;

/// Context for the current authenticated request.
///
/// Extracted at the API boundary and passed into service methods so that
/// every operation knows *who* is acting. The identity provider in front
/// of the service is the source of truth for the principal; nothing in
/// here is trusted from the request body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's key.
    pub principal: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(principal: UserId) -> Self {
        Self {
            principal,
            request_time: Utc::now(),
        }
    }
}

//! User registration and retrieval.

use std::sync::Arc;

use tracing::info;

use nestfile_core::error::AppError;
use nestfile_core::events::{DomainEvent, EventBus, EventPayload, UserEvent};
use nestfile_core::result::AppResult;
use nestfile_core::types::UserSelector;
use nestfile_database::repositories::user::UserRepository;
use nestfile_entity::user::{CreateUser, User};

use crate::context::RequestContext;
use crate::validate::validate_name;

/// Maximum username length, matching the column width.
const MAX_USERNAME_LEN: usize = 150;

/// Manages user records.
#[derive(Debug)]
pub struct UserService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Event bus for user lifecycle events.
    events: Arc<EventBus>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<UserRepository>, events: Arc<EventBus>) -> Self {
        Self { users, events }
    }

    /// Registers a new user and announces the creation.
    ///
    /// Downstream provisioning (the root folder) happens in reaction to
    /// the published event, not inline here.
    pub async fn register(&self, username: &str) -> AppResult<User> {
        validate_name(username)?;
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::validation(format!(
                "Username cannot exceed {MAX_USERNAME_LEN} characters"
            )));
        }

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
            })
            .await?;

        self.events
            .publish(DomainEvent::new(EventPayload::User(UserEvent::Created {
                user_id: user.id,
                username: user.username.clone(),
            })));

        info!(user = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Retrieves a user; `default` resolves to the caller.
    pub async fn get(&self, ctx: &RequestContext, selector: UserSelector) -> AppResult<User> {
        let id = match selector {
            UserSelector::Default => ctx.principal,
            UserSelector::Id(id) => id,
        };

        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

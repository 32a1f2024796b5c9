//! User repository implementation.

use sqlx::PgPool;

use nestfile_core::error::{AppError, ErrorKind};
use nestfile_core::result::AppResult;
use nestfile_core::types::UserId;
use nestfile_entity::user::{CreateUser, User};

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by key.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>("INSERT INTO users (id, username) VALUES ($1, $2) RETURNING *")
            .bind(UserId::new())
            .bind(&data.username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("users_username_key") =>
                {
                    AppError::conflict(format!("Username '{}' is already taken", data.username))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
            })
    }
}

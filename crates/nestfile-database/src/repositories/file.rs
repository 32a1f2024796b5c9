//! File repository implementation.

use sqlx::PgPool;

use nestfile_core::error::{AppError, ErrorKind};
use nestfile_core::result::AppResult;
use nestfile_core::types::{FileId, UserId};
use nestfile_entity::file::{CreateFile, File};

/// Repository for file CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by public id.
    pub async fn find_by_public_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE public_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List files directly inside a folder, oldest first.
    pub async fn find_by_folder(&self, folder_key: i64) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(folder_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// List every file of an owner, filed or not, oldest first.
    pub async fn find_by_owner(&self, owner: UserId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Create a new file record.
    ///
    /// The target folder, when supplied, must belong to the file's owner;
    /// the check runs inside the inserting transaction.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        if let Some(folder_key) = data.folder_id {
            let folder_owner: Option<UserId> =
                sqlx::query_scalar("SELECT owner_id FROM folders WHERE id = $1")
                    .bind(folder_key)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to check folder", e)
                    })?;

            match folder_owner {
                None => return Err(AppError::not_found("Folder not found")),
                Some(owner) if owner != data.owner_id => {
                    return Err(AppError::owner_mismatch(
                        "Folder belongs to a different owner",
                    ));
                }
                Some(_) => {}
            }
        }

        let file = sqlx::query_as::<_, File>(
            "INSERT INTO files (public_id, name, content_ref, folder_id, owner_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(FileId::new())
        .bind(&data.name)
        .bind(&data.content_ref)
        .bind(data.folder_id)
        .bind(data.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit", e))?;

        Ok(file)
    }

    /// Delete a file. Returns whether a row was removed.
    pub async fn delete(&self, file_key: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(file_key)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

//! Folder repository implementation.
//!
//! The schema does the heavy lifting for the two tricky invariants:
//! deleting a folder cascades to descendants (`ON DELETE CASCADE` on
//! `parent_id`) and detaches contained files (`ON DELETE SET NULL` on
//! `files.folder_id`) in a single atomic statement, and the partial
//! unique index on `(owner_id) WHERE parent_id IS NULL` arbitrates
//! concurrent root provisioning.

use sqlx::PgPool;

use nestfile_core::error::{AppError, ErrorKind};
use nestfile_core::result::AppResult;
use nestfile_core::types::{FolderId, UserId};
use nestfile_entity::folder::{CreateFolder, Folder};

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by public id.
    pub async fn find_by_public_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE public_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find the root folder of an owner, if provisioned.
    pub async fn find_root(&self, owner: UserId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id IS NULL",
        )
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root folder", e))
    }

    /// List direct children of a folder, oldest first.
    pub async fn find_children(&self, parent_key: i64) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(parent_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// List every folder of an owner, oldest first.
    pub async fn find_by_owner(&self, owner: UserId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Get the chain from a folder up to its root, root first.
    ///
    /// The folder itself is included as the last element.
    pub async fn ancestor_chain(&self, folder_key: i64) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT *, 0 AS hop FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.*, a.hop + 1 FROM folders f \
                    INNER JOIN ancestors a ON f.id = a.parent_id \
             ) SELECT id, public_id, name, parent_id, owner_id, created_at \
               FROM ancestors ORDER BY hop DESC",
        )
        .bind(folder_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))
    }

    /// Create a new folder.
    ///
    /// The parent, when supplied, must exist and belong to the same
    /// owner; the check runs inside the inserting transaction so a
    /// concurrent parent delete cannot slip a folder under a foreign or
    /// vanished parent.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        if let Some(parent_key) = data.parent_id {
            let parent_owner: Option<UserId> =
                sqlx::query_scalar("SELECT owner_id FROM folders WHERE id = $1")
                    .bind(parent_key)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to check parent", e)
                    })?;

            match parent_owner {
                None => return Err(AppError::invalid_parent("Parent folder does not exist")),
                Some(owner) if owner != data.owner_id => {
                    return Err(AppError::invalid_parent(
                        "Parent folder belongs to a different owner",
                    ));
                }
                Some(_) => {}
            }
        }

        let folder = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (public_id, name, parent_id, owner_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(FolderId::new())
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_owner_root_key") =>
            {
                AppError::conflict("Owner already has a root folder")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit", e))?;

        Ok(folder)
    }

    /// Create the owner's root folder if it does not exist yet.
    ///
    /// Safe under concurrent duplicate calls: the partial unique index on
    /// `(owner_id) WHERE parent_id IS NULL` makes the insert a no-op for
    /// the loser, which then reads the winner's row.
    pub async fn ensure_root(&self, owner: UserId) -> AppResult<Folder> {
        let inserted = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (public_id, name, parent_id, owner_id) \
             VALUES ($1, 'root', NULL, $2) \
             ON CONFLICT (owner_id) WHERE parent_id IS NULL DO NOTHING \
             RETURNING *",
        )
        .bind(FolderId::new())
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to provision root folder", e)
        })?;

        if let Some(folder) = inserted {
            return Ok(folder);
        }

        self.find_root(owner).await?.ok_or_else(|| {
            AppError::internal(format!(
                "Root folder for user {owner} vanished during provisioning"
            ))
        })
    }

    /// Rename a folder. Root folders are refused.
    pub async fn rename(&self, folder_key: i64, new_name: &str) -> AppResult<Folder> {
        let renamed = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2 WHERE id = $1 AND parent_id IS NOT NULL RETURNING *",
        )
        .bind(folder_key)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?;

        match renamed {
            Some(folder) => Ok(folder),
            None => {
                let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM folders WHERE id = $1")
                    .bind(folder_key)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to check folder", e)
                    })?;
                if exists.is_some() {
                    Err(AppError::protected("Root folders cannot be renamed"))
                } else {
                    Err(AppError::not_found("Folder not found"))
                }
            }
        }
    }

    /// Move a folder under a new parent.
    ///
    /// Rejects roots, cross-owner parents, and any parent inside the
    /// folder's own subtree. Runs entirely inside one transaction with
    /// the moved row locked.
    pub async fn set_parent(&self, folder_key: i64, new_parent_key: i64) -> AppResult<Folder> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        let row: Option<(UserId, Option<i64>)> =
            sqlx::query_as("SELECT owner_id, parent_id FROM folders WHERE id = $1 FOR UPDATE")
                .bind(folder_key)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock folder", e)
                })?;

        let (owner, parent_id) = match row {
            None => return Err(AppError::not_found("Folder not found")),
            Some(row) => row,
        };
        if parent_id.is_none() {
            return Err(AppError::protected("Root folders cannot be moved"));
        }

        let new_parent_owner: Option<UserId> =
            sqlx::query_scalar("SELECT owner_id FROM folders WHERE id = $1")
                .bind(new_parent_key)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check parent", e)
                })?;

        match new_parent_owner {
            None => return Err(AppError::invalid_parent("Parent folder does not exist")),
            Some(parent_owner) if parent_owner != owner => {
                return Err(AppError::invalid_parent(
                    "Parent folder belongs to a different owner",
                ));
            }
            Some(_) => {}
        }

        // The new parent must not sit inside the moved folder's subtree.
        let parent_ancestors: Vec<i64> = sqlx::query_scalar(
            "WITH RECURSIVE ancestors AS ( \
                SELECT id, parent_id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.parent_id FROM folders f \
                    INNER JOIN ancestors a ON f.id = a.parent_id \
             ) SELECT id FROM ancestors",
        )
        .bind(new_parent_key)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to walk ancestors", e))?;

        if parent_ancestors.contains(&folder_key) {
            return Err(AppError::invalid_parent(
                "Cannot move a folder into its own subtree",
            ));
        }

        let folder = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(folder_key)
        .bind(new_parent_key)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit", e))?;

        Ok(folder)
    }

    /// Delete a folder and its whole subtree, detaching contained files.
    ///
    /// Deleting an already-deleted key is a success; deleting a root is
    /// refused. The row is locked before the check so a concurrent move
    /// cannot change its root status mid-delete, and the FK actions make
    /// the cascade atomic with the delete itself.
    pub async fn delete(&self, folder_key: i64) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        let parent_id: Option<Option<i64>> =
            sqlx::query_scalar("SELECT parent_id FROM folders WHERE id = $1 FOR UPDATE")
                .bind(folder_key)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock folder", e)
                })?;

        match parent_id {
            None => Ok(()),
            Some(None) => Err(AppError::protected("Root folders cannot be deleted")),
            Some(Some(_)) => {
                sqlx::query("DELETE FROM folders WHERE id = $1")
                    .bind(folder_key)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
                    })?;

                tx.commit().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to commit", e)
                })?;
                Ok(())
            }
        }
    }

    /// Count files directly inside a folder.
    pub async fn count_files(&self, folder_key: i64) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE folder_id = $1")
            .bind(folder_key)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
        Ok(count as u64)
    }
}

//! Ownership-scoped file operations.
//!
//! Same scoping rules as folders: a file that exists under another owner
//! is indistinguishable from one that does not exist.

use std::sync::Arc;

use tracing::info;

use nestfile_core::error::AppError;
use nestfile_core::result::AppResult;
use nestfile_core::types::{FileId, FolderSelector};
use nestfile_database::repositories::file::FileRepository;
use nestfile_entity::file::{CreateFile, File};

use crate::context::RequestContext;
use crate::folder::service::FolderService;
use crate::validate::validate_name;

/// Manages file operations scoped to the requesting principal.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    files: Arc<FileRepository>,
    /// Scoped folder access for resolving folder references.
    folders: Arc<FolderService>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<FileRepository>, folders: Arc<FolderService>) -> Self {
        Self { files, folders }
    }

    /// Resolves a public id to one of the caller's files.
    pub async fn resolve(&self, ctx: &RequestContext, id: FileId) -> AppResult<File> {
        self.files
            .find_by_public_id(id)
            .await?
            .filter(|f| f.owner_id == ctx.principal)
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Lists all of the caller's files, filed or not, oldest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        self.files.find_by_owner(ctx.principal).await
    }

    /// Lists the files directly inside one of the caller's folders.
    pub async fn list_in(
        &self,
        ctx: &RequestContext,
        selector: FolderSelector,
    ) -> AppResult<Vec<File>> {
        let folder = self.folders.resolve(ctx, selector).await?;
        self.files.find_by_folder(folder.id).await
    }

    /// Creates a file record for the caller.
    ///
    /// The owner is always the principal. The folder, when given, must
    /// resolve under the principal; omitting it creates an unfiled
    /// record. `content_ref` is stored opaquely — the payload itself
    /// lives with the external storage collaborator.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        folder: Option<FolderSelector>,
        content_ref: Option<String>,
    ) -> AppResult<File> {
        validate_name(name)?;

        let folder_key = match folder {
            Some(selector) => Some(self.folders.resolve(ctx, selector).await?.id),
            None => None,
        };

        let file = self
            .files
            .create(&CreateFile {
                name: name.to_string(),
                content_ref,
                folder_id: folder_key,
                owner_id: ctx.principal,
            })
            .await?;

        info!(
            principal = %ctx.principal,
            file = %file.public_id,
            "File created"
        );

        Ok(file)
    }

    /// Deletes one of the caller's files.
    pub async fn delete(&self, ctx: &RequestContext, id: FileId) -> AppResult<()> {
        let file = self.resolve(ctx, id).await?;
        self.files.delete(file.id).await?;

        info!(
            principal = %ctx.principal,
            file = %file.public_id,
            "File deleted"
        );

        Ok(())
    }
}

//! Ownership-scoped folder operations.
//!
//! Every method receives the authenticated principal via
//! [`RequestContext`] and can only observe or mutate that principal's
//! folders. A folder that exists but belongs to someone else produces the
//! same `NotFound` as a folder that does not exist at all, so crafted
//! identifiers reveal nothing.

use std::sync::Arc;

use tracing::info;

use nestfile_core::error::{AppError, ErrorKind};
use nestfile_core::result::AppResult;
use nestfile_core::types::FolderSelector;
use nestfile_database::repositories::folder::FolderRepository;
use nestfile_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;
use crate::validate::validate_name;

/// Manages folder operations scoped to the requesting principal.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folders: Arc<FolderRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<FolderRepository>) -> Self {
        Self { folders }
    }

    /// Resolves a selector to one of the caller's folders.
    ///
    /// `default` resolves to the caller's root (by the owner/no-parent
    /// pair, not by display name). An explicit id must both exist and be
    /// owned by the caller; either failure is `NotFound`.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        selector: FolderSelector,
    ) -> AppResult<Folder> {
        match selector {
            FolderSelector::Default => self
                .folders
                .find_root(ctx.principal)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found")),
            FolderSelector::Id(id) => {
                let folder = self
                    .folders
                    .find_by_public_id(id)
                    .await?
                    .filter(|f| f.owner_id == ctx.principal);
                folder.ok_or_else(|| AppError::not_found("Folder not found"))
            }
        }
    }

    /// Lists all of the caller's folders, oldest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Folder>> {
        self.folders.find_by_owner(ctx.principal).await
    }

    /// Creates a folder for the caller.
    ///
    /// The owner is always the principal — any owner supplied by the
    /// caller's payload never reaches this point. The parent, when given,
    /// must resolve under the principal; omitting it places the folder
    /// under the caller's root, since the only parentless folder a user
    /// may own is the provisioned root itself.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent: Option<FolderSelector>,
    ) -> AppResult<Folder> {
        validate_name(name)?;

        let parent_selector = parent.unwrap_or(FolderSelector::Default);
        let parent_key = Some(self.resolve(ctx, parent_selector).await?.id);

        let folder = self
            .folders
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id: parent_key,
                owner_id: ctx.principal,
            })
            .await?;

        info!(
            principal = %ctx.principal,
            folder = %folder.public_id,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames one of the caller's folders. The root is refused.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        selector: FolderSelector,
        new_name: &str,
    ) -> AppResult<Folder> {
        validate_name(new_name)?;

        let folder = self.resolve(ctx, selector).await?;
        if folder.is_root() {
            return Err(AppError::protected("Root folders cannot be renamed"));
        }

        let renamed = self.folders.rename(folder.id, new_name).await?;

        info!(
            principal = %ctx.principal,
            folder = %renamed.public_id,
            "Folder renamed"
        );

        Ok(renamed)
    }

    /// Moves one of the caller's folders under a new parent.
    pub async fn relocate(
        &self,
        ctx: &RequestContext,
        selector: FolderSelector,
        new_parent: FolderSelector,
    ) -> AppResult<Folder> {
        let folder = self.resolve(ctx, selector).await?;
        if folder.is_root() {
            return Err(AppError::protected("Root folders cannot be moved"));
        }
        let parent = self.resolve(ctx, new_parent).await?;

        let moved = self.folders.set_parent(folder.id, parent.id).await?;

        info!(
            principal = %ctx.principal,
            folder = %moved.public_id,
            new_parent = %parent.public_id,
            "Folder moved"
        );

        Ok(moved)
    }

    /// Deletes one of the caller's folders with its whole subtree,
    /// detaching contained files.
    ///
    /// Deleting an id that no longer resolves is a success, so repeating
    /// a delete is harmless. The root is refused.
    pub async fn delete(&self, ctx: &RequestContext, selector: FolderSelector) -> AppResult<()> {
        let folder = match self.resolve(ctx, selector).await {
            Ok(folder) => folder,
            Err(err) if err.kind == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err),
        };

        self.folders.delete(folder.id).await?;

        info!(
            principal = %ctx.principal,
            folder = %folder.public_id,
            "Folder deleted"
        );

        Ok(())
    }
}

//! Folder tree expansion.
//!
//! Expansion is one level deep by design: the returned node carries
//! summaries of the immediate subfolders and the folder's own files,
//! never the whole subtree.

use std::sync::Arc;

use nestfile_core::result::AppResult;
use nestfile_core::types::FolderSelector;
use nestfile_database::repositories::file::FileRepository;
use nestfile_database::repositories::folder::FolderRepository;
use nestfile_entity::file::File;
use nestfile_entity::folder::{FileEntry, Folder, SubfolderSummary, TreeNode};

use crate::context::RequestContext;
use crate::folder::service::FolderService;

/// Expands folders into client-consumable tree nodes.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Scoped folder access — resolution goes through here so the
    /// ownership check stays in one place.
    scope: Arc<FolderService>,
    /// Folder repository.
    folders: Arc<FolderRepository>,
    /// File repository.
    files: Arc<FileRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        scope: Arc<FolderService>,
        folders: Arc<FolderRepository>,
        files: Arc<FileRepository>,
    ) -> Self {
        Self {
            scope,
            folders,
            files,
        }
    }

    /// Resolves a selector under the caller and expands the folder.
    pub async fn expand(
        &self,
        ctx: &RequestContext,
        selector: FolderSelector,
    ) -> AppResult<TreeNode> {
        let folder = self.scope.resolve(ctx, selector).await?;
        let subfolders = self.folders.find_children(folder.id).await?;
        let files = self.files.find_by_folder(folder.id).await?;
        Ok(build_node(&folder, &subfolders, &files))
    }
}

/// Builds a tree node from already-loaded, access-checked rows.
///
/// Infallible: any inconsistency must have been caught upstream. Input
/// ordering is preserved.
pub fn build_node(folder: &Folder, subfolders: &[Folder], files: &[File]) -> TreeNode {
    TreeNode {
        id: folder.public_id,
        name: folder.name.clone(),
        created_at: folder.created_at,
        subfolders: subfolders.iter().map(SubfolderSummary::from).collect(),
        files: files.iter().map(FileEntry::from).collect(),
    }
}

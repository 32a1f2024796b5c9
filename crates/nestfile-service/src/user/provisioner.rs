//! Root folder provisioning.
//!
//! Every user owns exactly one root folder. The provisioner listens for
//! user-creation events and creates the root reactively; the partial
//! unique index on `(owner_id) WHERE parent_id IS NULL` makes the whole
//! path idempotent, so at-least-once event delivery — including two
//! deliveries racing each other — converges on a single root.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

use nestfile_core::events::{DomainEvent, EventPayload, UserEvent};
use nestfile_core::result::AppResult;
use nestfile_core::types::UserId;
use nestfile_database::repositories::folder::FolderRepository;
use nestfile_entity::folder::Folder;

/// Provisions the per-user root folder off user-creation events.
#[derive(Debug, Clone)]
pub struct RootProvisioner {
    /// Folder repository.
    folders: Arc<FolderRepository>,
}

impl RootProvisioner {
    /// Creates a new root provisioner.
    pub fn new(folders: Arc<FolderRepository>) -> Self {
        Self { folders }
    }

    /// Ensures the user's root folder exists, creating it if needed.
    ///
    /// Losing a provisioning race is a success: the existing root is
    /// returned and no error surfaces.
    pub async fn ensure_root(&self, user_id: UserId) -> AppResult<Folder> {
        let root = self.folders.ensure_root(user_id).await?;
        info!(user = %user_id, root = %root.public_id, "Root folder ready");
        Ok(root)
    }

    /// Consumes user events until the stream closes or shutdown is
    /// signalled.
    pub async fn run(
        self,
        mut events: broadcast::Receiver<DomainEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                event = events.recv() => match event {
                    Ok(event) => self.handle(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // ensure_root can be re-driven at any time, so a
                        // lagged stream degrades to delayed provisioning
                        // rather than a lost root.
                        warn!(skipped, "Event stream lagged; some events were dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        info!("Root provisioner stopped");
    }

    async fn handle(&self, event: DomainEvent) {
        let EventPayload::User(UserEvent::Created { user_id, .. }) = event.payload else {
            return;
        };
        if let Err(err) = self.ensure_root(user_id).await {
            error!(user = %user_id, error = %err, "Root provisioning failed");
        }
    }
}

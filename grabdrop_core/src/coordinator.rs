//! Transfer coordination
//!
//! Ties the friend graph, the handoff store and artifact storage together
//! into the two public operations: publish and claim.

use thiserror::Error;

use crate::friends::FriendGraph;
use crate::handoff::HandoffStore;
use crate::storage::{StorageError, UploadStorage};

/// Failure kinds surfaced to callers of publish/claim.
///
/// Every failure is a first-class value; nothing panics across this
/// boundary, and no failed call changes state visible to the next one.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Caller did not say who is sending.
    #[error("userId is required")]
    MissingSenderId,
    /// Caller did not attach an image.
    #[error("no image uploaded")]
    MissingArtifact,
    /// Caller did not say who is receiving.
    #[error("userId is required")]
    MissingReceiverId,
    /// The receiver has no friend configured to claim from.
    #[error("no friend configured for {0}")]
    NoCounterpart(String),
    /// The resolved sender has not published anything yet. Expected while
    /// the client polls; recoverable by trying again later.
    #[error("no image pending from {0}")]
    NothingPending(String),
    /// Writing the uploaded bytes failed; nothing was recorded.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The public operation surface of the transfer service.
///
/// One instance is created at startup and shared across requests; the friend
/// graph is read-only from then on, the handoff store handles its own
/// locking.
pub struct TransferCoordinator {
    friends: FriendGraph,
    store: HandoffStore,
    storage: UploadStorage,
}

impl TransferCoordinator {
    pub fn new(friends: FriendGraph, storage: UploadStorage) -> Self {
        Self {
            friends,
            store: HandoffStore::new(),
            storage,
        }
    }

    /// Store the uploaded bytes and record them as pending for `sender_id`.
    ///
    /// Returns the public locator of the stored artifact. Bytes go to disk
    /// first; the pending entry is only recorded once the write succeeded,
    /// so a storage failure never leaves a dangling locator behind.
    pub async fn publish(
        &self,
        sender_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, TransferError> {
        if sender_id.is_empty() {
            return Err(TransferError::MissingSenderId);
        }
        if bytes.is_empty() {
            return Err(TransferError::MissingArtifact);
        }

        let locator = self.storage.save(file_name, bytes).await?;
        self.store.publish(sender_id, locator.clone()).await;

        tracing::info!("Published artifact for {}: {}", sender_id, locator);
        Ok(locator)
    }

    /// Resolve the receiver's counterpart and take their pending artifact.
    ///
    /// A single non-blocking attempt; re-polling on `NothingPending` is the
    /// client's cooldown loop, not ours.
    pub async fn claim(&self, receiver_id: &str) -> Result<String, TransferError> {
        if receiver_id.is_empty() {
            return Err(TransferError::MissingReceiverId);
        }

        let sender_id = self
            .friends
            .resolve_sender(receiver_id)
            .ok_or_else(|| TransferError::NoCounterpart(receiver_id.to_string()))?;

        match self.store.claim(sender_id).await {
            Some(locator) => {
                tracing::info!("Delivered artifact from {} to {}", sender_id, receiver_id);
                Ok(locator)
            }
            None => Err(TransferError::NothingPending(sender_id.to_string())),
        }
    }
}

//! Pending artifact store
//!
//! Holds at most one pending artifact per identity and hands it off with
//! take-and-clear semantics.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory mapping of sender identity to the locator of their pending
/// artifact.
///
/// Publishing replaces any previous entry for the same identity
/// (last-write-wins). A claim reads and removes the entry under the same
/// write lock, so of any number of concurrent claims for one identity
/// exactly one observes the artifact.
#[derive(Default)]
pub struct HandoffStore {
    pending: RwLock<HashMap<String, String>>,
}

impl HandoffStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending artifact for `identity`, replacing any unclaimed one.
    pub async fn publish(&self, identity: &str, artifact_ref: String) {
        let mut pending = self.pending.write().await;
        if let Some(old) = pending.insert(identity.to_string(), artifact_ref) {
            tracing::debug!("Replacing unclaimed artifact for {}: {}", identity, old);
        }
    }

    /// Take the pending artifact for `identity`, if any.
    ///
    /// Read and remove happen in one step; a miss leaves the store untouched.
    pub async fn claim(&self, identity: &str) -> Option<String> {
        let mut pending = self.pending.write().await;
        pending.remove(identity)
    }
}

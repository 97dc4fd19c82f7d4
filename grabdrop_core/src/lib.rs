//! Core transfer-coordination service for Grab & Drop.
//!
//! A sender publishes an image tied to their identity; the receiver's
//! counterpart is resolved through a static friend relation, and the pending
//! image is handed off once and only once.

pub mod config;
pub mod coordinator;
pub mod friends;
pub mod handoff;
pub mod storage;

pub use config::{AppConfig, FriendPair};
pub use coordinator::{TransferCoordinator, TransferError};
pub use friends::FriendGraph;
pub use handoff::HandoffStore;
pub use storage::{UPLOADS_PREFIX, StorageError, UploadStorage};

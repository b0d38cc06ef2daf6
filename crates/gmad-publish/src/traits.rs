//! Collaborator traits for the remote side of publishing
//!
//! These traits are the whole of what the publish flow needs from a remote
//! platform; concrete backends (and their authentication, sessions, and wire
//! protocols) live behind them. Implementations must be `Send + Sync` so one
//! backend can serve concurrent flows.

use crate::error::Result;
use crate::request::{PublishRequest, PublishedFileId, PublishedItem, UpdateRequest};
use async_trait::async_trait;

/// Remote file storage accepting named byte streams.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Store `content` under `name`.
    ///
    /// `content_hash` is the digest of `content` for end-to-end verification
    /// by the backend; the content length is `content.len()`.
    async fn upload(&self, name: &str, content_hash: &[u8], content: &[u8]) -> Result<()>;

    /// Delete a previously stored file. Deleting a missing file is not an
    /// error.
    async fn delete(&self, name: &str) -> Result<()>;
}

/// Remote metadata service handling publish, update, and listing.
#[async_trait]
pub trait PublishService: Send + Sync {
    /// Publish a new item, returning its assigned identifier.
    async fn publish(&self, request: &PublishRequest) -> Result<PublishedFileId>;

    /// Update an existing item, returning its confirmed identifier.
    async fn update(&self, request: &UpdateRequest) -> Result<PublishedFileId>;

    /// List the caller's published items.
    async fn list(&self) -> Result<Vec<PublishedItem>>;
}

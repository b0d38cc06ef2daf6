//! Workshop publish boundary for GMA addon packages
//!
//! The container core only produces a byte stream and structured metadata;
//! shipping them somewhere is a collaborator concern. This crate pins down
//! that boundary:
//!
//! - [`AddonInfo`]: title, description, content type, and tags recovered from
//!   a finished package's header (what publish/update requests are built from)
//! - [`PublishRequest`] / [`UpdateRequest`] / [`PublishedItem`]: the
//!   structured values crossing the boundary
//! - [`RemoteStorage`] / [`PublishService`]: the collaborator traits a
//!   concrete remote backend implements
//! - [`publish_addon`] / [`update_addon`]: the orchestration that uploads a
//!   package (and optional preview icon) and submits the metadata request
//!
//! Authentication, session management, the wire protocol, and transport
//! compression are deliberately absent; they belong to the backend behind the
//! traits.

#![warn(missing_docs)]

pub mod addon_info;
pub mod error;
pub mod flow;
pub mod request;
pub mod traits;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

// Re-export main types
pub use addon_info::AddonInfo;
pub use error::{PublishError, Result};
pub use flow::{publish_addon, update_addon};
pub use request::{PublishRequest, PublishedFileId, PublishedItem, UpdateRequest, Visibility};
pub use traits::{PublishService, RemoteStorage};

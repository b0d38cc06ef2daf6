//! Structured values crossing the publish boundary

use crate::addon_info::AddonInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a published workshop item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublishedFileId(pub u64);

impl fmt::Display for PublishedFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Visibility of a published item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Visible to everyone
    #[default]
    Public,
    /// Visible to the owner's friends
    FriendsOnly,
    /// Visible to the owner only
    Private,
}

/// Request to publish a new addon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Item title
    pub title: String,
    /// Free-text description shown on the item page
    pub description: String,
    /// Content-type category tag
    pub content_type: String,
    /// Free-form tags, order preserved
    pub tags: Vec<String>,
    /// Item visibility
    pub visibility: Visibility,
    /// Cloud file name of the uploaded package
    pub package_name: String,
    /// Cloud file name of the uploaded preview image, if any
    pub preview_name: Option<String>,
}

impl PublishRequest {
    /// Build a publish request from recovered addon metadata.
    pub fn from_addon_info(
        info: &AddonInfo,
        package_name: impl Into<String>,
        preview_name: Option<String>,
    ) -> Self {
        Self {
            title: info.title.clone(),
            description: info.description.clone(),
            content_type: info.addon_type.clone(),
            tags: info.tags.clone(),
            visibility: Visibility::default(),
            package_name: package_name.into(),
            preview_name,
        }
    }
}

/// Request to update an existing addon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Identifier of the item being updated
    pub id: PublishedFileId,
    /// Item title
    pub title: String,
    /// Free-text description shown on the item page
    pub description: String,
    /// Free-form tags, order preserved
    pub tags: Vec<String>,
    /// Item visibility
    pub visibility: Visibility,
    /// Cloud file name of the uploaded package
    pub package_name: String,
    /// Cloud file name of the uploaded preview image, if any
    pub preview_name: Option<String>,
}

impl UpdateRequest {
    /// Build an update request from recovered addon metadata.
    pub fn from_addon_info(
        id: PublishedFileId,
        info: &AddonInfo,
        package_name: impl Into<String>,
        preview_name: Option<String>,
    ) -> Self {
        Self {
            id,
            title: info.title.clone(),
            description: info.description.clone(),
            tags: info.tags.clone(),
            visibility: Visibility::default(),
            package_name: package_name.into(),
            preview_name,
        }
    }
}

/// One row of a published-items listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedItem {
    /// Item identifier
    pub id: PublishedFileId,
    /// Item title
    pub title: String,
    /// Package size in bytes
    pub size: u64,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn info() -> AddonInfo {
        AddonInfo {
            title: "Jetpack".to_string(),
            description: "Fly".to_string(),
            addon_type: "tool".to_string(),
            tags: vec!["fun".to_string(), "flight".to_string()],
        }
    }

    #[test]
    fn test_publish_request_from_addon_info() {
        let request = PublishRequest::from_addon_info(&info(), "upload.gma", None);
        assert_eq!(request.title, "Jetpack");
        assert_eq!(request.content_type, "tool");
        assert_eq!(request.tags, vec!["fun", "flight"]);
        assert_eq!(request.visibility, Visibility::Public);
        assert_eq!(request.package_name, "upload.gma");
        assert!(request.preview_name.is_none());
    }

    #[test]
    fn test_update_request_keeps_id() {
        let request = UpdateRequest::from_addon_info(
            PublishedFileId(42),
            &info(),
            "upload.gma",
            Some("icon.jpg".to_string()),
        );
        assert_eq!(request.id, PublishedFileId(42));
        assert_eq!(request.preview_name.as_deref(), Some("icon.jpg"));
    }

    #[test]
    fn test_published_file_id_display() {
        assert_eq!(PublishedFileId(123_456).to_string(), "123456");
    }
}

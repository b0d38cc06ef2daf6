//! Addon metadata descriptor (`addon.json`) parsing
//!
//! Every packageable addon carries a JSON metadata descriptor named
//! `addon.json` somewhere in its source archive. The descriptor supplies the
//! title written verbatim into the container header and the material for the
//! derived description blob ([`AddonManifest::build_description`]).
//!
//! The derived description is itself JSON: the publish flow reads it back out
//! of a finished package and deserializes it as [`DescriptionJson`], so the
//! combination rule is fixed and must stay deterministic.

use crate::gma::error::Result;
use serde::{Deserialize, Serialize};

/// Base filename of the metadata descriptor, matched case-insensitively.
pub const MANIFEST_NAME: &str = "addon.json";

/// Addon metadata parsed from the `addon.json` descriptor.
///
/// Parsed once per encoding run and never mutated. Tag order is preserved as
/// given, duplicates included; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddonManifest {
    /// Addon title; the only mandatory field
    pub title: String,
    /// Content-type category tag
    #[serde(rename = "type", default)]
    pub addon_type: String,
    /// Free-form tags, insertion order preserved
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl AddonManifest {
    /// Parse a manifest from raw descriptor bytes.
    ///
    /// # Errors
    /// Returns [`GmaError::ManifestParse`](crate::gma::GmaError::ManifestParse)
    /// when the bytes are not valid UTF-8 JSON or the `title` field is missing.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Derive the description blob embedded in the container header.
    ///
    /// The result is the JSON object `{"description","type","tags"}` in that
    /// field order; the same manifest always yields the same string.
    pub fn build_description(&self) -> String {
        let blob = DescriptionJson {
            description: self.description.clone(),
            addon_type: self.addon_type.clone(),
            tags: self.tags.clone(),
        };
        // Serializing a struct of plain strings cannot fail
        serde_json::to_string(&blob).unwrap_or_default()
    }
}

/// The derived-description JSON object carried in the container header.
///
/// Consumers parse this back out of finished packages to recover the
/// free-text description, content type, and tags for publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionJson {
    /// Free-text description
    pub description: String,
    /// Content-type category tag
    #[serde(rename = "type")]
    pub addon_type: String,
    /// Free-form tags, order preserved
    pub tags: Vec<String>,
}

impl DescriptionJson {
    /// Parse a derived description string back into its parts.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Locate the metadata descriptor among archive member paths.
///
/// Compares the case-insensitive base filename of every path against
/// [`MANIFEST_NAME`] and returns the first match in enumeration order, at any
/// depth. Returns `None` when the archive carries no descriptor.
pub fn locate_manifest<'a, I>(paths: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    paths.into_iter().find(|path| {
        let base = path.rsplit('/').next().unwrap_or(path);
        base.eq_ignore_ascii_case(MANIFEST_NAME)
    })
}

//! Metadata recovery from finished packages
//!
//! Publish and update requests are built from the package itself, not from
//! the original source archive: the container header carries the title and
//! the derived-description JSON blob, so a finished `.gma` file is
//! self-describing.

use crate::error::Result;
use gmad_formats::gma::{GmaFile, GmaHeader};
use gmad_formats::manifest::DescriptionJson;
use std::io::{Read, Seek};

/// Addon metadata recovered from a package header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonInfo {
    /// Addon title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Content-type category tag
    pub addon_type: String,
    /// Free-form tags, order preserved
    pub tags: Vec<String>,
}

impl AddonInfo {
    /// Recover metadata from a fully parsed package.
    ///
    /// Verifies the whole container (trailing checksum included) before
    /// trusting its header.
    pub fn from_gma_bytes(data: &[u8]) -> Result<Self> {
        let gma = GmaFile::parse(data)?;
        Self::from_header(&gma.header)
    }

    /// Recover metadata by reading only the package header from a stream.
    ///
    /// Cheaper than [`from_gma_bytes`](Self::from_gma_bytes) for large
    /// packages; skips payload and checksum verification.
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let header = GmaHeader::parse_from(reader)?;
        Self::from_header(&header)
    }

    /// Recover metadata from a package header.
    pub fn from_header(header: &GmaHeader) -> Result<Self> {
        let blob = DescriptionJson::parse(&header.description)?;
        Ok(Self {
            title: header.name.clone(),
            description: blob.description,
            addon_type: blob.addon_type,
            tags: blob.tags,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::sample_package;
    use std::io::Cursor;

    #[test]
    fn test_recover_from_bytes() {
        let info = AddonInfo::from_gma_bytes(&sample_package()).expect("recover should succeed");
        assert_eq!(info.title, "Jetpack");
        assert_eq!(info.description, "Fly");
        assert_eq!(info.addon_type, "tool");
        assert_eq!(info.tags, vec!["fun", "flight"]);
    }

    #[test]
    fn test_recover_from_reader_reads_header_only() {
        let data = sample_package();
        let mut cursor = Cursor::new(&data);
        let info = AddonInfo::from_reader(&mut cursor).expect("recover should succeed");
        assert_eq!(info.title, "Jetpack");

        // The cursor stopped inside the file table, well before the payload
        assert!((cursor.position() as usize) < data.len());
    }

    #[test]
    fn test_rejects_corrupted_package() {
        let mut data = sample_package();
        let last = data.len() - 1;
        data[last] ^= 0xFF;
        assert!(AddonInfo::from_gma_bytes(&data).is_err());
    }
}

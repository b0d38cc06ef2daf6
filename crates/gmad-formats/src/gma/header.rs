//! Container header parsing and building

use crate::gma::cstring::{read_cstring, write_cstring};
use crate::gma::error::{GmaError, Result};
use binrw::{BinRead, BinResult, BinWrite};
use std::io::{Read, Seek, Write};

/// Fixed 4-byte format tag at the start of every container.
pub const GMA_IDENT: [u8; 4] = *b"GMAD";

/// Container format version this implementation emits.
pub const GMA_VERSION: u8 = 3;

/// Placeholder written into the unused 8-byte owner-id field.
pub const STEAMID_PLACEHOLDER: u64 = 0;

/// Fixed format-revision counter written into every container.
pub const ADDON_VERSION: u32 = 1;

/// Author placeholder written when no author is supplied.
pub const DEFAULT_AUTHOR: &str = "Author Name";

/// Container header
///
/// Fixed-order prefix of every package: format tag, version, an unused
/// owner-id placeholder, the encode timestamp, an (empty) required-content
/// list, then the addon title, the derived description blob, the author, and
/// the format-revision counter. All multi-byte integers are little-endian;
/// strings are null-terminated UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmaHeader {
    /// Format tag, always `GMAD`
    pub ident: [u8; 4],
    /// Format version
    pub version: u8,
    /// Unused owner-id placeholder
    pub steamid: u64,
    /// Encode time, seconds since the Unix epoch
    pub timestamp: i64,
    /// Addon title
    pub name: String,
    /// Derived description blob (see [`crate::manifest::DescriptionJson`])
    pub description: String,
    /// Author name or placeholder
    pub author: String,
    /// Format-revision counter
    pub addon_version: u32,
}

impl GmaHeader {
    /// Create a header for a new package with the fixed placeholder fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            ident: GMA_IDENT,
            version: GMA_VERSION,
            steamid: STEAMID_PLACEHOLDER,
            timestamp,
            name: name.into(),
            description: description.into(),
            author: author.into(),
            addon_version: ADDON_VERSION,
        }
    }

    /// Read and validate a header from the start of a package stream.
    ///
    /// Stops after the format-revision field, leaving the reader positioned
    /// at the first file table record; the rest of the package is not
    /// touched, so this is the cheap way to peek at a package's metadata.
    pub fn parse_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let header = Self::read(reader)?;
        header.validate()?;
        Ok(header)
    }

    /// Validate the fixed header fields.
    pub fn validate(&self) -> Result<()> {
        if self.ident != GMA_IDENT {
            return Err(GmaError::InvalidIdent(self.ident));
        }
        if self.version == 0 || self.version > GMA_VERSION {
            return Err(GmaError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

impl BinRead for GmaHeader {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let mut ident = [0u8; 4];
        reader.read_exact(&mut ident)?;
        if ident != GMA_IDENT {
            return Err(binrw::Error::AssertFail {
                pos: 0,
                message: format!("invalid container ident: {ident:?}"),
            });
        }

        let version = u8::read_options(reader, endian, ())?;
        let steamid = u64::read_options(reader, binrw::Endian::Little, ())?;
        let timestamp = i64::read_options(reader, binrw::Endian::Little, ())?;

        // Required-content list, present from version 2 on. No entries are
        // supported; skip to the empty-string terminator.
        if version > 1 {
            loop {
                let required = read_cstring(reader)?;
                if required.is_empty() {
                    break;
                }
            }
        }

        let name = read_cstring(reader)?;
        let description = read_cstring(reader)?;
        let author = read_cstring(reader)?;
        let addon_version = u32::read_options(reader, binrw::Endian::Little, ())?;

        Ok(Self {
            ident,
            version,
            steamid,
            timestamp,
            name,
            description,
            author,
            addon_version,
        })
    }
}

impl BinWrite for GmaHeader {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        writer.write_all(&self.ident)?;
        self.version.write_options(writer, binrw::Endian::Little, ())?;
        self.steamid.write_options(writer, binrw::Endian::Little, ())?;
        self.timestamp
            .write_options(writer, binrw::Endian::Little, ())?;

        // Empty required-content list
        writer.write_all(&[0])?;

        write_cstring(writer, &self.name)?;
        write_cstring(writer, &self.description)?;
        write_cstring(writer, &self.author)?;
        self.addon_version
            .write_options(writer, binrw::Endian::Little, ())?;

        Ok(())
    }
}

// Manual endian markers required by binrw for the argless read()/write()
impl binrw::meta::ReadEndian for GmaHeader {
    const ENDIAN: binrw::meta::EndianKind =
        binrw::meta::EndianKind::Endian(binrw::Endian::Little);
}

impl binrw::meta::WriteEndian for GmaHeader {
    const ENDIAN: binrw::meta::EndianKind =
        binrw::meta::EndianKind::Endian(binrw::Endian::Little);
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use binrw::io::Cursor;

    #[test]
    fn test_header_new() {
        let header = GmaHeader::new("Test", "{}", DEFAULT_AUTHOR, 1_700_000_000);
        assert_eq!(header.ident, GMA_IDENT);
        assert_eq!(header.version, GMA_VERSION);
        assert_eq!(header.steamid, 0);
        assert_eq!(header.timestamp, 1_700_000_000);
        assert_eq!(header.author, "Author Name");
        assert_eq!(header.addon_version, 1);
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_fixed_prefix_layout() {
        let header = GmaHeader::new("Test", "desc", "me", 0x0102_0304_0506_0708);

        let mut buffer = Vec::new();
        header
            .write(&mut Cursor::new(&mut buffer))
            .expect("write should succeed");

        // ident(4) + version(1) + steamid(8) + timestamp(8) + terminator(1)
        assert_eq!(&buffer[0..4], b"GMAD");
        assert_eq!(buffer[4], 3);
        assert_eq!(&buffer[5..13], &[0; 8]);
        // Timestamp is little-endian
        assert_eq!(
            &buffer[13..21],
            &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(buffer[21], 0);
        // Title starts at offset 22
        assert_eq!(&buffer[22..26], b"Test");
        assert_eq!(buffer[26], 0);
    }

    #[test]
    fn test_header_round_trip() {
        let original = GmaHeader::new("My Addon", r#"{"description":"d"}"#, "someone", 1234);

        let mut buffer = Vec::new();
        original
            .write(&mut Cursor::new(&mut buffer))
            .expect("write should succeed");

        let parsed = GmaHeader::read(&mut Cursor::new(&buffer)).expect("read should succeed");
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_invalid_ident_rejected_on_read() {
        let data = b"GMOD\x03\0\0\0\0\0\0\0\0";
        assert!(GmaHeader::read(&mut Cursor::new(&data[..])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut header = GmaHeader::new("T", "", "a", 0);
        header.ident = *b"XXXX";
        assert!(matches!(header.validate(), Err(GmaError::InvalidIdent(_))));

        let mut header = GmaHeader::new("T", "", "a", 0);
        header.version = 9;
        assert!(matches!(
            header.validate(),
            Err(GmaError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_truncated_header_is_an_error() {
        let data = b"GMAD\x03\0\0";
        assert!(GmaHeader::read(&mut Cursor::new(&data[..])).is_err());
    }
}

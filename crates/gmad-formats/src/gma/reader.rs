//! Container parser
//!
//! Symmetric counterpart of the builder: reads a finished package back into
//! header, file table, and payload, verifying the trailing checksum and the
//! table's structural invariants on the way in. Payload bytes carry no
//! per-file markers, so each file's span is located by summing the sizes of
//! all preceding table entries.

use crate::checksum::{ChecksumWriter, checksum};
use crate::gma::entry::GmaFileEntry;
use crate::gma::error::{GmaError, Result};
use crate::gma::header::GmaHeader;
use binrw::{BinRead, BinWrite};
use std::io::{Cursor, Write};

/// A parsed container package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmaFile {
    /// Package header
    pub header: GmaHeader,
    /// File table in emission order
    pub entries: Vec<GmaFileEntry>,
    /// Trailing package checksum as stored
    pub checksum: u32,
    payload: Vec<u8>,
}

impl GmaFile {
    /// Parse a container from its full byte content.
    ///
    /// Verifies the trailing checksum before touching the structure, then
    /// validates the header, the contiguity of table sequence numbers, and
    /// that the payload span matches the sizes the table declares.
    ///
    /// # Errors
    /// [`GmaError::ChecksumMismatch`] on a corrupted package,
    /// [`GmaError::Truncated`] when the data ends before the declared
    /// structure, and the header/table validation errors otherwise.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let Some(trailer_at) = data.len().checked_sub(4) else {
            return Err(GmaError::Truncated("shorter than the trailing checksum"));
        };
        let mut stored_bytes = [0u8; 4];
        stored_bytes.copy_from_slice(&data[trailer_at..]);
        let stored = u32::from_le_bytes(stored_bytes);

        let computed = checksum(&data[..trailer_at]);
        if stored != computed {
            return Err(GmaError::ChecksumMismatch { stored, computed });
        }

        let mut cursor = Cursor::new(data);
        let header = GmaHeader::read(&mut cursor)?;
        header.validate()?;

        let mut entries = Vec::new();
        loop {
            let number = u32::read_options(&mut cursor, binrw::Endian::Little, ())?;
            if number == 0 {
                break;
            }
            let expected = entries.len() as u32 + 1;
            if number != expected {
                return Err(GmaError::NonContiguousNumber {
                    position: entries.len(),
                    number,
                    expected,
                });
            }
            entries.push(GmaFileEntry::read_options(
                &mut cursor,
                binrw::Endian::Little,
                number,
            )?);
        }

        let payload_start = cursor.position() as usize;
        let declared: u64 = entries.iter().map(|entry| entry.size as u64).sum();
        let actual = (trailer_at - payload_start.min(trailer_at)) as u64;
        if payload_start > trailer_at || declared != actual {
            return Err(GmaError::Truncated(
                "payload length does not match the file table",
            ));
        }

        Ok(Self {
            header,
            entries,
            checksum: stored,
            payload: data[payload_start..trailer_at].to_vec(),
        })
    }

    /// Re-emit the container byte-exactly.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut writer = ChecksumWriter::new(Cursor::new(&mut buffer));

        self.header.write(&mut writer)?;
        for entry in &self.entries {
            entry.write(&mut writer)?;
        }
        0u32.write_options(&mut writer, binrw::Endian::Little, ())?;
        writer.write_all(&self.payload)?;

        let trailer = writer.digest();
        trailer.write_options(&mut writer, binrw::Endian::Little, ())?;

        drop(writer);
        Ok(buffer)
    }

    /// Payload bytes of the file at the given table position.
    pub fn file_data(&self, index: usize) -> Option<&[u8]> {
        let mut offset = 0usize;
        for (position, entry) in self.entries.iter().enumerate() {
            let size = entry.size as usize;
            if position == index {
                return self.payload.get(offset..offset + size);
            }
            offset += size;
        }
        None
    }

    /// Look up a file by its table path.
    pub fn file_by_path(&self, path: &str) -> Option<(&GmaFileEntry, &[u8])> {
        let index = self.entries.iter().position(|entry| entry.path == path)?;
        Some((&self.entries[index], self.file_data(index)?))
    }

    /// Verify every per-file checksum against its payload span.
    pub fn verify_file_checksums(&self) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            let data = self
                .file_data(index)
                .ok_or(GmaError::Truncated("file table points past the payload"))?;
            let computed = checksum(data);
            if computed != entry.crc {
                return Err(GmaError::FileChecksumMismatch {
                    path: entry.path.clone(),
                    stored: entry.crc,
                    computed,
                });
            }
        }
        Ok(())
    }

    /// Total payload size declared by the file table.
    pub fn total_payload_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size as u64).sum()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gma::builder::GmaBuilder;
    use crate::test_utils::MemorySource;
    use pretty_assertions::assert_eq;

    fn sample_package() -> Vec<u8> {
        let mut source = MemorySource::new(&[
            (
                "addon.json",
                br#"{"title":"Test","type":"tool","tags":["fun"],"description":"d"}"#,
            ),
            ("lua/test.lua", b"abc"),
            ("lua/extra.lua", b"defgh"),
        ]);
        let (cursor, _) = GmaBuilder::new(Cursor::new(Vec::new()))
            .with_timestamp(1_700_000_000)
            .write_archive(&mut source)
            .expect("encode should succeed");
        cursor.into_inner()
    }

    #[test]
    fn test_parse_built_package() {
        let data = sample_package();
        let gma = GmaFile::parse(&data).expect("parse should succeed");

        assert_eq!(gma.header.name, "Test");
        assert_eq!(gma.header.timestamp, 1_700_000_000);
        assert_eq!(gma.entries.len(), 2);
        assert_eq!(gma.entries[0].path, "lua/test.lua");
        assert_eq!(gma.entries[1].path, "lua/extra.lua");
        assert_eq!(gma.total_payload_size(), 8);
        assert!(gma.verify_file_checksums().is_ok());
    }

    #[test]
    fn test_file_access_by_index_and_path() {
        let data = sample_package();
        let gma = GmaFile::parse(&data).expect("parse should succeed");

        assert_eq!(gma.file_data(0), Some(&b"abc"[..]));
        assert_eq!(gma.file_data(1), Some(&b"defgh"[..]));
        assert_eq!(gma.file_data(2), None);

        let (entry, content) = gma.file_by_path("lua/extra.lua").expect("file should exist");
        assert_eq!(entry.number, 2);
        assert_eq!(content, b"defgh");
        assert!(gma.file_by_path("lua/missing.lua").is_none());
    }

    #[test]
    fn test_round_trip_is_byte_exact() {
        let data = sample_package();
        let gma = GmaFile::parse(&data).expect("parse should succeed");
        let rebuilt = gma.build().expect("build should succeed");
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_corruption_detected() {
        let mut data = sample_package();
        let middle = data.len() / 2;
        data[middle] ^= 0xFF;
        assert!(matches!(
            GmaFile::parse(&data),
            Err(GmaError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(
            GmaFile::parse(b"GMA"),
            Err(GmaError::Truncated(_))
        ));
    }

    #[test]
    fn test_non_contiguous_numbers_rejected() {
        let data = sample_package();
        let gma = GmaFile::parse(&data).expect("parse should succeed");

        // Renumber the second entry and re-emit with a fresh checksum
        let mut tampered = gma.clone();
        tampered.entries[1].number = 5;
        let rebuilt = tampered.build().expect("build should succeed");

        assert!(matches!(
            GmaFile::parse(&rebuilt),
            Err(GmaError::NonContiguousNumber {
                position: 1,
                number: 5,
                expected: 2,
            })
        ));
    }

    #[test]
    fn test_total_length_arithmetic() {
        let data = sample_package();
        let gma = GmaFile::parse(&data).expect("parse should succeed");

        // header + table (entries + terminator) + payload + trailing checksum
        let mut header_bytes = Vec::new();
        gma.header
            .write(&mut Cursor::new(&mut header_bytes))
            .expect("write should succeed");
        let table_len: usize = gma
            .entries
            .iter()
            .map(|entry| 4 + entry.path.len() + 1 + 8 + 4)
            .sum::<usize>()
            + 4;
        let payload_len = gma.total_payload_size() as usize;

        assert_eq!(data.len(), header_bytes.len() + table_len + payload_len + 4);
    }

    #[test]
    fn test_empty_package_parses() {
        let mut source = MemorySource::new(&[("addon.json", br#"{"title":"Empty"}"#)]);
        let (cursor, _) = GmaBuilder::new(Cursor::new(Vec::new()))
            .with_timestamp(1)
            .write_archive(&mut source)
            .expect("encode should succeed");
        let data = cursor.into_inner();

        let gma = GmaFile::parse(&data).expect("parse should succeed");
        assert!(gma.entries.is_empty());
        assert_eq!(gma.total_payload_size(), 0);
        assert!(gma.verify_file_checksums().is_ok());
    }
}

//! File table entry parsing and building

use crate::gma::cstring::{read_cstring, write_cstring};
use binrw::{BinRead, BinResult, BinWrite};
use std::io::{Read, Seek, Write};

/// One record of the container's file table.
///
/// Records are sequence-numbered from 1 in table order; the table itself is
/// terminated by a 4-byte zero where the next number would be. Payload bytes
/// carry no markers of their own, so readers locate a file's content by
/// summing the sizes of all preceding entries in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmaFileEntry {
    /// 1-based sequence number, contiguous over included files
    pub number: u32,
    /// Root-relative, lowercased path
    pub path: String,
    /// Uncompressed size in bytes
    pub size: i64,
    /// CRC-32 of the uncompressed content
    pub crc: u32,
}

impl GmaFileEntry {
    /// Base filename component of the entry path.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl BinRead for GmaFileEntry {
    // The caller has already consumed the sequence number to detect the
    // table terminator, so it is passed in rather than re-read.
    type Args<'a> = u32;

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: binrw::Endian,
        number: Self::Args<'_>,
    ) -> BinResult<Self> {
        let path = read_cstring(reader)?;
        let size = i64::read_options(reader, endian, ())?;
        let crc = u32::read_options(reader, endian, ())?;

        Ok(Self {
            number,
            path,
            size,
            crc,
        })
    }
}

impl BinWrite for GmaFileEntry {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        self.number.write_options(writer, binrw::Endian::Little, ())?;
        write_cstring(writer, &self.path)?;
        self.size.write_options(writer, binrw::Endian::Little, ())?;
        self.crc.write_options(writer, binrw::Endian::Little, ())?;
        Ok(())
    }
}

impl binrw::meta::WriteEndian for GmaFileEntry {
    const ENDIAN: binrw::meta::EndianKind =
        binrw::meta::EndianKind::Endian(binrw::Endian::Little);
}

//! Null-terminated string primitives shared by the header and table codecs

use binrw::{BinRead, BinResult};
use std::io::{Read, Seek, Write};

/// Read a null-terminated UTF-8 string.
pub(crate) fn read_cstring<R: Read + Seek>(reader: &mut R) -> BinResult<String> {
    let mut bytes = Vec::new();
    loop {
        let byte = u8::read_options(reader, binrw::Endian::Little, ())?;
        if byte == 0 {
            break;
        }
        bytes.push(byte);
    }
    String::from_utf8(bytes).map_err(|e| binrw::Error::Custom {
        pos: reader.stream_position().unwrap_or(0),
        err: Box::new(e),
    })
}

/// Write a string followed by its null terminator.
pub(crate) fn write_cstring<W: Write + Seek>(writer: &mut W, value: &str) -> BinResult<()> {
    writer.write_all(value.as_bytes())?;
    writer.write_all(&[0])?;
    Ok(())
}

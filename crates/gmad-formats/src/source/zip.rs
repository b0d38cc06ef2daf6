//! Zip archive source backend

use crate::source::{SourceArchive, SourceMember};
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Source backend over a zip archive.
///
/// Member paths, uncompressed sizes, and per-member CRCs are taken from the
/// zip central directory at open time, so enumeration never decompresses
/// anything; content is inflated lazily per [`read_member`](Self::read_member)
/// call.
pub struct ZipSource<R: Read + Seek> {
    archive: ZipArchive<R>,
    members: Vec<SourceMember>,
}

impl<R: Read + Seek> ZipSource<R> {
    /// Open a zip archive from any seekable reader.
    ///
    /// # Errors
    /// Fails when the central directory cannot be read.
    pub fn new(reader: R) -> io::Result<Self> {
        let mut archive = ZipArchive::new(reader).map_err(io::Error::other)?;

        let mut members = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            // Raw access: metadata only, no decompression
            let file = archive.by_index_raw(index).map_err(io::Error::other)?;
            members.push(SourceMember {
                path: file.name().to_string(),
                size: file.size(),
                crc: file.crc32(),
                is_dir: file.is_dir(),
            });
        }

        Ok(Self { archive, members })
    }
}

impl ZipSource<File> {
    /// Open a zip archive file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> SourceArchive for ZipSource<R> {
    fn members(&self) -> &[SourceMember] {
        &self.members
    }

    fn read_member(&mut self, path: &str) -> io::Result<Vec<u8>> {
        let mut file = self.archive.by_name(path).map_err(io::Error::other)?;
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)?;
        Ok(content)
    }
}

//! Shared helpers for format tests

use crate::checksum::checksum;
use crate::source::{SourceArchive, SourceMember};
use std::collections::HashSet;
use std::io;

/// In-memory source archive for exercising the builder without touching disk.
///
/// Members enumerate in construction order; directory entries are declared by
/// a trailing `/`. Individual members can be rigged to fail on read or to
/// report a wrong size.
pub(crate) struct MemorySource {
    members: Vec<SourceMember>,
    contents: Vec<Vec<u8>>,
    failing: HashSet<String>,
}

impl MemorySource {
    pub(crate) fn new(entries: &[(&str, &[u8])]) -> Self {
        let mut members = Vec::with_capacity(entries.len());
        let mut contents = Vec::with_capacity(entries.len());
        for (path, content) in entries {
            let is_dir = path.ends_with('/');
            members.push(SourceMember {
                path: (*path).to_string(),
                size: content.len() as u64,
                crc: checksum(content),
                is_dir,
            });
            contents.push(content.to_vec());
        }
        Self {
            members,
            contents,
            failing: HashSet::new(),
        }
    }

    /// Make reads of `path` fail with an I/O error.
    pub(crate) fn fail_on(&mut self, path: &str) {
        self.failing.insert(path.to_string());
    }

    /// Declare a wrong size for `path` while keeping its real content.
    pub(crate) fn lie_about_size(&mut self, path: &str, size: u64) {
        for member in &mut self.members {
            if member.path == path {
                member.size = size;
            }
        }
    }
}

impl SourceArchive for MemorySource {
    fn members(&self) -> &[SourceMember] {
        &self.members
    }

    fn read_member(&mut self, path: &str) -> io::Result<Vec<u8>> {
        if self.failing.contains(path) {
            return Err(io::Error::other("rigged read failure"));
        }
        self.members
            .iter()
            .position(|member| member.path == path)
            .map(|index| self.contents[index].clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}

//! Directory tree source backend

use crate::checksum::checksum;
use crate::source::{SourceArchive, SourceMember};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source backend over a plain directory tree.
///
/// Walks the tree once at open time in a stable lexicographic order,
/// computing each file's CRC-32 as it goes, so enumeration matches what a zip
/// of the same tree would report. Content is re-read from disk per
/// [`read_member`](Self::read_member) call.
pub struct DirSource {
    root: PathBuf,
    members: Vec<SourceMember>,
}

impl DirSource {
    /// Scan a directory tree rooted at `root`.
    ///
    /// # Errors
    /// Fails when the walk cannot descend into the tree or a file cannot be
    /// read while computing its checksum.
    pub fn open<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut members = Vec::new();

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(io::Error::other)?;
            if entry.depth() == 0 {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&root)
                .map_err(io::Error::other)?
                .to_string_lossy()
                .replace('\\', "/");

            if entry.file_type().is_dir() {
                members.push(SourceMember {
                    path: format!("{relative}/"),
                    size: 0,
                    crc: 0,
                    is_dir: true,
                });
            } else {
                let content = fs::read(entry.path())?;
                members.push(SourceMember {
                    path: relative,
                    size: content.len() as u64,
                    crc: checksum(&content),
                    is_dir: false,
                });
            }
        }

        Ok(Self { root, members })
    }
}

impl SourceArchive for DirSource {
    fn members(&self) -> &[SourceMember] {
        &self.members
    }

    fn read_member(&mut self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(path))
    }
}

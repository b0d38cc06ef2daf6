//! Container builder
//!
//! Emission is a strict linear sequence with no branching or retries:
//! header, one table record per included member, the table terminator, the
//! concatenated payloads in identical order, then the trailing CRC-32 over
//! every byte emitted so far. Any failure aborts the whole encode; a partial
//! package is never valid output and must be discarded by the caller.
//!
//! The trailing checksum is accumulated through [`ChecksumWriter`] while the
//! bytes stream out, so the assembled package is never buffered just to be
//! re-hashed.

use crate::checksum::ChecksumWriter;
use crate::gma::entry::GmaFileEntry;
use crate::gma::error::{GmaError, Result};
use crate::gma::header::{DEFAULT_AUTHOR, GmaHeader};
use crate::manifest::{AddonManifest, MANIFEST_NAME, locate_manifest};
use crate::source::{SourceArchive, SourceMember};
use crate::whitelist::{Whitelist, is_under_root, relative_path, root_folder};
use binrw::BinWrite;
use std::io::{Seek, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// Builder for addon container packages.
///
/// One builder encodes one package: construction configures the run, and
/// [`write_archive`](Self::write_archive) consumes the builder to perform the
/// single linear emission pass. The builder owns its output writer
/// exclusively for the duration; it is returned on success so callers can
/// keep using it.
///
/// # Example
///
/// ```rust,no_run
/// use gmad_formats::gma::GmaBuilder;
/// use gmad_formats::source::ZipSource;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut source = ZipSource::open("addon.zip")?;
/// let output = std::fs::File::create("addon.gma")?;
///
/// let (_, summary) = GmaBuilder::new(output).write_archive(&mut source)?;
/// println!("packaged {} files, crc {:08x}", summary.files.len(), summary.checksum);
/// # Ok(())
/// # }
/// ```
pub struct GmaBuilder<W: Write + Seek> {
    writer: ChecksumWriter<W>,
    whitelist: Whitelist,
    timestamp: Option<i64>,
    author: String,
}

/// Result of a completed encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    /// File table as written, in emission order
    pub files: Vec<GmaFileEntry>,
    /// Total bytes emitted, trailing checksum included
    pub bytes_written: u64,
    /// The trailing package checksum
    pub checksum: u32,
}

impl<W: Write + Seek> GmaBuilder<W> {
    /// Create a builder with the default whitelist, current-time timestamp,
    /// and placeholder author.
    pub fn new(writer: W) -> Self {
        Self {
            writer: ChecksumWriter::new(writer),
            whitelist: Whitelist::default(),
            timestamp: None,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    /// Replace the content filter policy.
    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    /// Pin the header timestamp instead of using the current time.
    ///
    /// The timestamp is the only intentionally non-deterministic field;
    /// pinning it makes output byte-for-byte reproducible.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Replace the author placeholder written to the header.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Encode the source archive into a container package.
    ///
    /// Locates and parses the manifest, filters the members, and performs the
    /// linear emission pass. Manifest failures abort before any byte reaches
    /// the writer.
    ///
    /// # Errors
    /// [`GmaError::ManifestNotFound`] / [`GmaError::ManifestParse`] when the
    /// metadata descriptor is missing or unusable, [`GmaError::MemberRead`] /
    /// [`GmaError::MemberSizeMismatch`] when a member's content cannot be
    /// pulled intact, or an I/O error from the output writer. On any error
    /// the destination holds a partial package that must be discarded.
    pub fn write_archive<S>(mut self, source: &mut S) -> Result<(W, EncodeSummary)>
    where
        S: SourceArchive + ?Sized,
    {
        // Manifest stage; every fatal outcome here precedes the first output byte.
        let manifest_path = locate_manifest(source.members().iter().map(|m| m.path.as_str()))
            .ok_or(GmaError::ManifestNotFound(MANIFEST_NAME))?
            .to_string();
        let manifest_bytes = read_member(source, &manifest_path)?;
        let manifest = AddonManifest::parse(&manifest_bytes)?;
        let description = manifest.build_description();
        let root = root_folder(&manifest_path);

        let included = self.build_inclusion_list(source, &root);
        if included.is_empty() {
            tracing::warn!(
                root = %root,
                "no members passed the content filter; writing an empty package"
            );
        }

        // Header
        let timestamp = self.timestamp.unwrap_or_else(unix_now);
        let header = GmaHeader::new(manifest.title, description, self.author.clone(), timestamp);
        header.write(&mut self.writer)?;

        // File table; sequence numbers are contiguous over included files only
        let mut files = Vec::with_capacity(included.len());
        for (position, (member, relative)) in included.iter().enumerate() {
            let entry = GmaFileEntry {
                number: position as u32 + 1,
                path: relative.clone(),
                size: member.size as i64,
                crc: member.crc,
            };
            tracing::debug!(
                path = %entry.path,
                number = entry.number,
                size = entry.size,
                crc = entry.crc,
                "file table entry"
            );
            entry.write(&mut self.writer)?;
            files.push(entry);
        }
        0u32.write_options(&mut self.writer, binrw::Endian::Little, ())?;

        // Payloads, in the exact table order
        for (member, _) in &included {
            let content = read_member(source, &member.path)?;
            if content.len() as u64 != member.size {
                return Err(GmaError::MemberSizeMismatch {
                    path: member.path.clone(),
                    expected: member.size,
                    actual: content.len() as u64,
                });
            }
            self.writer.write_all(&content)?;
        }

        // Trailing checksum over everything emitted so far
        let checksum = self.writer.digest();
        checksum.write_options(&mut self.writer, binrw::Endian::Little, ())?;
        self.writer.flush()?;

        let summary = EncodeSummary {
            files,
            bytes_written: self.writer.position(),
            checksum,
        };
        Ok((self.writer.into_inner(), summary))
    }

    /// One ordered pass over the members, consulting the filter once each.
    fn build_inclusion_list<S>(&self, source: &S, root: &str) -> Vec<(SourceMember, String)>
    where
        S: SourceArchive + ?Sized,
    {
        source
            .members()
            .iter()
            .filter(|member| !member.is_dir && is_under_root(root, &member.path))
            .filter_map(|member| {
                let relative = relative_path(root, &member.path);
                self.whitelist
                    .includes(&relative)
                    .then(|| (member.clone(), relative))
            })
            .collect()
    }
}

impl GmaBuilder<std::fs::File> {
    /// Create a builder writing to a new file on disk.
    pub fn create<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(Self::new(std::fs::File::create(path)?))
    }
}

fn read_member<S>(source: &mut S, path: &str) -> Result<Vec<u8>>
where
    S: SourceArchive + ?Sized,
{
    source
        .read_member(path)
        .map_err(|source_err| GmaError::MemberRead {
            path: path.to_string(),
            source: source_err,
        })
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}

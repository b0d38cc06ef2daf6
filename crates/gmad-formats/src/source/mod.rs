//! Source archive abstraction for the container builder
//!
//! The builder never talks to a concrete archive library; it consumes the
//! [`SourceArchive`] capability: ordered member enumeration plus on-demand
//! uncompressed content reads. Two backends are provided:
//!
//! - [`ZipSource`]: a zip archive, the delivery format for addon uploads;
//!   member sizes and CRCs come straight from the zip central directory
//! - [`DirSource`]: a plain directory tree, for packaging unzipped content;
//!   member CRCs are computed while scanning
//!
//! Both enumerate members in a stable order, which the builder relies on for
//! deterministic output.

mod dir;
mod zip;

pub use self::dir::DirSource;
pub use self::zip::ZipSource;

use std::io;

/// Metadata for one member of a source archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMember {
    /// Full archive-relative path, forward-slash separated
    pub path: String,
    /// Uncompressed byte length
    pub size: u64,
    /// CRC-32 of the uncompressed content
    pub crc: u32,
    /// Whether this member is a directory entry
    pub is_dir: bool,
}

/// Capability interface the container builder consumes.
///
/// Implementations own their backing storage for the duration of an encode;
/// enumeration order is stable across calls and matches the order content
/// will appear in the package.
pub trait SourceArchive {
    /// All members in enumeration order.
    fn members(&self) -> &[SourceMember];

    /// Produce the uncompressed content of the member at `path`.
    fn read_member(&mut self, path: &str) -> io::Result<Vec<u8>>;
}

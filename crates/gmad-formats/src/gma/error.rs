//! Error types for container building and parsing

use thiserror::Error;

/// Errors that can occur when building or parsing an addon container
#[derive(Error, Debug)]
pub enum GmaError {
    /// No metadata descriptor was found anywhere in the source archive
    #[error("no addon manifest ({0}) found in source archive")]
    ManifestNotFound(&'static str),

    /// The manifest was found but its JSON content is unusable
    #[error("invalid addon manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// Reading a source member's content failed
    #[error("failed to read member '{path}': {source}")]
    MemberRead {
        /// Archive-relative path of the member that failed
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A member's content did not match its declared uncompressed size
    #[error("member '{path}' produced {actual} bytes, expected {expected}")]
    MemberSizeMismatch {
        /// Archive-relative path of the offending member
        path: String,
        /// Size declared by the source archive
        expected: u64,
        /// Bytes actually produced
        actual: u64,
    },

    /// Invalid format tag at the start of a container
    #[error("invalid container ident: expected 'GMAD', got {0:?}")]
    InvalidIdent([u8; 4]),

    /// Container version this implementation does not understand
    #[error("unsupported container version: {0}")]
    UnsupportedVersion(u8),

    /// The trailing package checksum does not match the emitted bytes
    #[error("package checksum mismatch: stored {stored:08x}, computed {computed:08x}")]
    ChecksumMismatch {
        /// Checksum stored in the trailing field
        stored: u32,
        /// Checksum recomputed over the preceding bytes
        computed: u32,
    },

    /// A per-file checksum does not match that file's payload bytes
    #[error("file checksum mismatch for '{path}': stored {stored:08x}, computed {computed:08x}")]
    FileChecksumMismatch {
        /// Table path of the offending file
        path: String,
        /// Checksum stored in the file table
        stored: u32,
        /// Checksum recomputed over the payload span
        computed: u32,
    },

    /// File table sequence numbers are not contiguous from 1
    #[error("file table entry at position {position} has number {number}, expected {expected}")]
    NonContiguousNumber {
        /// Zero-based position of the entry within the table
        position: usize,
        /// Sequence number found in the container
        number: u32,
        /// Sequence number the table order requires
        expected: u32,
    },

    /// The container ends before the structure it declares
    #[error("package truncated: {0}")]
    Truncated(&'static str),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary parsing/writing error
    #[error("binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Type alias for container operation results
pub type Result<T> = std::result::Result<T, GmaError>;

//! GMA addon container format support
//!
//! The container is the single flat binary file the engine's addon loader
//! mounts. Its layout is a strict linear sequence:
//!
//! - **Header**: `GMAD` tag, format version, an unused owner-id placeholder,
//!   the encode timestamp, an (empty) required-content list, then title,
//!   derived description, and author as null-terminated strings, and a fixed
//!   format-revision counter
//! - **File table**: per included file a 1-based sequence number, the
//!   root-relative lowercased path, the uncompressed size, and the file's
//!   CRC-32; terminated by a 4-byte zero
//! - **Payload**: the files' raw bytes concatenated in table order, with no
//!   padding or separators
//! - **Checksum**: CRC-32 over every preceding byte
//!
//! All multi-byte integers are little-endian. Readers locate a file's payload
//! by summing the sizes of all preceding table entries, which is why table
//! order and payload order must match exactly.
//!
//! # Basic Usage
//!
//! ## Building a package
//!
//! ```rust,no_run
//! use gmad_formats::gma::GmaBuilder;
//! use gmad_formats::source::ZipSource;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = ZipSource::open("addon.zip")?;
//! let output = std::fs::File::create("addon.gma")?;
//! let (_, summary) = GmaBuilder::new(output).write_archive(&mut source)?;
//! println!("{} files packaged", summary.files.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing a package
//!
//! ```rust,no_run
//! use gmad_formats::gma::GmaFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("addon.gma")?;
//! let gma = GmaFile::parse(&data)?;
//!
//! println!("{} by {}", gma.header.name, gma.header.author);
//! for entry in &gma.entries {
//!     println!("  #{} {} ({} bytes)", entry.number, entry.path, entry.size);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
mod cstring;
pub mod entry;
pub mod error;
pub mod header;
pub mod reader;

// Re-export main types
pub use builder::{EncodeSummary, GmaBuilder};
pub use entry::GmaFileEntry;
pub use error::{GmaError, Result};
pub use header::{
    ADDON_VERSION, DEFAULT_AUTHOR, GMA_IDENT, GMA_VERSION, GmaHeader, STEAMID_PLACEHOLDER,
};
pub use reader::GmaFile;

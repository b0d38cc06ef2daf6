//! Builder and parser for the GMA addon container format
//!
#![allow(clippy::cast_possible_wrap)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
//! The GMA container is the single flat binary file the game engine's addon
//! loader consumes: a header carrying addon metadata, an ordered file table,
//! the concatenated file payloads, and a trailing CRC-32 over everything
//! before it.
//!
//! The crate covers the whole packaging pipeline:
//!
//! - **Checksum**: the zip-family CRC-32 used per file and for the trailing
//!   package checksum, with an incremental writer adapter
//! - **Manifest**: locating and parsing the `addon.json` metadata descriptor
//!   and deriving the description blob embedded in the container
//! - **Whitelist**: the data-driven content filter deciding which source
//!   members are packaged
//! - **Source**: an archive abstraction over zip files and directory trees
//! - **Gma**: the container builder (strict linear emission with a streaming
//!   checksum) and the symmetric parser
//!
//! # Design Principles
//!
//! Every format implementation follows these principles:
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Deterministic Output**: Identical input and timestamp produce
//!   byte-identical packages
//! - **Round-Trip Guarantee**: parse(build(data)) == data

#![warn(missing_docs)]

pub mod checksum;
pub mod gma;
pub mod manifest;
pub mod source;
pub mod whitelist;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

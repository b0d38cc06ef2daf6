//! CRC-32 checksum engine for container integrity
//!
//! The container format uses the zip-family CRC-32 (polynomial 0xEDB88320,
//! reflected, initial value `0xFFFF_FFFF`, final XOR `0xFFFF_FFFF`) twice:
//! once per file in the file table, and once over the entire emitted byte
//! stream as the trailing package checksum.
//!
//! The trailing checksum is accumulated incrementally through
//! [`ChecksumWriter`] while the package is being written, so the builder
//! never has to hold the assembled package in memory just to re-hash it.

use std::io::{self, Seek, SeekFrom, Write};

/// Compute the CRC-32 of a byte sequence.
///
/// Pure function; any input length including zero. Incremental computation
/// over the same bytes (see [`ChecksumWriter`]) agrees bit-for-bit regardless
/// of chunking.
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Writer adapter that accumulates a CRC-32 over every byte written through it.
///
/// Wraps any [`Write`] target and feeds a [`crc32fast::Hasher`] with exactly
/// the bytes the inner writer accepted. [`digest`](Self::digest) returns the
/// checksum of everything forwarded so far without consuming the writer, so
/// the trailing checksum field can be appended through the same adapter.
pub struct ChecksumWriter<W> {
    inner: W,
    hasher: crc32fast::Hasher,
    position: u64,
}

impl<W> ChecksumWriter<W> {
    /// Wrap a writer, starting with an empty checksum state.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: crc32fast::Hasher::new(),
            position: 0,
        }
    }

    /// CRC-32 of every byte written so far.
    pub fn digest(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    /// Total number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap the adapter, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ChecksumWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.hasher.update(&buf[..written]);
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// Container emission is strictly sequential; the Seek impl exists only to
// satisfy binrw's writer bound and must not be used to rewrite hashed bytes.
impl<W: Seek> Seek for ChecksumWriter<W> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

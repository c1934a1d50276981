// SPDX-License-Identifier: Apache-2.0

//! A convenience Reader implementation for in-memory input.
//!
//! [`ChunkReader`] hands out a byte slice either all at once or in
//! fixed-size chunks. Chunked mode simulates network packets and is how the
//! tests split literals across refills.
//!
//! For production input you'll typically implement [`Reader`] for your own
//! source, or use `IoReader` with the `std` feature.
//!
//! # Examples
//!
//! ```rust
//! use streamfloat::{ChunkReader, Decoder};
//!
//! // Simulate reading only 2 bytes at a time
//! let reader = ChunkReader::new(b"12.75, -3e2", 2);
//! let mut decoder = Decoder::new(reader);
//!
//! let mut a = 0.0f64;
//! let mut b = 0.0f64;
//! decoder.decode_f64(&mut a).unwrap();
//! decoder.decode_f64(&mut b).unwrap();
//! assert_eq!((a, b), (12.75, -300.0));
//! ```

use crate::Reader;

/// A [`Reader`] that reads from a byte slice, optionally in fixed-size chunks.
///
/// 1.  **Full Slice Reading**: [`ChunkReader::full_slice()`] reads as much
///     as the decoder's fill space allows.
/// 2.  **Chunked Reading**: [`ChunkReader::new()`] limits each `read()` call
///     to a maximum chunk size.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// Create a new chunked reader from a byte slice.
    ///
    /// Each call to `read()` will return at most `chunk_size` bytes
    /// (minimum 1).
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Create a new reader that consumes the entire byte slice at once.
    pub fn full_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }

    /// Bytes not handed out yet.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl Reader for ChunkReader<'_> {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let to_copy = self.remaining().min(buf.len()).min(self.chunk_size);
        if to_copy == 0 {
            return Ok(0);
        }

        let end = self.pos.saturating_add(to_copy);
        match (buf.get_mut(..to_copy), self.data.get(self.pos..end)) {
            (Some(dest), Some(src)) => dest.copy_from_slice(src),
            // Unreachable given the `to_copy` calculation
            _ => return Err(()),
        }
        self.pos = end;
        Ok(to_copy)
    }
}

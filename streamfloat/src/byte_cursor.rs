// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use crate::config::DecoderConfig;
use crate::parse_error::ParseError;
use crate::stream_buffer::StreamBuffer;
use crate::Reader;

/// Owns the buffer/cursor/length triple and the byte source behind it.
///
/// [`ByteCursor::ensure`] is the only place that pulls from the reader, so it
/// is the only suspension point of a decode call.
pub struct ByteCursor<R: Reader> {
    buffer: StreamBuffer,
    reader: R,
    /// Set once the reader returned 0; it is never asked again
    exhausted: bool,
}

impl<R: Reader> ByteCursor<R> {
    pub fn new(reader: R, config: &DecoderConfig) -> Self {
        Self {
            buffer: StreamBuffer::new(config.initial_capacity, config.max_capacity),
            reader,
            exhausted: false,
        }
    }

    /// Build on a recycled allocation.
    pub fn with_storage(reader: R, storage: Vec<u8>, config: &DecoderConfig) -> Self {
        Self {
            buffer: StreamBuffer::from_vec(storage, config.max_capacity),
            reader,
            exhausted: false,
        }
    }

    /// Guarantee that `pos` holds a valid byte.
    ///
    /// Returns `Ok(false)` when the source is exhausted before `pos` was
    /// reached. Already-valid bytes are never moved by a refill.
    pub fn ensure(&mut self, pos: usize) -> Result<bool, ParseError> {
        while pos >= self.buffer.len() {
            if self.exhausted || !self.refill()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// [`ensure`](Self::ensure) followed by a read of the byte at `pos`.
    #[inline]
    pub fn peek(&mut self, pos: usize) -> Result<Option<u8>, ParseError> {
        if !self.ensure(pos)? {
            return Ok(None);
        }
        Ok(self.buffer.byte_at(pos))
    }

    /// Pull one chunk from the reader. Returns `false` at end of stream.
    fn refill(&mut self) -> Result<bool, ParseError> {
        let fill_slice = self.buffer.get_fill_slice()?;
        let bytes_read = self
            .reader
            .read(fill_slice)
            .map_err(|_| ParseError::ReaderError)?;

        if bytes_read == 0 {
            log::debug!("reader reached end of stream at offset {}", self.buffer.len());
            self.exhausted = true;
            return Ok(false);
        }

        self.buffer.mark_filled(bytes_read)?;
        log::trace!(
            "refilled {bytes_read} bytes, {} valid",
            self.buffer.len()
        );
        Ok(true)
    }

    /// Current read offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.buffer.current_position()
    }

    /// Commit the read offset. Only forward moves within valid data are
    /// accepted.
    #[inline]
    pub fn set_position(&mut self, pos: usize) -> Result<(), ParseError> {
        Ok(self.buffer.advance_to(pos)?)
    }

    /// Valid bytes in `[start, end)`.
    #[inline]
    pub fn span(&self, start: usize, end: usize) -> Result<&[u8], ParseError> {
        Ok(self.buffer.get_span(start, end)?)
    }

    /// Detach the buffer allocation; the cursor is unusable for reads
    /// afterwards until it refills from scratch.
    pub fn take_storage(&mut self) -> Vec<u8> {
        self.buffer.take_inner()
    }

    pub fn into_storage(self) -> Vec<u8> {
        self.buffer.into_inner()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }
}

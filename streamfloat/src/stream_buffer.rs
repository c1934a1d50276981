// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

/// Capacity an empty buffer grows to on its first fill.
pub const DEFAULT_CAPACITY: usize = 512;

/// Error types for StreamBuffer operations
#[derive(Debug, PartialEq)]
pub enum StreamBufferError {
    /// Buffer reached its maximum capacity and cannot accommodate more data
    BufferFull,
    /// An unexpected error occurred.
    Unexpected,
    /// Invalid slice bounds provided for span extraction
    InvalidSliceBounds,
}

/// StreamBuffer owns the bytes pulled from a Reader for one document.
///
/// - `buffer[0..data_end]` holds valid data; the rest is fill space
/// - `tokenize_pos <= data_end <= buffer.len()` always holds
/// - Filling only appends; valid bytes are never moved, so positions are
///   absolute document offsets
/// - When the fill space runs out the buffer doubles, up to `max_capacity`
pub struct StreamBuffer {
    /// Backing storage; its length is the current capacity
    buffer: Vec<u8>,
    /// Current position where the decoder is reading
    tokenize_pos: usize,
    /// End of valid data from Reader
    data_end: usize,
    /// Upper bound for growth
    max_capacity: usize,
}

impl StreamBuffer {
    /// Create a StreamBuffer with `initial_capacity` bytes of fill space.
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        let mut buffer = Vec::new();
        buffer.resize(initial_capacity.min(max_capacity), 0);
        Self::from_vec(buffer, max_capacity)
    }

    /// Reuse an existing allocation. Its current length becomes the capacity
    /// and its contents are treated as fill space.
    pub fn from_vec(mut buffer: Vec<u8>, max_capacity: usize) -> Self {
        buffer.truncate(max_capacity);
        Self {
            buffer,
            tokenize_pos: 0,
            data_end: 0,
            max_capacity,
        }
    }

    /// Give the backing allocation back, e.g. to a pool.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// Detach the backing allocation, leaving an empty buffer behind.
    pub fn take_inner(&mut self) -> Vec<u8> {
        self.reset();
        core::mem::take(&mut self.buffer)
    }

    /// Forget all valid data while keeping the allocation.
    pub fn reset(&mut self) {
        self.tokenize_pos = 0;
        self.data_end = 0;
    }

    /// Byte at an absolute position, if it is valid data.
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        if pos >= self.data_end {
            return None;
        }
        self.buffer.get(pos).copied()
    }

    /// Number of valid bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data_end
    }

    /// Current capacity (valid bytes plus fill space).
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Get current tokenize position
    #[inline]
    pub fn current_position(&self) -> usize {
        self.tokenize_pos
    }

    /// Move the tokenize position forward to `pos`.
    ///
    /// Positions past the valid data or behind the current position are
    /// rejected; the cursor never rewinds.
    pub fn advance_to(&mut self, pos: usize) -> Result<(), StreamBufferError> {
        if pos > self.data_end || pos < self.tokenize_pos {
            return Err(StreamBufferError::InvalidSliceBounds);
        }
        self.tokenize_pos = pos;
        Ok(())
    }

    /// Check if all valid data has been consumed
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tokenize_pos >= self.data_end
    }

    /// Get slice for Reader to fill with new data, growing the buffer when
    /// no fill space is left.
    pub fn get_fill_slice(&mut self) -> Result<&mut [u8], StreamBufferError> {
        if self.data_end >= self.buffer.len() {
            self.grow()?;
        }
        self.buffer
            .get_mut(self.data_end..)
            .ok_or(StreamBufferError::InvalidSliceBounds)
    }

    fn grow(&mut self) -> Result<(), StreamBufferError> {
        let current = self.buffer.len();
        if current >= self.max_capacity {
            return Err(StreamBufferError::BufferFull);
        }
        let wanted = if current == 0 {
            DEFAULT_CAPACITY
        } else {
            current.saturating_mul(2)
        };
        let new_len = wanted.min(self.max_capacity);
        log::trace!("growing stream buffer from {current} to {new_len} bytes");
        self.buffer.resize(new_len, 0);
        Ok(())
    }

    /// Mark that Reader filled `bytes_read` bytes
    pub fn mark_filled(&mut self, bytes_read: usize) -> Result<(), StreamBufferError> {
        let new_data_end = self
            .data_end
            .checked_add(bytes_read)
            .ok_or(StreamBufferError::Unexpected)?;
        if new_data_end > self.buffer.len() {
            return Err(StreamBufferError::Unexpected);
        }
        self.data_end = new_data_end;
        Ok(())
    }

    /// Get a span of valid data (zero-copy)
    pub fn get_span(&self, start: usize, end: usize) -> Result<&[u8], StreamBufferError> {
        if start > end || end > self.data_end {
            return Err(StreamBufferError::InvalidSliceBounds);
        }
        self.buffer
            .get(start..end)
            .ok_or(StreamBufferError::InvalidSliceBounds)
    }
}

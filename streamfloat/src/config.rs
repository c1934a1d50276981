// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration for decoders and pools.

/// Buffer sizing for a [`Decoder`](crate::Decoder).
///
/// The defaults start with no allocation (the first refill allocates
/// [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) bytes) and let the buffer
/// grow without bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Bytes allocated up front.
    pub initial_capacity: usize,
    /// Hard limit for buffer growth. Consumed bytes are never discarded, so
    /// this caps the total length of the document read so far: a refill
    /// needed past it raises
    /// [`ParseError::BufferFull`](crate::ParseError::BufferFull).
    pub max_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_capacity: usize::MAX,
        }
    }
}

impl DecoderConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

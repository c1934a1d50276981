// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use crate::config::DecoderConfig;
use crate::{Decoder, Reader};

/// Default number of buffers a pool keeps around.
pub const DEFAULT_MAX_POOLED: usize = 16;

/// Recycles decoder buffers across documents.
///
/// [`DecoderPool::recycle`] takes the decoder by value, so a handle cannot
/// be used after its buffer went back to the pool. The pool resets each
/// buffer before handing it to a new decoder.
///
/// ```
/// use streamfloat::{ChunkReader, DecoderPool};
///
/// let mut pool = DecoderPool::new();
/// for doc in [&b"1.25"[..], b"-8e-1"] {
///     let mut decoder = pool.borrow(ChunkReader::full_slice(doc));
///     let mut value = 0.0f64;
///     decoder.decode_f64(&mut value).unwrap();
///     pool.recycle(decoder);
/// }
/// assert_eq!(pool.pooled(), 1);
/// ```
#[derive(Debug)]
pub struct DecoderPool {
    buffers: Vec<Vec<u8>>,
    config: DecoderConfig,
    max_pooled: usize,
}

impl Default for DecoderPool {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderPool {
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default(), DEFAULT_MAX_POOLED)
    }

    /// Pool whose decoders use `config` and which keeps at most `max_pooled`
    /// idle buffers.
    pub fn with_config(config: DecoderConfig, max_pooled: usize) -> Self {
        Self {
            buffers: Vec::new(),
            config,
            max_pooled,
        }
    }

    /// A decoder over `reader`, on a recycled buffer when one is available.
    pub fn borrow<R: Reader>(&mut self, reader: R) -> Decoder<R> {
        match self.buffers.pop() {
            Some(storage) => {
                log::trace!("reusing pooled buffer of {} bytes", storage.len());
                Decoder::with_storage(reader, storage, &self.config)
            }
            None => Decoder::with_config(reader, &self.config),
        }
    }

    /// Return a decoder's buffer to the pool.
    pub fn recycle<R: Reader>(&mut self, decoder: Decoder<R>) {
        self.put_buffer(decoder.into_buffer());
    }

    /// Return a buffer obtained from [`Decoder::release`].
    pub fn put_buffer(&mut self, buffer: Vec<u8>) {
        if buffer.is_empty() || self.buffers.len() >= self.max_pooled {
            return;
        }
        self.buffers.push(buffer);
    }

    /// Number of idle buffers.
    pub fn pooled(&self) -> usize {
        self.buffers.len()
    }
}

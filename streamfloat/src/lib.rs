// SPDX-License-Identifier: Apache-2.0

//! Streaming decoder for JSON number literals.
//!
//! Numbers are rebuilt from their digits with integer arithmetic and a
//! power-of-ten table instead of a generic text-to-float conversion. Input is
//! pulled through a [`Reader`] into a growable buffer, and a literal may be
//! split across any number of reads.
//!
//! ```
//! use streamfloat::{ChunkReader, Decoder};
//!
//! // One byte per read: every literal crosses refill boundaries
//! let mut decoder = Decoder::new(ChunkReader::new(b"3.14, -5e2, null", 1));
//! let mut x = 0.0f64;
//! let mut y = 0.0f32;
//! let mut z = 1.0f64;
//! decoder.decode_f64(&mut x).unwrap();
//! decoder.decode_f32(&mut y).unwrap();
//! decoder.decode_f64(&mut z).unwrap();
//! assert_eq!((x, y, z), (3.14, -500.0, 1.0));
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod byte_cursor;

mod chunk_reader;
pub use chunk_reader::ChunkReader;

mod config;
pub use config::DecoderConfig;

mod decoder;
pub use decoder::Decoder;

mod digit_span;
pub use digit_span::{accumulate, DigitAccumulator, SpanError};

mod float_target;
pub use float_target::FloatTarget;

mod number_parser;

mod parse_error;
pub use parse_error::{ParseError, UnexpectedState};

mod pool;
pub use pool::{DecoderPool, DEFAULT_MAX_POOLED};

mod reader;
#[cfg(feature = "std")]
pub use reader::IoReader;
pub use reader::Reader;

mod scale_table;
pub use scale_table::MAX_SCALE;

mod skip;

mod stream_buffer;
pub use stream_buffer::DEFAULT_CAPACITY;

/// Decode a single number from an in-memory document.
///
/// Unlike the decoder methods, a non-numeric value is reported as an error
/// here, since there is no later point at which to check for it. Anything
/// after the value other than whitespace and commas is an `InvalidLiteral`.
///
/// ```
/// assert_eq!(streamfloat::from_slice::<f64>(b" 2.5e1 "), Ok(25.0));
/// assert_eq!(streamfloat::from_slice::<f32>(b"null"), Ok(0.0));
/// assert!(streamfloat::from_slice::<f64>(b"\"1\"").is_err());
/// assert!(streamfloat::from_slice::<f64>(b"1 2").is_err());
/// ```
pub fn from_slice<F: FloatTarget + Default>(input: &[u8]) -> Result<F, ParseError> {
    let mut decoder = Decoder::from_slice(input);
    let mut value = F::default();
    decoder.decode(&mut value)?;
    decoder.check()?;
    if !decoder.at_end()? {
        return Err(ParseError::InvalidLiteral {
            offset: decoder.position(),
        });
    }
    Ok(value)
}

// SPDX-License-Identifier: Apache-2.0

use crate::digit_span::SpanError;
use crate::stream_buffer::StreamBufferError;

/// Internal invariant violations. These indicate a bug in the decoder rather
/// than bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedState {
    /// A digit span was requested outside the valid bytes of the buffer.
    InvalidSliceBounds,
    /// The reader reported more bytes than the fill slice could hold.
    BufferCapacityExceeded,
    /// A span that the scanner already validated failed to accumulate.
    SpanNotDigits,
}

/// Errors that can occur while decoding a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Malformed number grammar, a broken `null`, or input that ended before
    /// any digit. `offset` is the absolute position of the offending byte.
    InvalidLiteral { offset: usize },
    /// The value at `offset` is not a number. Recorded as the decoder's
    /// sticky error instead of being returned from the decode call.
    TypeMismatch {
        /// Destination type name, `"f64"` or `"f32"`.
        expected: &'static str,
        offset: usize,
    },
    /// The literal starting at `offset` has too many digits for the
    /// accumulator, an exponent beyond `u32`, or a value too large for the
    /// destination float.
    NumericOverflow { offset: usize },
    /// The document read so far filled the buffer's configured maximum
    /// capacity and more bytes were needed.
    BufferFull,
    /// Error from the underlying reader (I/O error, not end-of-stream)
    ReaderError,
    /// The decoder entered an unexpected internal state.
    Unexpected(UnexpectedState),
}

impl ParseError {
    /// Byte offset the error is anchored at, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::InvalidLiteral { offset }
            | ParseError::TypeMismatch { offset, .. }
            | ParseError::NumericOverflow { offset } => Some(*offset),
            _ => None,
        }
    }
}

impl From<StreamBufferError> for ParseError {
    fn from(err: StreamBufferError) -> Self {
        match err {
            StreamBufferError::BufferFull => ParseError::BufferFull,
            StreamBufferError::Unexpected => {
                ParseError::Unexpected(UnexpectedState::BufferCapacityExceeded)
            }
            StreamBufferError::InvalidSliceBounds => {
                ParseError::Unexpected(UnexpectedState::InvalidSliceBounds)
            }
        }
    }
}

impl From<UnexpectedState> for ParseError {
    fn from(info: UnexpectedState) -> Self {
        ParseError::Unexpected(info)
    }
}

/// Maps an accumulator failure onto the literal that produced it.
pub(crate) fn span_error_at(err: SpanError, offset: usize) -> ParseError {
    match err {
        SpanError::Overflow => ParseError::NumericOverflow { offset },
        SpanError::Empty | SpanError::InvalidDigit => UnexpectedState::SpanNotDigits.into(),
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::InvalidLiteral { offset } => {
                write!(f, "invalid literal at offset {offset}")
            }
            ParseError::TypeMismatch { expected, offset } => {
                write!(f, "cannot decode value at offset {offset} into {expected}")
            }
            ParseError::NumericOverflow { offset } => {
                write!(f, "number at offset {offset} is out of range")
            }
            _ => write!(f, "{self:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

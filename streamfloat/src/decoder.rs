// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use crate::byte_cursor::ByteCursor;
use crate::config::DecoderConfig;
use crate::float_target::FloatTarget;
use crate::number_parser::scan_unsigned;
use crate::parse_error::ParseError;
use crate::skip::{assert_and_consume_null, skip_raw_value};
use crate::{ChunkReader, Reader};

/// What the leading byte of a value says about it.
enum Leading {
    Digit,
    Minus,
    Null,
    Other,
}

/// A streaming number decoder over a [`Reader`].
///
/// Each decode call skips leading whitespace and commas, then decodes one
/// value. Values that are not numbers do not fail the call: the first such
/// mismatch is kept as the decoder's sticky error (see [`Decoder::error`])
/// and the value is skipped, so a caller walking a larger document can
/// continue and check for problems at the end.
///
/// # Example
/// ```
/// use streamfloat::{Decoder, ParseError};
///
/// let mut decoder = Decoder::from_slice(br#"1.5, "oops", -2e2"#);
/// let mut values = [0.0f64; 3];
/// for value in values.iter_mut() {
///     decoder.decode_f64(value).unwrap();
/// }
/// assert_eq!(values, [1.5, 0.0, -200.0]);
/// assert_eq!(
///     decoder.error(),
///     Some(&ParseError::TypeMismatch { expected: "f64", offset: 5 })
/// );
/// ```
pub struct Decoder<R: Reader> {
    cursor: ByteCursor<R>,
    /// First type mismatch seen; never overwritten once set
    sticky_error: Option<ParseError>,
    /// Set by `release`; the buffer no longer belongs to this document
    released: bool,
}

impl<'a> Decoder<ChunkReader<'a>> {
    /// Decoder over an in-memory document.
    pub fn from_slice(input: &'a [u8]) -> Self {
        Self::new(ChunkReader::full_slice(input))
    }
}

impl<R: Reader> Decoder<R> {
    /// Create a decoder with the default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: &DecoderConfig) -> Self {
        Self::from_cursor(ByteCursor::new(reader, config))
    }

    /// Build on a recycled buffer allocation. The allocation's contents are
    /// ignored.
    pub(crate) fn with_storage(reader: R, storage: Vec<u8>, config: &DecoderConfig) -> Self {
        Self::from_cursor(ByteCursor::with_storage(reader, storage, config))
    }

    fn from_cursor(cursor: ByteCursor<R>) -> Self {
        Self {
            cursor,
            sticky_error: None,
            released: false,
        }
    }

    /// Decode the next value into an `f64`.
    ///
    /// `null` leaves `value` untouched.
    ///
    /// # Panics
    /// If the decoder was [released](Decoder::release).
    pub fn decode_f64(&mut self, value: &mut f64) -> Result<(), ParseError> {
        self.decode(value)
    }

    /// Decode the next value into an `f32`.
    ///
    /// `null` leaves `value` untouched.
    ///
    /// # Panics
    /// If the decoder was [released](Decoder::release).
    pub fn decode_f32(&mut self, value: &mut f32) -> Result<(), ParseError> {
        self.decode(value)
    }

    /// Decode the next value into either float width.
    ///
    /// # Errors
    /// * `InvalidLiteral` for malformed numbers or `null`, and when input
    ///   ends before a value starts
    /// * `NumericOverflow` when the number does not fit
    /// * `ReaderError` / `BufferFull` from the byte source
    ///
    /// A non-numeric value is not an error of this call; see
    /// [`Decoder::error`].
    ///
    /// # Panics
    /// If the decoder was [released](Decoder::release).
    pub fn decode<F: FloatTarget>(&mut self, value: &mut F) -> Result<(), ParseError> {
        self.assert_not_released();
        if let Some(decoded) = self.decode_value::<F>()? {
            *value = decoded;
        }
        Ok(())
    }

    /// Like [`Decoder::decode`], but `null` stores `None`.
    ///
    /// # Panics
    /// If the decoder was [released](Decoder::release).
    pub fn decode_option<F: FloatTarget>(
        &mut self,
        value: &mut Option<F>,
    ) -> Result<(), ParseError> {
        self.assert_not_released();
        let start = self.skip_separators()?;
        let is_null = self.cursor.peek(start)? == Some(b'n');
        match self.decode_value::<F>()? {
            Some(decoded) => *value = Some(decoded),
            None if is_null => *value = None,
            None => {}
        }
        Ok(())
    }

    /// Returns `None` for `null` and for skipped mismatches.
    fn decode_value<F: FloatTarget>(&mut self) -> Result<Option<F>, ParseError> {
        let pos = self.skip_separators()?;
        let Some(byte) = self.cursor.peek(pos)? else {
            return Err(ParseError::InvalidLiteral { offset: pos });
        };

        let leading = match byte {
            b'0'..=b'9' => Leading::Digit,
            b'-' => Leading::Minus,
            b'n' => Leading::Null,
            _ => Leading::Other,
        };

        match leading {
            Leading::Digit => scan_unsigned::<F, R>(&mut self.cursor).map(Some),
            Leading::Minus => {
                self.cursor.set_position(pos.wrapping_add(1))?;
                // Negated once, after any exponent scaling
                let magnitude = scan_unsigned::<F, R>(&mut self.cursor)?;
                Ok(Some(-magnitude))
            }
            Leading::Null => {
                assert_and_consume_null(&mut self.cursor)?;
                Ok(None)
            }
            Leading::Other => {
                self.record_error(ParseError::TypeMismatch {
                    expected: F::KIND,
                    offset: pos,
                });
                skip_raw_value(&mut self.cursor)?;
                Ok(None)
            }
        }
    }

    /// Consumes whitespace and commas; returns the first other offset.
    fn skip_separators(&mut self) -> Result<usize, ParseError> {
        let mut pos = self.cursor.position();
        while let Some(b' ' | b'\t' | b'\n' | b'\r' | b',') = self.cursor.peek(pos)? {
            pos = pos.wrapping_add(1);
        }
        self.cursor.set_position(pos)?;
        Ok(pos)
    }

    /// Skips separators and reports whether the input is exhausted.
    ///
    /// # Panics
    /// If the decoder was [released](Decoder::release).
    pub fn at_end(&mut self) -> Result<bool, ParseError> {
        self.assert_not_released();
        let pos = self.skip_separators()?;
        Ok(!self.cursor.ensure(pos)?)
    }

    fn record_error(&mut self, error: ParseError) {
        match &self.sticky_error {
            None => {
                log::debug!("recording sticky error: {error}");
                self.sticky_error = Some(error);
            }
            Some(first) => {
                log::debug!("ignoring {error}; sticky error already set: {first}");
            }
        }
    }

    /// The first type mismatch recorded on this decoder, if any.
    pub fn error(&self) -> Option<&ParseError> {
        self.sticky_error.as_ref()
    }

    /// `Err` with the sticky error if one was recorded.
    pub fn check(&self) -> Result<(), ParseError> {
        match self.sticky_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Marks the decoder released and hands out its buffer allocation.
    ///
    /// Every decode call made afterwards panics. Prefer
    /// [`DecoderPool::recycle`](crate::DecoderPool::recycle) or
    /// [`Decoder::into_buffer`], which consume the decoder instead.
    pub fn release(&mut self) -> Vec<u8> {
        self.released = true;
        self.cursor.take_storage()
    }

    /// Consumes the decoder and returns its buffer allocation.
    pub fn into_buffer(self) -> Vec<u8> {
        self.cursor.into_storage()
    }

    fn assert_not_released(&self) {
        if self.released {
            panic!("invalid usage of released decoder");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_decode_sequence() {
        let mut decoder = Decoder::from_slice(b"  1, 2.5\n\t-3e1\r,");
        let mut value = 0.0f64;

        decoder.decode_f64(&mut value).unwrap();
        assert_eq!(value, 1.0);
        decoder.decode_f64(&mut value).unwrap();
        assert_eq!(value, 2.5);
        decoder.decode_f64(&mut value).unwrap();
        assert_eq!(value, -30.0);
        assert!(decoder.at_end().unwrap());
        assert!(decoder.error().is_none());
    }

    #[test]
    fn test_cursor_rests_on_separator() {
        let mut decoder = Decoder::from_slice(b"12}");
        let mut value = 0.0f64;
        decoder.decode_f64(&mut value).unwrap();
        assert_eq!(decoder.position(), 2);
    }

    #[test]
    fn test_null_leaves_destination() {
        let mut decoder = Decoder::from_slice(b"null, 4");
        let mut value = 9.5f32;
        decoder.decode_f32(&mut value).unwrap();
        assert_eq!(value, 9.5);
        assert_eq!(decoder.position(), 4);
        decoder.decode_f32(&mut value).unwrap();
        assert_eq!(value, 4.0);
    }

    #[test]
    fn test_decode_option() {
        let mut decoder = Decoder::from_slice(b"null 7 true");
        let mut value = Some(1.0f64);
        decoder.decode_option(&mut value).unwrap();
        assert_eq!(value, None);
        decoder.decode_option(&mut value).unwrap();
        assert_eq!(value, Some(7.0));
        decoder.decode_option(&mut value).unwrap();
        assert_eq!(value, Some(7.0));
        assert!(decoder.error().is_some());
    }

    #[test]
    fn test_sticky_error_first_wins() {
        let mut decoder = Decoder::from_slice(br#""a" true 5"#);
        let mut value = 0.0f64;

        decoder.decode_f64(&mut value).unwrap();
        decoder.decode_f64(&mut value).unwrap();
        assert_eq!(
            decoder.check(),
            Err(ParseError::TypeMismatch {
                expected: "f64",
                offset: 0
            })
        );
        decoder.decode_f64(&mut value).unwrap();
        assert_eq!(value, 5.0);
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let mut decoder = Decoder::from_slice(b" ,\n");
        let mut value = 0.0f64;
        assert_eq!(
            decoder.decode_f64(&mut value),
            Err(ParseError::InvalidLiteral { offset: 3 })
        );

        let mut decoder = Decoder::from_slice(b"-");
        assert_eq!(
            decoder.decode_f64(&mut value),
            Err(ParseError::InvalidLiteral { offset: 1 })
        );
    }

    #[test]
    fn test_release_hands_out_buffer() {
        let mut decoder = Decoder::from_slice(b"1");
        let mut value = 0.0f64;
        decoder.decode_f64(&mut value).unwrap();

        let buffer = decoder.release();
        assert!(decoder.is_released());
        assert!(!buffer.is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid usage of released decoder")]
    fn test_decode_after_release_panics() {
        let mut decoder = Decoder::from_slice(b"1 2");
        let mut value = 0.0f64;
        decoder.decode_f64(&mut value).unwrap();
        let _ = decoder.release();
        let _ = decoder.decode_f64(&mut value);
    }
}

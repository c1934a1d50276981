// SPDX-License-Identifier: Apache-2.0

//! Literal assertion and raw-value skipping.
//!
//! These are deliberately small: they know enough JSON structure to step
//! over one value so that a surrounding walk can continue after a type
//! mismatch, and nothing more.

use crate::byte_cursor::ByteCursor;
use crate::parse_error::ParseError;
use crate::Reader;

/// Matches `literal` byte for byte at the cursor and consumes it.
///
/// # Errors
/// `InvalidLiteral` at the first byte that differs, or where input ended.
pub fn consume_literal<R: Reader>(
    cursor: &mut ByteCursor<R>,
    literal: &[u8],
) -> Result<(), ParseError> {
    let start = cursor.position();
    let mut pos = start;
    for &expected in literal {
        if cursor.peek(pos)? != Some(expected) {
            return Err(ParseError::InvalidLiteral { offset: pos });
        }
        pos = pos.wrapping_add(1);
    }
    cursor.set_position(pos)
}

/// Validates and consumes the four-byte `null` literal at the cursor.
pub fn assert_and_consume_null<R: Reader>(cursor: &mut ByteCursor<R>) -> Result<(), ParseError> {
    consume_literal(cursor, b"null")
}

/// Discards the raw value starting at the cursor.
///
/// Strings, objects, arrays and `true`/`false` are recognised. `null` and
/// numbers never get here; the decoder handles them itself. The cursor ends
/// right after the value, so it rests on the next separator (or at end of
/// input).
///
/// # Errors
/// `InvalidLiteral` for a byte that cannot start a value, a broken literal,
/// or input that ends inside the value.
pub fn skip_raw_value<R: Reader>(cursor: &mut ByteCursor<R>) -> Result<(), ParseError> {
    let start = cursor.position();
    let end = match cursor.peek(start)? {
        Some(b'"') => skip_string(cursor, start.wrapping_add(1))?,
        Some(b'{' | b'[') => skip_container(cursor, start)?,
        Some(b't') => return consume_literal(cursor, b"true"),
        Some(b'f') => return consume_literal(cursor, b"false"),
        _ => return Err(ParseError::InvalidLiteral { offset: start }),
    };
    log::trace!("skipped raw value at {start}..{end}");
    cursor.set_position(end)
}

/// Returns the offset just past the closing quote.
fn skip_string<R: Reader>(cursor: &mut ByteCursor<R>, mut pos: usize) -> Result<usize, ParseError> {
    loop {
        match cursor.peek(pos)? {
            Some(b'"') => return Ok(pos.wrapping_add(1)),
            // The escaped byte can never close the string
            Some(b'\\') => pos = pos.wrapping_add(2),
            Some(_) => pos = pos.wrapping_add(1),
            None => return Err(ParseError::InvalidLiteral { offset: pos }),
        }
    }
}

/// Returns the offset just past the bracket that closes the container at
/// `open`. Nesting is tracked with a depth counter; brackets inside strings
/// are ignored.
fn skip_container<R: Reader>(cursor: &mut ByteCursor<R>, open: usize) -> Result<usize, ParseError> {
    let mut depth = 0usize;
    let mut pos = open;
    loop {
        match cursor.peek(pos)? {
            Some(b'{' | b'[') => {
                depth = depth.wrapping_add(1);
                pos = pos.wrapping_add(1);
            }
            Some(b'}' | b']') => {
                depth = depth.saturating_sub(1);
                pos = pos.wrapping_add(1);
                if depth == 0 {
                    return Ok(pos);
                }
            }
            Some(b'"') => pos = skip_string(cursor, pos.wrapping_add(1))?,
            Some(_) => pos = pos.wrapping_add(1),
            None => return Err(ParseError::InvalidLiteral { offset: pos }),
        }
    }
}

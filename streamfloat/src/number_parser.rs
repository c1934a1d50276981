// SPDX-License-Identifier: Apache-2.0

//! Number token scanner.
//!
//! Scanning starts at the first digit (any sign was already consumed) and
//! walks these states:
//!
//! ```text
//! START -> INTEGER_DIGITS -> FRACTION_DIGITS -> EXPONENT -> TERMINATE
//!                 |                  |                          ^
//!                 +------------------+--------------------------+
//! ```
//!
//! The value is rebuilt without a text-to-float call. The digits with the
//! decimal point removed are accumulated into an integer mantissa, and the
//! mantissa is scaled once by `10^(exponent - fraction_digits)`. When the
//! mantissa and the power of ten are both exact in the destination width
//! that is a single correctly rounded multiply or divide. Otherwise the
//! scaling runs in `f64` in steps of at most `10^MAX_SCALE`.

use crate::byte_cursor::ByteCursor;
use crate::digit_span::{accumulate, DigitAccumulator};
use crate::float_target::FloatTarget;
use crate::parse_error::{span_error_at, ParseError};
use crate::scale_table::{power_of_ten, MAX_SCALE};
use crate::Reader;

/// Bytes that end a number without being part of it.
#[inline]
pub fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b',' | b'}' | b']')
}

fn accumulate_span<A: DigitAccumulator, R: Reader>(
    cursor: &ByteCursor<R>,
    start: usize,
    end: usize,
    literal_start: usize,
) -> Result<A, ParseError> {
    accumulate(cursor.span(start, end)?).map_err(|e| span_error_at(e, literal_start))
}

/// Scans an unsigned number at the cursor and returns its value.
///
/// On success the cursor is left on the separator that ended the number (or
/// at end of input); the separator itself is not consumed. On failure the
/// cursor is not moved. Values too small for `F` round to zero.
///
/// # Errors
/// * `InvalidLiteral` at the offending offset for malformed grammar, or at
///   the start when input ends before the first digit
/// * `NumericOverflow` at the literal start when the digits or the exponent
///   do not fit their accumulators, or the value is too large for `F`
pub fn scan_unsigned<F: FloatTarget, R: Reader>(
    cursor: &mut ByteCursor<R>,
) -> Result<F, ParseError> {
    let start = cursor.position();
    let overflow = ParseError::NumericOverflow { offset: start };

    // START
    match cursor.peek(start)? {
        Some(b'0'..=b'9') => {}
        _ => return Err(ParseError::InvalidLiteral { offset: start }),
    }

    // INTEGER_DIGITS
    let mut pos = start.wrapping_add(1);
    let mut next = loop {
        match cursor.peek(pos)? {
            Some(b'0'..=b'9') => pos = pos.wrapping_add(1),
            other => break other,
        }
    };
    let mut mantissa: F::Mantissa = accumulate_span(cursor, start, pos, start)?;
    let mut fraction_digits = 0usize;

    // FRACTION_DIGITS
    if next == Some(b'.') {
        let frac_start = pos.wrapping_add(1);
        let (with_fraction, end, after) = scan_fraction(cursor, mantissa, frac_start, start)?;
        mantissa = with_fraction;
        fraction_digits = end.wrapping_sub(frac_start);
        pos = end;
        next = after;
    }

    // EXPONENT
    let mut exponent = 0i64;
    if matches!(next, Some(b'e' | b'E')) {
        let (value, end, after) = read_exponent(cursor, pos.wrapping_add(1), start)?;
        exponent = value;
        pos = end;
        next = after;
    }

    // TERMINATE: a separator or the end of input, nothing else
    match next {
        None => {}
        Some(byte) if is_separator(byte) => {}
        Some(_) => return Err(ParseError::InvalidLiteral { offset: pos }),
    }

    let net_scale = i64::try_from(fraction_digits)
        .ok()
        .and_then(|digits| exponent.checked_sub(digits))
        .ok_or(overflow)?;
    let value = reconstruct::<F>(mantissa, net_scale).ok_or(overflow)?;
    if !value.is_finite() {
        return Err(overflow);
    }

    cursor.set_position(pos)?;
    Ok(value)
}

/// Consumes the fractional digits starting at `frac_start`.
///
/// The integer mantissa is shifted one decimal place per fractional digit,
/// then the fractional span is added, giving the literal's digits without
/// the point. Returns that mantissa, the offset after the digits, and the
/// byte found there.
fn scan_fraction<A: DigitAccumulator, R: Reader>(
    cursor: &mut ByteCursor<R>,
    integer: A,
    frac_start: usize,
    literal_start: usize,
) -> Result<(A, usize, Option<u8>), ParseError> {
    let overflow = ParseError::NumericOverflow {
        offset: literal_start,
    };

    let mut mantissa = integer;
    let mut pos = frac_start;
    let next = loop {
        match cursor.peek(pos)? {
            Some(b'0'..=b'9') => {
                mantissa = mantissa.checked_times_ten().ok_or(overflow)?;
                pos = pos.wrapping_add(1);
            }
            other => break other,
        }
    };
    if pos == frac_start {
        // "1." and "1.e5" have no fractional digits
        return Err(ParseError::InvalidLiteral { offset: pos });
    }

    let fraction: A = accumulate_span(cursor, frac_start, pos, literal_start)?;
    let mantissa = mantissa.checked_sum(fraction).ok_or(overflow)?;
    Ok((mantissa, pos, next))
}

/// Reads `[+|-]digits` right after an exponent marker.
///
/// Returns the signed exponent, the offset after its digits, and the byte
/// found there. A marker without digits is an `InvalidLiteral` at the first
/// non-digit.
pub fn read_exponent<R: Reader>(
    cursor: &mut ByteCursor<R>,
    marker_end: usize,
    literal_start: usize,
) -> Result<(i64, usize, Option<u8>), ParseError> {
    let mut pos = marker_end;
    let negative = match cursor.peek(pos)? {
        Some(b'-') => {
            pos = pos.wrapping_add(1);
            true
        }
        Some(b'+') => {
            pos = pos.wrapping_add(1);
            false
        }
        _ => false,
    };

    let digits_start = pos;
    let next = loop {
        match cursor.peek(pos)? {
            Some(b'0'..=b'9') => pos = pos.wrapping_add(1),
            other => break other,
        }
    };
    if pos == digits_start {
        return Err(ParseError::InvalidLiteral { offset: pos });
    }

    let magnitude: u32 = accumulate_span(cursor, digits_start, pos, literal_start)?;
    let magnitude = i64::from(magnitude);
    let exponent = if negative { -magnitude } else { magnitude };
    Ok((exponent, pos, next))
}

/// `mantissa * 10^net_scale` in `F`.
///
/// A zero mantissa is zero whatever the scale.
fn reconstruct<F: FloatTarget>(mantissa: F::Mantissa, net_scale: i64) -> Option<F> {
    if mantissa == <F::Mantissa as DigitAccumulator>::ZERO {
        return Some(F::from_mantissa(mantissa));
    }

    let magnitude = usize::try_from(net_scale.unsigned_abs()).ok()?;
    if mantissa <= F::MAX_EXACT_MANTISSA {
        if let Some(scale) = F::exact_power_of_ten(magnitude) {
            let value = F::from_mantissa(mantissa);
            return Some(if net_scale < 0 {
                value / scale
            } else {
                value * scale
            });
        }
    }

    let wide = rescale_wide(F::mantissa_to_wide(mantissa), magnitude, net_scale < 0)?;
    Some(F::from_wide(wide))
}

/// Multiplies (or divides) by `10^magnitude` in table-sized steps.
///
/// Stops early once the value has overflowed to infinity or underflowed to
/// zero, so huge exponents cost at most a few steps.
fn rescale_wide(mut value: f64, mut magnitude: usize, divide: bool) -> Option<f64> {
    while magnitude > 0 && value != 0.0 && value.is_finite() {
        let step = magnitude.min(MAX_SCALE);
        let scale = power_of_ten(step)?;
        value = if divide { value / scale } else { value * scale };
        magnitude -= step;
    }
    Some(value)
}

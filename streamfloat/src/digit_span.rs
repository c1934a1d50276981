// SPDX-License-Identifier: Apache-2.0

// Digit span accumulation, checked the same way core::num does for radix 10.

/// Reasons a digit span could not be turned into an integer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SpanError {
    /// The span was empty.
    Empty,
    /// A byte in the span was not a base-10 digit.
    InvalidDigit,
    /// The value does not fit the accumulator width.
    Overflow,
}

/// Unsigned integer that digit spans are accumulated into.
///
/// Implemented for `u64` (the `f64` mantissa) and `u32` (the `f32` mantissa
/// and the exponent).
pub trait DigitAccumulator: Copy + PartialOrd + core::fmt::Debug {
    /// The additive identity.
    const ZERO: Self;

    /// `self * 10 + digit`, or `None` on overflow.
    fn checked_push_digit(self, digit: u8) -> Option<Self>;

    /// `self * 10`, or `None` on overflow.
    fn checked_times_ten(self) -> Option<Self>;

    /// `self + other`, or `None` on overflow.
    fn checked_sum(self, other: Self) -> Option<Self>;
}

macro_rules! impl_digit_accumulator {
    ($int_ty:ty) => {
        impl DigitAccumulator for $int_ty {
            const ZERO: Self = 0;

            #[inline]
            fn checked_push_digit(self, digit: u8) -> Option<Self> {
                self.checked_mul(10)?.checked_add(digit as $int_ty)
            }

            #[inline]
            fn checked_times_ten(self) -> Option<Self> {
                self.checked_mul(10)
            }

            #[inline]
            fn checked_sum(self, other: Self) -> Option<Self> {
                self.checked_add(other)
            }
        }
    };
}

impl_digit_accumulator!(u32);
impl_digit_accumulator!(u64);

/// Converts a span of ASCII digits into an integer of width `A`.
///
/// Signs are not accepted; the scanner strips them before it gets here.
/// This function is guaranteed not to panic.
pub fn accumulate<A: DigitAccumulator>(span: &[u8]) -> Result<A, SpanError> {
    if span.is_empty() {
        return Err(SpanError::Empty);
    }

    let mut result = A::ZERO;
    for &byte in span {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            _ => return Err(SpanError::InvalidDigit),
        };
        result = result
            .checked_push_digit(digit)
            .ok_or(SpanError::Overflow)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod test_u64 {
        use super::*;

        #[test]
        fn test_accumulate_u64_simple() {
            assert_eq!(accumulate::<u64>(b"0"), Ok(0));
            assert_eq!(accumulate::<u64>(b"1234567890"), Ok(1234567890));
            assert_eq!(accumulate::<u64>(b"000123"), Ok(123));
        }

        #[test]
        fn test_accumulate_u64_limits() {
            assert_eq!(accumulate::<u64>(b"18446744073709551615"), Ok(u64::MAX));
            assert_eq!(
                accumulate::<u64>(b"18446744073709551616"),
                Err(SpanError::Overflow)
            );
        }
    }

    mod test_u32 {
        use super::*;

        #[test]
        fn test_accumulate_u32_limits() {
            assert_eq!(accumulate::<u32>(b"4294967295"), Ok(u32::MAX));
            assert_eq!(accumulate::<u32>(b"4294967296"), Err(SpanError::Overflow));
        }
    }

    #[test]
    fn test_accumulate_errors() {
        assert_eq!(accumulate::<u64>(b""), Err(SpanError::Empty));
        assert_eq!(accumulate::<u64>(b"-1"), Err(SpanError::InvalidDigit));
        assert_eq!(accumulate::<u32>(b"12a"), Err(SpanError::InvalidDigit));
        assert_eq!(accumulate::<u32>(b"1.5"), Err(SpanError::InvalidDigit));
    }

    #[test]
    fn test_times_ten_matches_shift_add() {
        for value in [0u64, 1, 7, 12345, u64::MAX / 10] {
            let shifted = (value << 3) + (value << 1);
            assert_eq!(value.checked_times_ten(), Some(shifted));
        }
        assert_eq!((u64::MAX / 10 + 1).checked_times_ten(), None);
        assert_eq!(u32::MAX.checked_sum(1), None);
    }
}

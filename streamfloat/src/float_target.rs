// SPDX-License-Identifier: Apache-2.0

use core::ops::{Div, Mul, Neg};

use crate::digit_span::DigitAccumulator;
use crate::scale_table;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f64 {}
    impl Sealed for f32 {}
}

/// Floating-point destinations a number can be decoded into.
///
/// Both widths share one scanner. They differ in the accumulator used for
/// the mantissa and in the range where a single multiply or divide by an
/// exact power of ten is correctly rounded. Outside that range the value is
/// rescaled in `f64` and then narrowed.
pub trait FloatTarget:
    Copy
    + PartialEq
    + core::fmt::Debug
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + sealed::Sealed
{
    /// Integer the digits are accumulated into before conversion.
    type Mantissa: DigitAccumulator;

    /// Name reported in type-mismatch errors.
    const KIND: &'static str;

    /// Largest mantissa this width holds exactly.
    const MAX_EXACT_MANTISSA: Self::Mantissa;

    fn from_mantissa(mantissa: Self::Mantissa) -> Self;

    /// Exact `10^scale` in this width, `None` once it would round.
    fn exact_power_of_ten(scale: usize) -> Option<Self>;

    fn mantissa_to_wide(mantissa: Self::Mantissa) -> f64;

    /// Rounds an `f64` to this width; out-of-range values become infinite.
    fn from_wide(value: f64) -> Self;

    fn is_finite(self) -> bool;
}

impl FloatTarget for f64 {
    type Mantissa = u64;
    const KIND: &'static str = "f64";
    const MAX_EXACT_MANTISSA: u64 = 1 << f64::MANTISSA_DIGITS;

    #[inline]
    fn from_mantissa(mantissa: u64) -> Self {
        mantissa as f64
    }

    #[inline]
    fn exact_power_of_ten(scale: usize) -> Option<Self> {
        scale_table::exact_power_of_ten_f64(scale)
    }

    #[inline]
    fn mantissa_to_wide(mantissa: u64) -> f64 {
        mantissa as f64
    }

    #[inline]
    fn from_wide(value: f64) -> Self {
        value
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl FloatTarget for f32 {
    type Mantissa = u32;
    const KIND: &'static str = "f32";
    const MAX_EXACT_MANTISSA: u32 = 1 << f32::MANTISSA_DIGITS;

    #[inline]
    fn from_mantissa(mantissa: u32) -> Self {
        mantissa as f32
    }

    #[inline]
    fn exact_power_of_ten(scale: usize) -> Option<Self> {
        scale_table::exact_power_of_ten_f32(scale)
    }

    #[inline]
    fn mantissa_to_wide(mantissa: u32) -> f64 {
        f64::from(mantissa)
    }

    #[inline]
    fn from_wide(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

//! Arithmetic capability consumed by the aggregators.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Numeric value used for prices, volumes and thresholds.
///
/// Aggregation logic is written against this trait only, so the same code
/// runs over any backend that supplies these operations. The numeric family
/// is fixed by the type parameter: a `Bar<f32>` cannot be combined with a
/// `Bar<f64>` without an explicit conversion by the caller.
///
/// A NaN value is treated as the "missing" sentinel.
pub trait Numeric:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Additive identity.
    fn zero() -> Self;

    /// Converts a small integer into this family.
    fn from_u32(value: u32) -> Self;

    /// Returns true for the missing-value sentinel.
    fn is_nan(self) -> bool;

    /// Returns true when the value is neither NaN nor infinite.
    fn is_finite(self) -> bool;

    /// Smaller of two values.
    #[must_use]
    fn min(self, other: Self) -> Self;

    /// Larger of two values.
    #[must_use]
    fn max(self, other: Self) -> Self;

    /// Absolute value.
    #[must_use]
    fn abs(self) -> Self;

    /// Whole part of a finite, non-negative value.
    ///
    /// Returns `None` for negative, non-finite or out-of-range values.
    fn floor_to_usize(self) -> Option<usize>;
}

macro_rules! impl_numeric_for_float {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn from_u32(value: u32) -> Self {
                    value as Self
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }

                #[inline]
                fn min(self, other: Self) -> Self {
                    <$ty>::min(self, other)
                }

                #[inline]
                fn max(self, other: Self) -> Self {
                    <$ty>::max(self, other)
                }

                #[inline]
                fn abs(self) -> Self {
                    <$ty>::abs(self)
                }

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn floor_to_usize(self) -> Option<usize> {
                    if !<$ty>::is_finite(self) || self < 0.0 {
                        return None;
                    }
                    let whole = self.floor();
                    if whole >= usize::MAX as Self {
                        None
                    } else {
                        Some(whole as usize)
                    }
                }
            }
        )*
    };
}

impl_numeric_for_float!(f32, f64);

/// Exact decimal backend. Never NaN or infinite, so no bar is ever missing.
#[cfg(feature = "decimal")]
impl Numeric for rust_decimal::Decimal {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn from_u32(value: u32) -> Self {
        Self::from(value)
    }

    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    #[inline]
    fn is_finite(self) -> bool {
        true
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }

    #[inline]
    fn abs(self) -> Self {
        Self::abs(&self)
    }

    fn floor_to_usize(self) -> Option<usize> {
        use rust_decimal::prelude::ToPrimitive;

        if self.is_sign_negative() && !self.is_zero() {
            return None;
        }
        self.floor().to_usize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_of_four<N: Numeric>(a: N, b: N, c: N, d: N) -> N {
        (a + b + c + d) / N::from_u32(4)
    }

    #[test]
    fn test_generic_arithmetic() {
        assert_eq!(mean_of_four(1.0_f64, 2.0, 3.0, 4.0), 2.5);
        assert_eq!(mean_of_four(1.0_f32, 2.0, 3.0, 4.0), 2.5);
    }

    #[test]
    fn test_min_max_abs() {
        assert_eq!(Numeric::min(3.0_f64, -1.0), -1.0);
        assert_eq!(Numeric::max(3.0_f32, -1.0), 3.0);
        assert_eq!(Numeric::abs(-2.5_f64), 2.5);
    }

    #[test]
    fn test_nan_and_finite() {
        assert!(Numeric::is_nan(f64::NAN));
        assert!(!Numeric::is_finite(f32::INFINITY));
        assert!(Numeric::is_finite(1.0_f64));
    }

    #[test]
    fn test_floor_to_usize() {
        assert_eq!(2.9_f64.floor_to_usize(), Some(2));
        assert_eq!(0.4_f32.floor_to_usize(), Some(0));
        assert_eq!((-1.0_f64).floor_to_usize(), None);
        assert_eq!(f64::NAN.floor_to_usize(), None);
        assert_eq!(f32::INFINITY.floor_to_usize(), None);
    }

    #[cfg(feature = "decimal")]
    #[test]
    fn test_decimal_backend() {
        use rust_decimal::Decimal;

        let tenth = Decimal::new(1, 1);
        assert_eq!(tenth + tenth + tenth, Decimal::new(3, 1));
        assert_eq!(
            mean_of_four(Decimal::from(12), Decimal::from(15), Decimal::from(11), Decimal::from(13)),
            Decimal::new(1275, 2)
        );
        assert_eq!(Numeric::min(tenth, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(Numeric::abs(-tenth), tenth);
        assert!(!Numeric::is_nan(tenth));
        assert!(Numeric::is_finite(Decimal::MAX));
        assert_eq!(Decimal::new(29, 1).floor_to_usize(), Some(2));
        assert_eq!(Decimal::new(-1, 0).floor_to_usize(), None);
        assert_eq!(Decimal::ZERO.floor_to_usize(), Some(0));
    }
}

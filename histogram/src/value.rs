//! The numeric domain a histogram measures.

use core::fmt::{Debug, Display};

/// A primitive integer type which can be counted by a [`crate::Histogram`].
///
/// The histogram always spans the whole domain of the type, from
/// [`Value::MIN`] to [`Value::MAX`]. Conversions saturate at the edges of the
/// domain rather than wrapping.
pub trait Value: Copy + Ord + Debug + Display + Send + Sync + 'static {
    /// The smallest representable value.
    const MIN: Self;

    /// The largest representable value.
    const MAX: Self;

    /// Truncating conversion from a float, saturating at the domain edges.
    /// `NaN` maps to zero.
    fn from_f64(value: f64) -> Self;

    /// Conversion from a `u64`, saturating at [`Value::MAX`].
    fn saturating_from_u64(value: u64) -> Self;

    /// Addition which saturates at the domain edges.
    fn saturating_add(self, rhs: Self) -> Self;

    /// Lossless widening, used when reporting values in errors.
    fn as_i128(self) -> i128;
}

macro_rules! value {
    ($($t:ty),*) => {
        $(
            impl Value for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    // float to int `as` casts saturate
                    value as $t
                }

                #[inline]
                fn saturating_from_u64(value: u64) -> Self {
                    <$t>::try_from(value).unwrap_or(<$t>::MAX)
                }

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }

                #[inline]
                fn as_i128(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_saturates() {
        assert_eq!(<u8 as Value>::from_f64(300.0), 255);
        assert_eq!(<u8 as Value>::from_f64(-4.0), 0);
        assert_eq!(<i8 as Value>::from_f64(-300.0), i8::MIN);
        assert_eq!(<u64 as Value>::from_f64(f64::INFINITY), u64::MAX);
        assert_eq!(<u32 as Value>::from_f64(f64::NAN), 0);
        assert_eq!(<u32 as Value>::from_f64(10.9), 10);
    }

    #[test]
    fn from_u64_saturates() {
        assert_eq!(<u16 as Value>::saturating_from_u64(70_000), u16::MAX);
        assert_eq!(<i32 as Value>::saturating_from_u64(u64::MAX), i32::MAX);
        assert_eq!(<u64 as Value>::saturating_from_u64(42), 42);
    }

    #[test]
    fn add_saturates() {
        assert_eq!(Value::saturating_add(250_u8, 10), u8::MAX);
        assert_eq!(Value::saturating_add(-120_i8, -10), i8::MIN);
        assert_eq!(Value::saturating_add(1_u64, 2), 3);
    }
}

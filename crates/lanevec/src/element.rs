//! Lane element kinds.
//!
//! Six primitive element kinds can populate a lane: two's-complement
//! integers of 8, 16, 32 and 64 bits and IEEE-754 floats of 32 and 64 bits.
//! [`ElementKind`] names them at runtime; the sealed [`Element`] trait gives
//! the per-lane arithmetic every vector operation is built from.
//!
//! Integer lane arithmetic wraps. Integer shifts reduce their distance
//! modulo the element width, so an 8-bit lane only honors the low three bits
//! of a shift amount.

use core::fmt;
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// Runtime name of a lane element kind.
///
/// # Example
///
/// ```
/// use lanevec::ElementKind;
///
/// assert_eq!(ElementKind::I16.bits(), 16);
/// assert!(ElementKind::F64.is_float());
/// assert_eq!(ElementKind::I8.name(), "i8");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit IEEE-754 float.
    F32,
    /// 64-bit IEEE-754 float.
    F64,
}

impl ElementKind {
    /// All element kinds, integers first.
    pub const ALL: [Self; 6] = [Self::I8, Self::I16, Self::I32, Self::I64, Self::F32, Self::F64];

    /// Width of one lane in bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::I8 => 8,
            Self::I16 => 16,
            Self::I32 | Self::F32 => 32,
            Self::I64 | Self::F64 => 64,
        }
    }

    /// Width of one lane in bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    /// Returns true for the IEEE-754 kinds.
    #[inline]
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Rust spelling of the element type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lane value widened to the largest type of its numeric domain.
///
/// Value casts between element kinds pass through this type, which keeps
/// every conversion exact up to the final narrowing `as` step.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Scalar {
    /// Any integer lane, sign-extended.
    Int(i64),
    /// Any float lane, widened.
    Float(f64),
}

/// A primitive type that can populate a lane.
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `f32` and `f64` only.
pub trait Element:
    sealed::Sealed
    + bytemuck::Pod
    + PartialEq
    + PartialOrd
    + Default
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Runtime name of this element type.
    const KIND: ElementKind;
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// Identity of a `min` fold: the largest representable value.
    const MIN_IDENTITY: Self;
    /// Identity of a `max` fold: the smallest representable value.
    const MAX_IDENTITY: Self;

    /// Lane addition (wrapping for integers).
    fn lane_add(self, rhs: Self) -> Self;
    /// Lane subtraction (wrapping for integers).
    fn lane_sub(self, rhs: Self) -> Self;
    /// Lane multiplication (wrapping for integers).
    fn lane_mul(self, rhs: Self) -> Self;
    /// Lane division. Integer callers must rule out a zero divisor first.
    fn lane_div(self, rhs: Self) -> Self;
    /// Lane negation (wrapping for integers).
    fn lane_neg(self) -> Self;
    /// Absolute value (wrapping for integers, so `abs(MIN) == MIN`).
    fn lane_abs(self) -> Self;
    /// Smaller of two lanes. Float lanes propagate NaN.
    fn lane_min(self, rhs: Self) -> Self;
    /// Larger of two lanes. Float lanes propagate NaN.
    fn lane_max(self, rhs: Self) -> Self;
    /// Returns true if dividing by this value has no defined result.
    fn is_zero_divisor(self) -> bool;

    /// Widens the lane for a value cast.
    fn to_scalar(self) -> Scalar;
    /// Narrows a widened value with Rust `as` semantics.
    fn from_scalar(value: Scalar) -> Self;
    /// Converts a lane index into a lane value.
    fn from_index(index: usize) -> Self;

    /// Draws a lane value: the full bit range for integers, `[0, 1)` for floats.
    #[cfg(feature = "rand")]
    fn random<R: rand::RngCore + ?Sized>(rng: &mut R) -> Self;
}

/// Integer lanes: bitwise logic and shifts.
pub trait IntElement: Element + Eq + Ord + Hash {
    /// All bits set (`-1`).
    const ALL_ONES: Self;

    /// Bitwise AND.
    fn lane_and(self, rhs: Self) -> Self;
    /// Bitwise OR.
    fn lane_or(self, rhs: Self) -> Self;
    /// Bitwise XOR.
    fn lane_xor(self, rhs: Self) -> Self;
    /// Bitwise complement.
    fn lane_not(self) -> Self;
    /// Left shift by `s mod BITS`.
    fn lane_shl(self, s: i32) -> Self;
    /// Logical (zero-filling) right shift by `s mod BITS`.
    fn lane_shr(self, s: i32) -> Self;
    /// Arithmetic (sign-filling) right shift by `s mod BITS`.
    fn lane_sar(self, s: i32) -> Self;
    /// Interprets the lane as a shift distance. Only the low bits matter.
    fn to_shift(self) -> i32;
}

/// Float lanes: the elementary math functions.
pub trait FloatElement: Element {
    /// Not a number.
    const NAN: Self;

    /// Returns true if the lane holds NaN.
    fn lane_is_nan(self) -> bool;
    /// Square root.
    fn lane_sqrt(self) -> Self;
    /// Fused multiply-add `self * a + b` with a single rounding.
    fn lane_fma(self, a: Self, b: Self) -> Self;
    /// `e^self`.
    fn lane_exp(self) -> Self;
    /// Natural logarithm.
    fn lane_ln(self) -> Self;
    /// Sine.
    fn lane_sin(self) -> Self;
    /// Cosine.
    fn lane_cos(self) -> Self;
    /// Tangent.
    fn lane_tan(self) -> Self;
    /// `self^rhs`.
    fn lane_pow(self, rhs: Self) -> Self;
    /// Four-quadrant arctangent of `self / rhs`.
    fn lane_atan2(self, rhs: Self) -> Self;
    /// `sqrt(self^2 + rhs^2)` without undue overflow.
    fn lane_hypot(self, rhs: Self) -> Self;
}

// -----------------------------------------------------------------------------
// Integer implementations
// -----------------------------------------------------------------------------

macro_rules! impl_int_element {
    ($ty:ty, $unsigned:ty, $kind:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN_IDENTITY: Self = <$ty>::MAX;
            const MAX_IDENTITY: Self = <$ty>::MIN;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }
            #[inline(always)]
            fn lane_neg(self) -> Self {
                self.wrapping_neg()
            }
            #[inline(always)]
            fn lane_abs(self) -> Self {
                self.wrapping_abs()
            }
            #[inline(always)]
            fn lane_min(self, rhs: Self) -> Self {
                Ord::min(self, rhs)
            }
            #[inline(always)]
            fn lane_max(self, rhs: Self) -> Self {
                Ord::max(self, rhs)
            }
            #[inline(always)]
            fn is_zero_divisor(self) -> bool {
                self == 0
            }
            #[inline(always)]
            fn to_scalar(self) -> Scalar {
                Scalar::Int(self as i64)
            }
            #[inline(always)]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Int(v) => v as $ty,
                    Scalar::Float(v) => v as $ty,
                }
            }
            #[inline(always)]
            fn from_index(index: usize) -> Self {
                index as $ty
            }
            #[cfg(feature = "rand")]
            fn random<R: rand::RngCore + ?Sized>(rng: &mut R) -> Self {
                rng.next_u64() as $ty
            }
        }

        impl IntElement for $ty {
            const ALL_ONES: Self = -1;

            #[inline(always)]
            fn lane_and(self, rhs: Self) -> Self {
                self & rhs
            }
            #[inline(always)]
            fn lane_or(self, rhs: Self) -> Self {
                self | rhs
            }
            #[inline(always)]
            fn lane_xor(self, rhs: Self) -> Self {
                self ^ rhs
            }
            #[inline(always)]
            fn lane_not(self) -> Self {
                !self
            }
            // `wrapping_sh*` masks the distance to `BITS - 1`, which is the
            // modulo reduction for negative distances too.
            #[inline(always)]
            fn lane_shl(self, s: i32) -> Self {
                self.wrapping_shl(s as u32)
            }
            #[inline(always)]
            fn lane_shr(self, s: i32) -> Self {
                (self as $unsigned).wrapping_shr(s as u32) as $ty
            }
            #[inline(always)]
            fn lane_sar(self, s: i32) -> Self {
                self.wrapping_shr(s as u32)
            }
            #[inline(always)]
            fn to_shift(self) -> i32 {
                self as i32
            }
        }
    };
}

impl_int_element!(i8, u8, I8);
impl_int_element!(i16, u16, I16);
impl_int_element!(i32, u32, I32);
impl_int_element!(i64, u64, I64);

// -----------------------------------------------------------------------------
// Float implementations
// -----------------------------------------------------------------------------

macro_rules! impl_float_element {
    ($ty:ident, $kind:ident, $random:expr) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MIN_IDENTITY: Self = <$ty>::INFINITY;
            const MAX_IDENTITY: Self = <$ty>::NEG_INFINITY;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }
            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }
            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }
            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }
            #[inline(always)]
            fn lane_neg(self) -> Self {
                -self
            }
            #[inline(always)]
            fn lane_abs(self) -> Self {
                self.abs()
            }
            // -0.0 orders below +0.0 here, unlike `PartialOrd`.
            #[inline(always)]
            fn lane_min(self, rhs: Self) -> Self {
                if self.is_nan() || rhs.is_nan() {
                    <$ty>::NAN
                } else if self < rhs || (self == rhs && self.is_sign_negative()) {
                    self
                } else {
                    rhs
                }
            }
            #[inline(always)]
            fn lane_max(self, rhs: Self) -> Self {
                if self.is_nan() || rhs.is_nan() {
                    <$ty>::NAN
                } else if self > rhs || (self == rhs && self.is_sign_positive()) {
                    self
                } else {
                    rhs
                }
            }
            #[inline(always)]
            fn is_zero_divisor(self) -> bool {
                false
            }
            #[inline(always)]
            fn to_scalar(self) -> Scalar {
                Scalar::Float(self as f64)
            }
            #[inline(always)]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Int(v) => v as $ty,
                    Scalar::Float(v) => v as $ty,
                }
            }
            #[inline(always)]
            fn from_index(index: usize) -> Self {
                index as $ty
            }
            #[cfg(feature = "rand")]
            fn random<R: rand::RngCore + ?Sized>(rng: &mut R) -> Self {
                let draw: fn(&mut R) -> $ty = $random;
                draw(rng)
            }
        }

        impl FloatElement for $ty {
            const NAN: Self = <$ty>::NAN;

            #[inline(always)]
            fn lane_is_nan(self) -> bool {
                self.is_nan()
            }
            #[inline(always)]
            fn lane_sqrt(self) -> Self {
                self.sqrt()
            }
            #[inline(always)]
            fn lane_fma(self, a: Self, b: Self) -> Self {
                self.mul_add(a, b)
            }
            #[inline(always)]
            fn lane_exp(self) -> Self {
                self.exp()
            }
            #[inline(always)]
            fn lane_ln(self) -> Self {
                self.ln()
            }
            #[inline(always)]
            fn lane_sin(self) -> Self {
                self.sin()
            }
            #[inline(always)]
            fn lane_cos(self) -> Self {
                self.cos()
            }
            #[inline(always)]
            fn lane_tan(self) -> Self {
                self.tan()
            }
            #[inline(always)]
            fn lane_pow(self, rhs: Self) -> Self {
                self.powf(rhs)
            }
            #[inline(always)]
            fn lane_atan2(self, rhs: Self) -> Self {
                self.atan2(rhs)
            }
            #[inline(always)]
            fn lane_hypot(self, rhs: Self) -> Self {
                self.hypot(rhs)
            }
        }
    };
}

// 24 and 53 are the mantissa widths (implicit bit included).
impl_float_element!(f32, F32, |rng| (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32);
impl_float_element!(f64, F64, |rng| (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_widths() {
        assert_eq!(<i8 as Element>::KIND.bits(), 8);
        assert_eq!(<i64 as Element>::KIND.bytes(), 8);
        assert_eq!(<f32 as Element>::KIND, ElementKind::F32);
        assert!(!ElementKind::I32.is_float());
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(i8::MAX.lane_add(1), i8::MIN);
        assert_eq!(i32::MIN.lane_div(-1), i32::MIN);
        assert_eq!(i16::MIN.lane_abs(), i16::MIN);
        assert_eq!(i64::MIN.lane_neg(), i64::MIN);
    }

    #[test]
    fn test_shift_distance_wraps() {
        assert_eq!(1i8.lane_shl(8), 1);
        assert_eq!(1i8.lane_shl(9), 2);
        assert_eq!(1i32.lane_shl(-1), i32::MIN);
        assert_eq!((-1i8).lane_shr(7), 1);
        assert_eq!((-128i8).lane_sar(7), -1);
        assert_eq!((-1i64).lane_shr(64), -1);
    }

    #[test]
    fn test_float_min_max_nan_and_zero() {
        assert!(1.0f32.lane_min(f32::NAN).is_nan());
        assert!(f64::NAN.lane_max(1.0).is_nan());
        assert!(0.0f32.lane_min(-0.0).is_sign_negative());
        assert!((-0.0f64).lane_max(0.0).is_sign_positive());
        assert_eq!(2.0f32.lane_min(3.0), 2.0);
    }

    #[test]
    fn test_scalar_cast_semantics() {
        assert_eq!(i8::from_scalar(300i32.to_scalar()), 44);
        assert_eq!(i32::from_scalar(f32::NAN.to_scalar()), 0);
        assert_eq!(i16::from_scalar(1e9f64.to_scalar()), i16::MAX);
        assert_eq!(f32::from_scalar(7i64.to_scalar()), 7.0);
        assert_eq!(i64::from_scalar(i64::MAX.to_scalar()), i64::MAX);
    }

    #[test]
    fn test_zero_divisor() {
        assert!(0i32.is_zero_divisor());
        assert!(!0.0f64.is_zero_divisor());
    }
}

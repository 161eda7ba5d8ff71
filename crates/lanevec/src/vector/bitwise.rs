//! Bitwise logic, shifts and rotates on integer lanes.
//!
//! Shift distances are reduced modulo the element width before use, so
//! `shift_left(s)` equals `shift_left(s mod BITS)` for every `s`, negative
//! distances included. Rotates are built from two shifts and an OR and rely
//! on that reduction for `s == 0` and out-of-range `s`.

use super::{Operand, Vector};
use crate::element::IntElement;
use crate::error::Result;
use crate::mask::Mask;

macro_rules! binary_bit_ops {
    ($($name:ident, $masked:ident, $doc:literal, |$a:ident, $b:ident| $body:expr;)*) => {
        $(
            #[doc = $doc]
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
            /// if `rhs` is a vector of another species.
            #[inline]
            pub fn $name(self, rhs: impl Into<Operand<E>>) -> Result<Self> {
                let rhs = rhs.into().into_vector(self.species)?;
                self.b_op(rhs, |_, $a: E, $b: E| $body)
            }

            #[doc = $doc]
            /// Applied on set lanes of `mask` only.
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
            /// if `rhs` or `mask` belongs to another species.
            #[inline]
            pub fn $masked(self, rhs: impl Into<Operand<E>>, mask: Mask<E>) -> Result<Self> {
                let rhs = rhs.into().into_vector(self.species)?;
                self.b_op_masked(rhs, mask, |_, $a: E, $b: E| $body)
            }
        )*
    };
}

// Generates the scalar, masked, per-lane and masked per-lane forms of one
// shift direction from its lane function.
macro_rules! shift_ops {
    ($($name:ident, $masked:ident, $by:ident, $by_masked:ident, $lane:path, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            #[inline]
            #[must_use]
            pub fn $name(self, s: i32) -> Self {
                self.u_op(|_, a| $lane(a, s))
            }

            #[doc = $doc]
            /// Applied on set lanes of `mask` only.
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
            /// if `mask` belongs to another species.
            #[inline]
            pub fn $masked(self, s: i32, mask: Mask<E>) -> Result<Self> {
                self.u_op_masked(mask, |_, a| $lane(a, s))
            }

            #[doc = $doc]
            /// Lane `i` is shifted by `amounts[i]`.
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
            /// if `amounts` belongs to another species.
            #[inline]
            pub fn $by(self, amounts: Self) -> Result<Self> {
                self.b_op(amounts, |_, a, s| $lane(a, s.to_shift()))
            }

            #[doc = $doc]
            /// Lane `i` is shifted by `amounts[i]` where `mask[i]` is set.
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
            /// if `amounts` or `mask` belongs to another species.
            #[inline]
            pub fn $by_masked(self, amounts: Self, mask: Mask<E>) -> Result<Self> {
                self.b_op_masked(amounts, mask, |_, a, s| $lane(a, s.to_shift()))
            }
        )*
    };
}

impl<E: IntElement> Vector<E> {
    binary_bit_ops! {
        and, and_masked, "Lane-wise bitwise AND.", |a, b| a.lane_and(b);
        or, or_masked, "Lane-wise bitwise OR.", |a, b| a.lane_or(b);
        xor, xor_masked, "Lane-wise bitwise XOR.", |a, b| a.lane_xor(b);
        and_not, and_not_masked, "Lane-wise `self & !rhs`.", |a, b| a.lane_and(b.lane_not());
    }

    /// Lane-wise bitwise complement.
    #[inline]
    #[must_use]
    pub fn not(self) -> Self {
        self.u_op(|_, a| a.lane_not())
    }

    /// Complements set lanes of `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `mask` belongs to another species.
    pub fn not_masked(self, mask: Mask<E>) -> Result<Self> {
        self.u_op_masked(mask, |_, a| a.lane_not())
    }

    shift_ops! {
        shift_left, shift_left_masked, shift_left_by, shift_left_by_masked,
            IntElement::lane_shl, "Left shift, distance taken modulo the lane width.";
        shift_right, shift_right_masked, shift_right_by, shift_right_by_masked,
            IntElement::lane_shr, "Logical right shift, distance taken modulo the lane width.";
        shift_right_arithmetic, shift_right_arithmetic_masked,
            shift_right_arithmetic_by, shift_right_arithmetic_by_masked,
            IntElement::lane_sar, "Arithmetic right shift, distance taken modulo the lane width.";
    }

    // -------------------------------------------------------------------------
    // Rotates
    // -------------------------------------------------------------------------

    /// Rotates every lane left by `s` bits: `shift_left(s) | shift_right(-s)`.
    #[must_use]
    pub fn rotate_left(self, s: i32) -> Self {
        self.u_op(|_, a| rotl(a, s))
    }

    /// Rotates every lane right by `s` bits: `shift_right(s) | shift_left(-s)`.
    #[must_use]
    pub fn rotate_right(self, s: i32) -> Self {
        self.rotate_left(s.wrapping_neg())
    }

    /// Rotates set lanes of `mask` left by `s` bits.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `mask` belongs to another species.
    pub fn rotate_left_masked(self, s: i32, mask: Mask<E>) -> Result<Self> {
        self.u_op_masked(mask, |_, a| rotl(a, s))
    }

    /// Rotates set lanes of `mask` right by `s` bits.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `mask` belongs to another species.
    pub fn rotate_right_masked(self, s: i32, mask: Mask<E>) -> Result<Self> {
        self.u_op_masked(mask, |_, a| rotl(a, s.wrapping_neg()))
    }

    /// Rotates lane `i` left by `amounts[i]` bits.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `amounts` belongs to another species.
    pub fn rotate_left_by(self, amounts: Self) -> Result<Self> {
        self.b_op(amounts, |_, a, s| rotl(a, s.to_shift()))
    }

    /// Rotates lane `i` right by `amounts[i]` bits.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `amounts` belongs to another species.
    pub fn rotate_right_by(self, amounts: Self) -> Result<Self> {
        self.b_op(amounts, |_, a, s| rotl(a, s.to_shift().wrapping_neg()))
    }
}

#[inline(always)]
fn rotl<E: IntElement>(a: E, s: i32) -> E {
    a.lane_shl(s).lane_or(a.lane_shr(s.wrapping_neg()))
}

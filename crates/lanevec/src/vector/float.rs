//! Elementary math on float lanes.

use super::{Operand, Vector};
use crate::element::FloatElement;
use crate::error::Result;
use crate::mask::Mask;

macro_rules! unary_math {
    ($($name:ident, $masked:ident, $lane:ident, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            #[inline]
            #[must_use]
            pub fn $name(self) -> Self {
                self.u_op(|_, a| a.$lane())
            }

            #[doc = $doc]
            /// Applied on set lanes of `mask` only.
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
            /// if `mask` belongs to another species.
            #[inline]
            pub fn $masked(self, mask: Mask<E>) -> Result<Self> {
                self.u_op_masked(mask, |_, a| a.$lane())
            }
        )*
    };
}

macro_rules! binary_math {
    ($($name:ident, $masked:ident, $lane:ident, $doc:literal;)*) => {
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
                self.b_op(rhs, |_, a, b| a.$lane(b))
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
                self.b_op_masked(rhs, mask, |_, a, b| a.$lane(b))
            }
        )*
    };
}

impl<E: FloatElement> Vector<E> {
    unary_math! {
        sqrt, sqrt_masked, lane_sqrt, "Lane-wise square root.";
        exp, exp_masked, lane_exp, "Lane-wise `e^x`.";
        ln, ln_masked, lane_ln, "Lane-wise natural logarithm.";
        sin, sin_masked, lane_sin, "Lane-wise sine.";
        cos, cos_masked, lane_cos, "Lane-wise cosine.";
        tan, tan_masked, lane_tan, "Lane-wise tangent.";
    }

    binary_math! {
        pow, pow_masked, lane_pow, "Lane-wise `self^rhs`.";
        atan2, atan2_masked, lane_atan2, "Lane-wise four-quadrant arctangent of `self / rhs`.";
        hypot, hypot_masked, lane_hypot, "Lane-wise `sqrt(self^2 + rhs^2)`.";
    }

    /// Fused multiply-add: lane `i` is `self[i] * a[i] + b[i]` with a single
    /// rounding.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `a` or `b` is a vector of another species.
    pub fn fma(self, a: impl Into<Operand<E>>, b: impl Into<Operand<E>>) -> Result<Self> {
        let a = a.into().into_vector(self.species)?;
        let b = b.into().into_vector(self.species)?;
        self.t_op(a, b, |_, x, y, z| x.lane_fma(y, z))
    }

    /// Fused multiply-add on set lanes of `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `a`, `b` or `mask` belongs to another species.
    pub fn fma_masked(
        self,
        a: impl Into<Operand<E>>,
        b: impl Into<Operand<E>>,
        mask: Mask<E>,
    ) -> Result<Self> {
        let a = a.into().into_vector(self.species)?;
        let b = b.into().into_vector(self.species)?;
        self.t_op_masked(a, b, mask, |_, x, y, z| x.lane_fma(y, z))
    }

    /// The mask of lanes holding NaN.
    #[must_use]
    pub fn is_nan(&self) -> Mask<E> {
        let lanes = self.as_slice();
        Mask::from_fn(self.species, |i| lanes[i].lane_is_nan())
    }
}

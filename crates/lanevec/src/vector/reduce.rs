//! Cross-lane reductions.
//!
//! Each reduction is an [`r_op`](Vector::r_op) fold seeded with the
//! operation's identity, and its masked form substitutes that identity on
//! unset lanes:
//!
//! | Reduction | Identity |
//! |-----------|----------|
//! | `add_lanes` | `0` |
//! | `mul_lanes` | `1` |
//! | `min_lanes` | `MAX` (`+inf` for floats) |
//! | `max_lanes` | `MIN` (`-inf` for floats) |
//! | `and_lanes` | all ones |
//! | `or_lanes`, `xor_lanes` | `0` |
//!
//! Float sums and products are only guaranteed to match some association of
//! the fold; compare them with a tolerance.

use super::Vector;
use crate::element::{Element, IntElement};
use crate::error::Result;
use crate::mask::Mask;

macro_rules! reductions {
    ($($name:ident, $masked:ident, $identity:expr, $lane:expr, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            #[inline]
            #[must_use]
            pub fn $name(self) -> E {
                self.r_op($identity, $lane)
            }

            #[doc = $doc]
            /// Unset lanes of `mask` contribute the identity.
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
            /// if `mask` belongs to another species.
            #[inline]
            pub fn $masked(self, mask: Mask<E>) -> Result<E> {
                self.r_op_masked($identity, mask, $lane)
            }
        )*
    };
}

impl<E: Element> Vector<E> {
    reductions! {
        add_lanes, add_lanes_masked, E::ZERO, E::lane_add, "Sum of all lanes.";
        mul_lanes, mul_lanes_masked, E::ONE, E::lane_mul, "Product of all lanes.";
        min_lanes, min_lanes_masked, E::MIN_IDENTITY, E::lane_min, "Smallest lane.";
        max_lanes, max_lanes_masked, E::MAX_IDENTITY, E::lane_max, "Largest lane.";
    }
}

impl<E: IntElement> Vector<E> {
    reductions! {
        and_lanes, and_lanes_masked, E::ALL_ONES, E::lane_and, "Bitwise AND of all lanes.";
        or_lanes, or_lanes_masked, E::ZERO, E::lane_or, "Bitwise OR of all lanes.";
        xor_lanes, xor_lanes_masked, E::ZERO, E::lane_xor, "Bitwise XOR of all lanes.";
    }
}

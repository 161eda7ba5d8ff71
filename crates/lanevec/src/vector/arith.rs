//! Lane arithmetic and comparisons.
//!
//! Binary methods take their right operand as `impl Into<Operand<E>>`, so
//! one method covers both the vector-vector and the vector-scalar form.
//! A scalar is broadcast to the receiver's species before the lane map runs.

use super::{Operand, Vector};
use crate::element::Element;
use crate::error::{LaneError, Result};
use crate::mask::Mask;

/// Lane-wise comparison operators.
///
/// Float lanes follow IEEE-754 ordering: every comparison against NaN is
/// false except [`Comparison::Ne`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Comparison {
    /// `a == b`
    Eq,
    /// `a != b`
    Ne,
    /// `a < b`
    Lt,
    /// `a <= b`
    Le,
    /// `a > b`
    Gt,
    /// `a >= b`
    Ge,
}

impl Comparison {
    /// Applies the comparison to one pair of lanes.
    #[inline(always)]
    #[must_use]
    pub fn test<E: Element>(self, a: E, b: E) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => a < b,
            Self::Le => a <= b,
            Self::Gt => a > b,
            Self::Ge => a >= b,
        }
    }
}

// Generates a binary lane method and its masked form from an `Element`
// lane function.
macro_rules! binary_lane_ops {
    ($($name:ident, $masked:ident, $lane:ident, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`] if `rhs` is a vector of
            /// another species.
            #[inline]
            pub fn $name(self, rhs: impl Into<Operand<E>>) -> Result<Self> {
                let rhs = rhs.into().into_vector(self.species)?;
                self.b_op(rhs, |_, a, b| a.$lane(b))
            }

            #[doc = $doc]
            /// Applied on set lanes of `mask` only; other lanes keep `self`.
            ///
            /// # Errors
            ///
            /// Returns [`LaneError::SpeciesMismatch`] if `rhs` or `mask`
            /// belongs to another species.
            #[inline]
            pub fn $masked(self, rhs: impl Into<Operand<E>>, mask: Mask<E>) -> Result<Self> {
                let rhs = rhs.into().into_vector(self.species)?;
                self.b_op_masked(rhs, mask, |_, a, b| a.$lane(b))
            }
        )*
    };
}

impl<E: Element> Vector<E> {
    binary_lane_ops! {
        add, add_masked, lane_add, "Lane-wise sum (wrapping for integers).";
        sub, sub_masked, lane_sub, "Lane-wise difference (wrapping for integers).";
        mul, mul_masked, lane_mul, "Lane-wise product (wrapping for integers).";
        min, min_masked, lane_min, "Lane-wise minimum. Float lanes propagate NaN.";
        max, max_masked, lane_max, "Lane-wise maximum. Float lanes propagate NaN.";
    }

    /// Lane-wise quotient. Integer division truncates toward zero and wraps
    /// on `MIN / -1`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::DivideByZero`] for the first integer lane whose
    /// divisor is zero, or [`LaneError::SpeciesMismatch`] if `rhs` is a
    /// vector of another species.
    pub fn div(self, rhs: impl Into<Operand<E>>) -> Result<Self> {
        let rhs = rhs.into().into_vector(self.species)?;
        check_divisors(rhs, |_| true)?;
        self.b_op(rhs, |_, a, b| a.lane_div(b))
    }

    /// Lane-wise quotient on set lanes of `mask`. A zero divisor on an unset
    /// lane is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::DivideByZero`] for the first set integer lane
    /// whose divisor is zero, or [`LaneError::SpeciesMismatch`] if `rhs` or
    /// `mask` belongs to another species.
    pub fn div_masked(self, rhs: impl Into<Operand<E>>, mask: Mask<E>) -> Result<Self> {
        let rhs = rhs.into().into_vector(self.species)?;
        self.species.check_same(mask.species())?;
        check_divisors(rhs, |i| mask.test(i))?;
        self.b_op_masked(rhs, mask, |_, a, b| a.lane_div(b))
    }

    /// Lane-wise negation (wrapping for integers).
    #[inline]
    #[must_use]
    pub fn neg(self) -> Self {
        self.u_op(|_, a| a.lane_neg())
    }

    /// Negates set lanes of `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`] if `mask` belongs to another
    /// species.
    pub fn neg_masked(self, mask: Mask<E>) -> Result<Self> {
        self.u_op_masked(mask, |_, a| a.lane_neg())
    }

    /// Lane-wise absolute value. For integers `abs(MIN) == MIN`.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        self.u_op(|_, a| a.lane_abs())
    }

    /// Absolute value of set lanes of `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`] if `mask` belongs to another
    /// species.
    pub fn abs_masked(self, mask: Mask<E>) -> Result<Self> {
        self.u_op_masked(mask, |_, a| a.lane_abs())
    }

    // -------------------------------------------------------------------------
    // Comparisons
    // -------------------------------------------------------------------------

    /// Lane-wise comparison producing a mask.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`] if `rhs` is a vector of another
    /// species.
    pub fn compare(self, op: Comparison, rhs: impl Into<Operand<E>>) -> Result<Mask<E>> {
        let rhs = rhs.into().into_vector(self.species)?;
        self.b_test(rhs, |_, a, b| op.test(a, b))
    }

    /// Lane-wise comparison restricted to set lanes of `mask`; unset lanes
    /// compare false.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`] if `rhs` or `mask` belongs to
    /// another species.
    pub fn compare_masked(
        self,
        op: Comparison,
        rhs: impl Into<Operand<E>>,
        mask: Mask<E>,
    ) -> Result<Mask<E>> {
        let rhs = rhs.into().into_vector(self.species)?;
        self.b_test_masked(rhs, mask, |_, a, b| op.test(a, b))
    }

    /// Lanes equal to `rhs`. See [`compare`](Self::compare).
    ///
    /// # Errors
    ///
    /// As [`compare`](Self::compare).
    pub fn equal(self, rhs: impl Into<Operand<E>>) -> Result<Mask<E>> {
        self.compare(Comparison::Eq, rhs)
    }

    /// Lanes not equal to `rhs`.
    ///
    /// # Errors
    ///
    /// As [`compare`](Self::compare).
    pub fn not_equal(self, rhs: impl Into<Operand<E>>) -> Result<Mask<E>> {
        self.compare(Comparison::Ne, rhs)
    }

    /// Lanes less than `rhs`.
    ///
    /// # Errors
    ///
    /// As [`compare`](Self::compare).
    pub fn less_than(self, rhs: impl Into<Operand<E>>) -> Result<Mask<E>> {
        self.compare(Comparison::Lt, rhs)
    }

    /// Lanes less than or equal to `rhs`.
    ///
    /// # Errors
    ///
    /// As [`compare`](Self::compare).
    pub fn less_or_equal(self, rhs: impl Into<Operand<E>>) -> Result<Mask<E>> {
        self.compare(Comparison::Le, rhs)
    }

    /// Lanes greater than `rhs`.
    ///
    /// # Errors
    ///
    /// As [`compare`](Self::compare).
    pub fn greater_than(self, rhs: impl Into<Operand<E>>) -> Result<Mask<E>> {
        self.compare(Comparison::Gt, rhs)
    }

    /// Lanes greater than or equal to `rhs`.
    ///
    /// # Errors
    ///
    /// As [`compare`](Self::compare).
    pub fn greater_or_equal(self, rhs: impl Into<Operand<E>>) -> Result<Mask<E>> {
        self.compare(Comparison::Ge, rhs)
    }
}

fn check_divisors<E: Element>(divisors: Vector<E>, active: impl Fn(usize) -> bool) -> Result<()> {
    match divisors
        .as_slice()
        .iter()
        .enumerate()
        .find(|&(i, d)| active(i) && d.is_zero_divisor())
    {
        Some((lane, _)) => Err(LaneError::DivideByZero { lane }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::species::Species;

    fn s() -> Species<i32> {
        Species::new(Shape::S128)
    }

    fn v(lanes: [i32; 4]) -> Vector<i32> {
        Vector::from_lanes(s(), &lanes).unwrap()
    }

    #[test]
    fn test_vector_and_scalar_operands() {
        let a = v([1, 2, 3, 4]);
        let b = v([10, 20, 30, 40]);
        assert_eq!(a.add(b).unwrap().as_slice(), &[11, 22, 33, 44]);
        assert_eq!(a.add(10).unwrap().as_slice(), &[11, 12, 13, 14]);
        assert_eq!(b.sub(&a).unwrap().as_slice(), &[9, 18, 27, 36]);
        assert_eq!(a.mul(a).unwrap().as_slice(), &[1, 4, 9, 16]);
        assert_eq!(a.min(2).unwrap().as_slice(), &[1, 2, 2, 2]);
        assert_eq!(a.max(3).unwrap().as_slice(), &[3, 3, 3, 4]);
    }

    #[test]
    fn test_masked_arithmetic() {
        let a = v([1, 2, 3, 4]);
        let m = s().mask_from_fn(|i| i % 2 == 0);
        assert_eq!(a.add_masked(10, m).unwrap().as_slice(), &[11, 2, 13, 4]);
        assert_eq!(a.mul_masked(a, m).unwrap().as_slice(), &[1, 2, 9, 4]);
        assert_eq!(a.neg_masked(m).unwrap().as_slice(), &[-1, 2, -3, 4]);
    }

    #[test]
    fn test_integer_wraps() {
        let s8 = Species::<i8>::new(Shape::S64);
        let a = Vector::broadcast(s8, i8::MAX);
        assert!(a.add(1i8).unwrap().as_slice().iter().all(|&x| x == i8::MIN));
        assert_eq!(Vector::broadcast(s8, i8::MIN).abs().lane(0), Ok(i8::MIN));
    }

    #[test]
    fn test_div_by_zero() {
        let a = v([10, 20, 30, 40]);
        let d = v([2, 0, 5, 0]);
        assert_eq!(a.div(d), Err(LaneError::DivideByZero { lane: 1 }));
        assert_eq!(a.div(0), Err(LaneError::DivideByZero { lane: 0 }));
        assert_eq!(a.div(-3).unwrap().as_slice(), &[-3, -6, -10, -13]);

        // Zero divisors on unset lanes are not an error.
        let m = s().mask_from_fn(|i| i % 2 == 0);
        assert_eq!(a.div_masked(d, m).unwrap().as_slice(), &[5, 20, 6, 40]);
        let m = s().mask_from_fn(|i| i == 3);
        assert_eq!(a.div_masked(d, m), Err(LaneError::DivideByZero { lane: 3 }));
    }

    #[test]
    fn test_float_div_by_zero_is_ieee() {
        let f = Species::<f64>::new(Shape::S128);
        let r = Vector::from_lanes(f, &[1.0, -1.0]).unwrap().div(0.0).unwrap();
        assert_eq!(r.as_slice(), &[f64::INFINITY, f64::NEG_INFINITY]);
    }

    #[test]
    fn test_comparisons() {
        let a = v([1, 2, 3, 4]);
        assert_eq!(a.equal(3).unwrap().to_vec(), vec![false, false, true, false]);
        assert_eq!(a.not_equal(3).unwrap().to_vec(), vec![true, true, false, true]);
        assert_eq!(a.less_than(3).unwrap().true_count(), 2);
        assert_eq!(a.less_or_equal(3).unwrap().true_count(), 3);
        assert_eq!(a.greater_than(3).unwrap().first_true(), Some(3));
        assert_eq!(
            a.greater_or_equal(v([4, 3, 2, 1])).unwrap().to_vec(),
            vec![false, false, true, true]
        );
    }

    #[test]
    fn test_compare_masked() {
        let a = v([1, 2, 3, 4]);
        let m = s().mask_from_fn(|i| i < 2);
        let r = a.compare_masked(Comparison::Gt, 0, m).unwrap();
        assert_eq!(r.to_vec(), vec![true, true, false, false]);
    }

    #[test]
    fn test_nan_comparisons() {
        let f = Species::<f32>::new(Shape::S64);
        let a = Vector::from_lanes(f, &[f32::NAN, 1.0]).unwrap();
        assert_eq!(a.equal(a).unwrap().to_vec(), vec![false, true]);
        assert_eq!(a.not_equal(a).unwrap().to_vec(), vec![true, false]);
        assert!(!a.less_than(f32::INFINITY).unwrap().lane(0).unwrap());
    }

    #[test]
    fn test_binary_ops_follow_b_op() {
        let a = v([7, -2, 3, i32::MAX]);
        let b = v([2, 5, -3, 1]);
        let ops: [(fn(Vector<i32>, Vector<i32>) -> Result<Vector<i32>>, fn(i32, i32) -> i32); 6] = [
            (|x, y| x.add(y), <i32 as Element>::lane_add),
            (|x, y| x.sub(y), <i32 as Element>::lane_sub),
            (|x, y| x.mul(y), <i32 as Element>::lane_mul),
            (|x, y| x.min(y), <i32 as Element>::lane_min),
            (|x, y| x.max(y), <i32 as Element>::lane_max),
            (|x, y| x.div(y), <i32 as Element>::lane_div),
        ];
        let wide = Vector::<i32>::zero(Species::new(Shape::S256));
        for (op, lane) in ops {
            assert_eq!(op(a, b), a.b_op(b, |_, x, y| lane(x, y)));
            assert_eq!(op(a, wide), a.b_op(wide, |_, x, y| lane(x, y)));
        }
    }

    #[test]
    fn test_species_mismatch() {
        let wide = Vector::<i32>::zero(Species::new(Shape::S256));
        assert!(matches!(
            v([1, 2, 3, 4]).add(wide),
            Err(LaneError::SpeciesMismatch { .. })
        ));
        assert!(v([1, 2, 3, 4]).equal(wide).is_err());
    }
}

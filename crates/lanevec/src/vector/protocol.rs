//! The lane operation protocol.
//!
//! Every lane-wise operation in this crate is one of six shapes:
//!
//! | Operation | Lane rule | Result |
//! |-----------|-----------|--------|
//! | [`u_op`](Vector::u_op) | `r[i] = f(i, a[i])` | vector |
//! | [`b_op`](Vector::b_op) | `r[i] = f(i, a[i], b[i])` | vector |
//! | [`t_op`](Vector::t_op) | `r[i] = f(i, a[i], b[i], c[i])` | vector |
//! | [`r_op`](Vector::r_op) | `acc = f(acc, a[i])` from `identity` | scalar |
//! | [`b_test`](Vector::b_test) | `r[i] = f(i, a[i], b[i])` | mask |
//! | [`for_each`](Vector::for_each) | `f(i, a[i])` in increasing `i` | `()` |
//!
//! Operands must share the receiver's species. The masked forms apply the
//! lane rule only where the mask is set:
//!
//! - lane maps pass `a[i]` through unchanged on unset lanes (never zero-fill),
//! - reductions substitute `identity` on unset lanes before folding,
//! - lane predicates report `false` on unset lanes,
//! - `for_each` skips unset lanes.
//!
//! A masked lane map never evaluates `f` on an unset lane.
//!
//! A hardware backend is free to replace any of these loops as long as the
//! result is bit-identical to the per-lane rule.

use super::Vector;
use crate::element::Element;
use crate::error::Result;
use crate::mask::Mask;

impl<E: Element> Vector<E> {
    // -------------------------------------------------------------------------
    // Unary
    // -------------------------------------------------------------------------

    /// Lane map: lane `i` becomes `f(i, self[i])`.
    #[inline]
    #[must_use]
    pub fn u_op(self, f: impl Fn(usize, E) -> E) -> Self {
        let mut out = self;
        for (i, lane) in out.lanes_mut().iter_mut().enumerate() {
            *lane = f(i, *lane);
        }
        out
    }

    /// Masked lane map: `f(i, self[i])` on set lanes, `self[i]` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `mask` belongs to another species.
    #[inline]
    pub fn u_op_masked(self, mask: Mask<E>, f: impl Fn(usize, E) -> E) -> Result<Self> {
        self.species.check_same(mask.species())?;
        Ok(self.u_op(|i, a| if mask.test(i) { f(i, a) } else { a }))
    }

    // -------------------------------------------------------------------------
    // Binary
    // -------------------------------------------------------------------------

    /// Binary lane map: lane `i` becomes `f(i, self[i], other[i])`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` belongs to another species.
    #[inline]
    pub fn b_op(self, other: Self, f: impl Fn(usize, E, E) -> E) -> Result<Self> {
        self.species.check_same(other.species)?;
        let rhs = other.as_slice();
        let mut out = self;
        for (i, lane) in out.lanes_mut().iter_mut().enumerate() {
            *lane = f(i, *lane, rhs[i]);
        }
        Ok(out)
    }

    /// Masked binary lane map: `f(i, self[i], other[i])` on set lanes,
    /// `self[i]` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` or `mask` belongs to another species.
    #[inline]
    pub fn b_op_masked(
        self,
        other: Self,
        mask: Mask<E>,
        f: impl Fn(usize, E, E) -> E,
    ) -> Result<Self> {
        self.species.check_same(mask.species())?;
        self.b_op(other, |i, a, b| if mask.test(i) { f(i, a, b) } else { a })
    }

    // -------------------------------------------------------------------------
    // Ternary
    // -------------------------------------------------------------------------

    /// Ternary lane map: lane `i` becomes `f(i, self[i], b[i], c[i])`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `b` or `c` belongs to another species.
    #[inline]
    pub fn t_op(self, b: Self, c: Self, f: impl Fn(usize, E, E, E) -> E) -> Result<Self> {
        self.species.check_same(b.species)?;
        self.species.check_same(c.species)?;
        let (b, c) = (b.as_slice(), c.as_slice());
        Ok(self.u_op(|i, a| f(i, a, b[i], c[i])))
    }

    /// Masked ternary lane map: `f(i, self[i], b[i], c[i])` on set lanes,
    /// `self[i]` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `b`, `c` or `mask` belongs to another species.
    #[inline]
    pub fn t_op_masked(
        self,
        b: Self,
        c: Self,
        mask: Mask<E>,
        f: impl Fn(usize, E, E, E) -> E,
    ) -> Result<Self> {
        self.species.check_same(mask.species())?;
        self.t_op(b, c, |i, a, b, c| if mask.test(i) { f(i, a, b, c) } else { a })
    }

    // -------------------------------------------------------------------------
    // Reduction
    // -------------------------------------------------------------------------

    /// Folds the lanes left to right starting from `identity`.
    ///
    /// Callers of float reductions must not rely on this association order.
    #[inline]
    #[must_use]
    pub fn r_op(self, identity: E, f: impl Fn(E, E) -> E) -> E {
        self.as_slice().iter().fold(identity, |acc, &lane| f(acc, lane))
    }

    /// Masked fold: unset lanes are replaced by `identity`, then all lanes
    /// are folded.
    ///
    /// `identity` must be neutral for `f` (0 for add, 1 for multiply, ...)
    /// or unset lanes change the result.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `mask` belongs to another species.
    #[inline]
    pub fn r_op_masked(self, identity: E, mask: Mask<E>, f: impl Fn(E, E) -> E) -> Result<E> {
        let seeded = Self::broadcast(self.species, identity).blend(self, mask)?;
        Ok(seeded.r_op(identity, f))
    }

    // -------------------------------------------------------------------------
    // Lane predicates
    // -------------------------------------------------------------------------

    /// Lane predicate: mask lane `i` is `f(i, self[i], other[i])`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` belongs to another species.
    #[inline]
    pub fn b_test(self, other: Self, f: impl Fn(usize, E, E) -> bool) -> Result<Mask<E>> {
        self.species.check_same(other.species)?;
        let (a, b) = (self.as_slice(), other.as_slice());
        Ok(Mask::from_fn(self.species, |i| f(i, a[i], b[i])))
    }

    /// Masked lane predicate: `f(i, self[i], other[i])` on set lanes, `false`
    /// elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` or `mask` belongs to another species.
    #[inline]
    pub fn b_test_masked(
        self,
        other: Self,
        mask: Mask<E>,
        f: impl Fn(usize, E, E) -> bool,
    ) -> Result<Mask<E>> {
        self.species.check_same(mask.species())?;
        self.b_test(other, |i, a, b| mask.test(i) && f(i, a, b))
    }

    // -------------------------------------------------------------------------
    // Ordered visits
    // -------------------------------------------------------------------------

    /// Calls `f(i, self[i])` for every lane in increasing `i`.
    #[inline]
    pub fn for_each(self, mut f: impl FnMut(usize, E)) {
        for (i, &lane) in self.as_slice().iter().enumerate() {
            f(i, lane);
        }
    }

    /// Calls `f(i, self[i])` for every set lane in increasing `i`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `mask` belongs to another species.
    #[inline]
    pub fn for_each_masked(self, mask: Mask<E>, mut f: impl FnMut(usize, E)) -> Result<()> {
        self.species.check_same(mask.species())?;
        self.for_each(|i, a| {
            if mask.test(i) {
                f(i, a);
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LaneError;
    use crate::shape::Shape;
    use crate::species::Species;
    use crate::vector::Vector;
    use std::cell::Cell;

    fn s() -> Species<i32> {
        Species::new(Shape::S128)
    }

    fn v(lanes: [i32; 4]) -> Vector<i32> {
        Vector::from_lanes(s(), &lanes).unwrap()
    }

    #[test]
    fn test_u_op_receives_lane_index() {
        let r = v([5, 5, 5, 5]).u_op(|i, a| a * i as i32);
        assert_eq!(r.as_slice(), &[0, 5, 10, 15]);
    }

    #[test]
    fn test_masked_lane_maps_pass_through() {
        let m = s().mask_from_fn(|i| i % 2 == 1);
        let a = v([1, 2, 3, 4]);
        let b = v([10, 20, 30, 40]);
        assert_eq!(
            a.u_op_masked(m, |_, x| -x).unwrap().as_slice(),
            &[1, -2, 3, -4]
        );
        assert_eq!(
            a.b_op_masked(b, m, |_, x, y| x + y).unwrap().as_slice(),
            &[1, 22, 3, 44]
        );
        assert_eq!(
            a.t_op_masked(b, b, m, |_, x, y, z| x * y + z)
                .unwrap()
                .as_slice(),
            &[1, 60, 3, 200]
        );
    }

    #[test]
    fn test_masked_map_skips_unset_lanes() {
        let calls = Cell::new(0);
        let m = s().mask_from_fn(|i| i == 0);
        let _ = v([1, 2, 3, 4]).u_op_masked(m, |_, x| {
            calls.set(calls.get() + 1);
            x
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_species_mismatch() {
        let other = Vector::<i32>::zero(Species::new(Shape::S256));
        let a = v([1, 2, 3, 4]);
        assert!(matches!(
            a.b_op(other, |_, x, _| x),
            Err(LaneError::SpeciesMismatch { .. })
        ));
        assert!(a.b_test(other, |_, _, _| true).is_err());
        assert!(a.t_op(a, other, |_, x, _, _| x).is_err());
        let wide_mask = Species::<i32>::new(Shape::S256).mask_splat(true);
        assert!(a.u_op_masked(wide_mask, |_, x| x).is_err());
        assert!(a.for_each_masked(wide_mask, |_, _| {}).is_err());
    }

    #[test]
    fn test_r_op_masked_uses_identity() {
        let a = v([2, 3, 4, 5]);
        let m = s().mask_from_fn(|i| i < 2);
        assert_eq!(a.r_op(1, |x, y| x * y), 120);
        assert_eq!(a.r_op_masked(1, m, |x, y| x * y).unwrap(), 6);
        assert_eq!(a.r_op_masked(0, m, |x, y| x + y).unwrap(), 5);
    }

    #[test]
    fn test_b_test_masked() {
        let a = v([1, 2, 3, 4]);
        let m = s().mask_from_fn(|i| i != 2);
        let r = a.b_test_masked(a, m, |_, x, y| x == y).unwrap();
        assert_eq!(r.to_vec(), vec![true, true, false, true]);
    }

    #[test]
    fn test_for_each_order() {
        let mut seen = Vec::new();
        v([9, 8, 7, 6]).for_each(|i, x| seen.push((i, x)));
        assert_eq!(seen, vec![(0, 9), (1, 8), (2, 7), (3, 6)]);

        let mut masked = Vec::new();
        let m = s().mask_from_fn(|i| i % 2 == 0);
        v([9, 8, 7, 6])
            .for_each_masked(m, |i, _| masked.push(i))
            .unwrap();
        assert_eq!(masked, vec![0, 2]);
    }
}

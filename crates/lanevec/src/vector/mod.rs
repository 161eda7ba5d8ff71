//! Immutable lane vectors.
//!
//! A [`Vector<E>`] is a fixed-length sequence of `E` lanes tagged with its
//! [`Species`]. Vectors are `Copy` values; every operation returns a new
//! vector and none mutates its receiver.
//!
//! All lane-wise behavior goes through the operation protocol in
//! [`protocol`]: unary, binary and ternary lane maps, reductions, lane
//! predicates and ordered lane visits, each with a masked form. The
//! arithmetic, bitwise, comparison and reduction methods are thin
//! definitions on top of it.
//!
//! # Example
//!
//! ```
//! use lanevec::{Shape, Species, Vector};
//!
//! let s = Species::<i32>::new(Shape::S128);
//! let v = Vector::from_lanes(s, &[1, 2, 3, 4]).unwrap();
//! let m = s.mask_from_fn(|i| i % 2 == 0);
//!
//! assert_eq!(v.add_masked(10, m).unwrap().as_slice(), &[11, 2, 13, 4]);
//! assert_eq!(v.shift_left(1).as_slice(), &[2, 4, 6, 8]);
//! assert_eq!(v.equal(3).unwrap().to_vec(), vec![false, false, true, false]);
//! ```

mod arith;
mod bitwise;
mod convert;
mod float;
pub mod protocol;
mod reduce;

pub use arith::Comparison;

use crate::element::Element;
use crate::error::{check_index, LaneError, Result};
use crate::mask::Mask;
use crate::register::Register;
use crate::shuffle::Shuffle;
use crate::species::Species;
use core::fmt;

/// An immutable vector of `E` lanes.
#[derive(Clone, Copy)]
pub struct Vector<E: Element> {
    species: Species<E>,
    reg: Register,
}

impl<E: Element> Vector<E> {
    // -------------------------------------------------------------------------
    // Factories
    // -------------------------------------------------------------------------

    /// The all-zero vector.
    #[inline]
    #[must_use]
    pub fn zero(species: Species<E>) -> Self {
        Self {
            species,
            reg: Register::zeroed(),
        }
    }

    /// A vector with every lane set to `value`.
    #[inline]
    #[must_use]
    pub fn broadcast(species: Species<E>, value: E) -> Self {
        Self::from_fn(species, |_| value)
    }

    /// A vector with lane `i` set to `f(i)`, evaluated in lane order.
    #[inline]
    #[must_use]
    pub fn from_fn(species: Species<E>, mut f: impl FnMut(usize) -> E) -> Self {
        let mut out = Self::zero(species);
        for (i, lane) in out.lanes_mut().iter_mut().enumerate() {
            *lane = f(i);
        }
        out
    }

    /// A vector whose lanes are given literally.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneCountMismatch`] unless `lanes` holds exactly
    /// `species.lane_count()` values.
    pub fn from_lanes(species: Species<E>, lanes: &[E]) -> Result<Self> {
        if lanes.len() != species.lane_count() {
            return Err(LaneError::LaneCountMismatch {
                expected: species.lane_count(),
                found: lanes.len(),
            });
        }
        let mut out = Self::zero(species);
        out.lanes_mut().copy_from_slice(lanes);
        Ok(out)
    }

    /// The vector `[0, 1, 2, ...]`.
    #[must_use]
    pub fn iota(species: Species<E>) -> Self {
        Self::from_fn(species, E::from_index)
    }

    /// A vector of independently drawn lanes.
    ///
    /// Integer lanes cover their full range; float lanes fall in `[0, 1)`.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn random<R: rand::RngCore + ?Sized>(species: Species<E>, rng: &mut R) -> Self {
        Self::from_fn(species, |_| E::random(rng))
    }

    #[inline]
    pub(crate) fn from_register(species: Species<E>, reg: Register) -> Self {
        Self { species, reg }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The species of this vector.
    #[inline]
    #[must_use]
    pub fn species(&self) -> Species<E> {
        self.species
    }

    /// Number of lanes.
    #[inline]
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.species.lane_count()
    }

    /// The lanes as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        self.reg.lanes(self.lane_count())
    }

    /// The lanes as an owned `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<E> {
        self.as_slice().to_vec()
    }

    /// Value of lane `i`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] if `i >= lane_count()`.
    pub fn lane(&self, i: usize) -> Result<E> {
        check_index(i, self.lane_count())?;
        Ok(self.as_slice()[i])
    }

    /// A copy of this vector with lane `i` replaced by `value`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] if `i >= lane_count()`.
    pub fn with_lane(self, i: usize, value: E) -> Result<Self> {
        check_index(i, self.lane_count())?;
        let mut out = self;
        out.lanes_mut()[i] = value;
        Ok(out)
    }

    #[inline]
    pub(crate) fn lanes_mut(&mut self) -> &mut [E] {
        let count = self.lane_count();
        self.reg.lanes_mut(count)
    }

    #[inline]
    pub(crate) fn register(&self) -> &Register {
        &self.reg
    }

    // -------------------------------------------------------------------------
    // Lane selection and movement
    // -------------------------------------------------------------------------

    /// Lane-wise selection: lane `i` is `other[i]` where `mask[i]` is set and
    /// `self[i]` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`] if `other` or `mask` belongs to
    /// another species.
    pub fn blend(self, other: impl Into<Operand<E>>, mask: Mask<E>) -> Result<Self> {
        self.species.check_same(mask.species())?;
        let other = other.into().into_vector(self.species)?;
        self.b_op(other, |i, a, b| if mask.test(i) { b } else { a })
    }

    /// Permutes lanes: lane `i` of the result is `self[shuffle[i]]`.
    ///
    /// Shuffle indices are validated when the shuffle is built, so every
    /// index is inside `[0, lane_count)` here.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`] if `shuffle` belongs to another
    /// species.
    pub fn rearrange(self, shuffle: Shuffle<E>) -> Result<Self> {
        self.species.check_same(shuffle.species())?;
        Ok(self.permute(shuffle))
    }

    /// Permutes `self` and `other` by the same shuffle, then selects lanes of
    /// the permuted `other` where `mask` is set.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`] if any operand belongs to
    /// another species.
    pub fn rearrange_blend(self, other: Self, shuffle: Shuffle<E>, mask: Mask<E>) -> Result<Self> {
        self.rearrange(shuffle)?.blend(other.rearrange(shuffle)?, mask)
    }

    /// Rotates lanes so that lane `i` of the result is lane
    /// `(i + step) mod lane_count` of `self`.
    #[must_use]
    pub fn rotate_lanes(self, step: isize) -> Self {
        self.permute(Shuffle::iota(self.species, step))
    }

    fn permute(self, shuffle: Shuffle<E>) -> Self {
        let src = self.as_slice();
        Self::from_fn(self.species, |i| src[shuffle.index(i)])
    }

    /// The mask of lanes whose bits are not all zero.
    ///
    /// This inverts [`Mask::to_vector`].
    #[must_use]
    pub fn to_mask(&self) -> Mask<E> {
        let width = self.species.kind().bytes();
        let bytes = self.reg.bytes(self.species.byte_size());
        Mask::from_fn(self.species, |i| {
            bytes[i * width..(i + 1) * width].iter().any(|&b| b != 0)
        })
    }
}

// =============================================================================
// Operand
// =============================================================================

/// Right-hand operand of a binary lane operation: a vector, or a scalar
/// broadcast to the receiver's species.
#[derive(Clone, Copy, Debug)]
pub enum Operand<E: Element> {
    /// A vector, which must share the receiver's species.
    Lanes(Vector<E>),
    /// A scalar, broadcast to every lane.
    Splat(E),
}

impl<E: Element> Operand<E> {
    /// Materializes the operand as a vector of `species`.
    pub(crate) fn into_vector(self, species: Species<E>) -> Result<Vector<E>> {
        match self {
            Self::Lanes(v) => {
                species.check_same(v.species())?;
                Ok(v)
            }
            Self::Splat(value) => Ok(Vector::broadcast(species, value)),
        }
    }
}

impl<E: Element> From<Vector<E>> for Operand<E> {
    fn from(v: Vector<E>) -> Self {
        Self::Lanes(v)
    }
}

impl<E: Element> From<&Vector<E>> for Operand<E> {
    fn from(v: &Vector<E>) -> Self {
        Self::Lanes(*v)
    }
}

impl<E: Element> From<E> for Operand<E> {
    fn from(value: E) -> Self {
        Self::Splat(value)
    }
}

// =============================================================================
// Trait implementations
// =============================================================================

impl<E: Element> PartialEq for Vector<E> {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species && self.as_slice() == other.as_slice()
    }
}

impl<E: Element> fmt::Debug for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("species", &self.species.id())
            .field("lanes", &self.as_slice())
            .finish()
    }
}

impl<E: Element> fmt::Display for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.species)?;
        for (i, lane) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{lane}")?;
        }
        f.write_str("]")
    }
}

impl<E: Element> From<Vector<E>> for Vec<E> {
    fn from(v: Vector<E>) -> Self {
        v.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn s128() -> Species<i32> {
        Species::new(Shape::S128)
    }

    #[test]
    fn test_factories() {
        assert_eq!(Vector::zero(s128()).as_slice(), &[0, 0, 0, 0]);
        assert_eq!(Vector::broadcast(s128(), 7).as_slice(), &[7, 7, 7, 7]);
        assert_eq!(Vector::iota(s128()).as_slice(), &[0, 1, 2, 3]);
        assert_eq!(
            Vector::from_fn(s128(), |i| (i * i) as i32).as_slice(),
            &[0, 1, 4, 9]
        );
    }

    #[test]
    fn test_from_lanes_requires_exact_count() {
        assert_eq!(
            Vector::from_lanes(s128(), &[1, 2, 3]),
            Err(LaneError::LaneCountMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_lane_access() {
        let v = Vector::iota(s128());
        assert_eq!(v.lane(2), Ok(2));
        assert_eq!(
            v.lane(4),
            Err(LaneError::IndexOutOfRange { index: 4, len: 4 })
        );
        let w = v.with_lane(0, 42).unwrap();
        assert_eq!(w.as_slice(), &[42, 1, 2, 3]);
        // The receiver is unchanged.
        assert_eq!(v.as_slice(), &[0, 1, 2, 3]);
        assert!(v.with_lane(9, 0).is_err());
    }

    #[test]
    fn test_blend_identities() {
        let s = s128();
        let v = Vector::iota(s);
        let w = Vector::broadcast(s, -1);
        let m = s.mask_from_fn(|i| i == 1);
        assert_eq!(v.blend(v, m).unwrap(), v);
        assert_eq!(v.blend(w, s.mask_splat(true)).unwrap(), w);
        assert_eq!(v.blend(w, s.mask_splat(false)).unwrap(), v);
        assert_eq!(v.blend(-1, m).unwrap().as_slice(), &[0, -1, 2, 3]);
    }

    #[test]
    fn test_blend_species_mismatch() {
        let v = Vector::iota(s128());
        let other = Vector::iota(Species::<i32>::new(Shape::S256));
        let m = s128().mask_splat(true);
        assert!(matches!(
            v.blend(other, m),
            Err(LaneError::SpeciesMismatch { .. })
        ));
    }

    #[test]
    fn test_rearrange() {
        let s = s128();
        let v = Vector::from_lanes(s, &[10, 20, 30, 40]).unwrap();
        let rev = Shuffle::from_fn(s, |i| 3 - i).unwrap();
        assert_eq!(v.rearrange(rev).unwrap().as_slice(), &[40, 30, 20, 10]);
        let bcast = Shuffle::from_fn(s, |_| 2).unwrap();
        assert_eq!(v.rearrange(bcast).unwrap().as_slice(), &[30, 30, 30, 30]);
    }

    #[test]
    fn test_rearrange_blend() {
        let s = s128();
        let v = Vector::from_lanes(s, &[1, 2, 3, 4]).unwrap();
        let w = Vector::from_lanes(s, &[5, 6, 7, 8]).unwrap();
        let rev = Shuffle::from_fn(s, |i| 3 - i).unwrap();
        let m = s.mask_from_fn(|i| i >= 2);
        assert_eq!(
            v.rearrange_blend(w, rev, m).unwrap().as_slice(),
            &[4, 3, 6, 5]
        );
    }

    #[test]
    fn test_rotate_lanes() {
        let v = Vector::iota(s128());
        assert_eq!(v.rotate_lanes(1).as_slice(), &[1, 2, 3, 0]);
        assert_eq!(v.rotate_lanes(-1).as_slice(), &[3, 0, 1, 2]);
        assert_eq!(v.rotate_lanes(4), v);
        assert_eq!(v.rotate_lanes(isize::MAX).as_slice(), &[3, 0, 1, 2]);
        assert_eq!(v.rotate_lanes(isize::MIN), v);
    }

    #[test]
    fn test_to_mask() {
        let s = Species::<f32>::new(Shape::S128);
        let v = Vector::from_lanes(s, &[0.0, -0.0, 1.5, 0.0]).unwrap();
        // -0.0 has its sign bit set.
        assert_eq!(v.to_mask().to_vec(), vec![false, true, true, false]);
    }

    #[test]
    fn test_display() {
        let v = Vector::iota(s128());
        assert_eq!(v.to_string(), "i32x4[0, 1, 2, 3]");
    }
}

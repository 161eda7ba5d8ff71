//! Per-lane boolean masks.
//!
//! A [`Mask<E>`] selects lanes of vectors of its species. It is produced by
//! lane predicates (comparisons), by literal construction, or as a constant
//! splat, and is consumed by every masked operation and by
//! [`Vector::blend`].
//!
//! # Example
//!
//! ```
//! use lanevec::{Shape, Species};
//!
//! let s = Species::<i16>::new(Shape::S64);
//! let even = s.mask_from_fn(|i| i % 2 == 0);
//! let low = s.mask_from_fn(|i| i < 2);
//!
//! assert_eq!(even.and(low).unwrap().to_vec(), vec![true, false, false, false]);
//! assert!(even.or(even.not()).unwrap().all_true());
//! assert_eq!(even.to_vector().as_slice(), &[-1, 0, -1, 0]);
//! ```

use crate::element::Element;
use crate::error::{check_index, check_span, Result};
use crate::register::{Register, MAX_LANES};
use crate::species::Species;
use crate::vector::Vector;
use core::fmt;

/// An immutable boolean-per-lane selector.
#[derive(Clone, Copy)]
pub struct Mask<E: Element> {
    species: Species<E>,
    bits: [bool; MAX_LANES],
}

impl<E: Element> Mask<E> {
    // -------------------------------------------------------------------------
    // Factories
    // -------------------------------------------------------------------------

    /// The mask with every lane set to `value`.
    #[inline]
    #[must_use]
    pub fn splat(species: Species<E>, value: bool) -> Self {
        Self::from_fn(species, |_| value)
    }

    /// A mask with lane `i` set to `f(i)`.
    #[inline]
    #[must_use]
    pub fn from_fn(species: Species<E>, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = [false; MAX_LANES];
        for (i, bit) in bits.iter_mut().take(species.lane_count()).enumerate() {
            *bit = f(i);
        }
        Self { species, bits }
    }

    /// Reads `lane_count` booleans from `src` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`](crate::LaneError::IndexOutOfRange)
    /// if `src` holds fewer than `offset + lane_count` values.
    pub fn from_slice(species: Species<E>, src: &[bool], offset: usize) -> Result<Self> {
        check_span(offset, species.lane_count(), src.len())?;
        Ok(Self::from_fn(species, |i| src[offset + i]))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The species this mask selects lanes of.
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

    /// Value of lane `i`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`](crate::LaneError::IndexOutOfRange)
    /// if `i >= lane_count()`.
    pub fn lane(&self, i: usize) -> Result<bool> {
        check_index(i, self.lane_count())?;
        Ok(self.bits[i])
    }

    /// Lane `i` without the range check. Lanes past the species are unset.
    #[inline(always)]
    pub(crate) fn test(&self, i: usize) -> bool {
        self.bits[i]
    }

    /// The lanes as a slice of booleans.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits[..self.lane_count()]
    }

    /// The lanes as an owned `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<bool> {
        self.as_slice().to_vec()
    }

    // -------------------------------------------------------------------------
    // Logic
    // -------------------------------------------------------------------------

    /// Lane-wise complement.
    #[must_use]
    pub fn not(self) -> Self {
        Self::from_fn(self.species, |i| !self.bits[i])
    }

    /// Lane-wise conjunction.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` belongs to another species.
    pub fn and(self, other: Self) -> Result<Self> {
        self.zip(other, |a, b| a && b)
    }

    /// Lane-wise disjunction.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` belongs to another species.
    pub fn or(self, other: Self) -> Result<Self> {
        self.zip(other, |a, b| a || b)
    }

    /// Lane-wise exclusive or.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` belongs to another species.
    pub fn xor(self, other: Self) -> Result<Self> {
        self.zip(other, |a, b| a != b)
    }

    /// Lanes set in `self` but not in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` belongs to another species.
    pub fn and_not(self, other: Self) -> Result<Self> {
        self.zip(other, |a, b| a && !b)
    }

    fn zip(self, other: Self, f: impl Fn(bool, bool) -> bool) -> Result<Self> {
        self.species.check_same(other.species)?;
        Ok(Self::from_fn(self.species, |i| f(self.bits[i], other.bits[i])))
    }

    // -------------------------------------------------------------------------
    // Reductions
    // -------------------------------------------------------------------------

    /// Returns true if at least one lane is set.
    #[must_use]
    pub fn any_true(&self) -> bool {
        self.as_slice().iter().fold(false, |acc, &b| acc || b)
    }

    /// Returns true if every lane is set.
    #[must_use]
    pub fn all_true(&self) -> bool {
        self.as_slice().iter().fold(true, |acc, &b| acc && b)
    }

    /// Number of set lanes.
    #[must_use]
    pub fn true_count(&self) -> usize {
        self.as_slice().iter().filter(|&&b| b).count()
    }

    /// Index of the lowest set lane, if any.
    #[must_use]
    pub fn first_true(&self) -> Option<usize> {
        self.as_slice().iter().position(|&b| b)
    }

    // -------------------------------------------------------------------------
    // Conversions
    // -------------------------------------------------------------------------

    /// Materializes the mask as a vector: all bits set (`-1` for integers)
    /// in set lanes, zero elsewhere.
    ///
    /// The all-ones encoding lets the vector act as a bitwise-AND selector.
    #[must_use]
    pub fn to_vector(&self) -> Vector<E> {
        let width = E::KIND.bytes();
        let mut reg = Register::zeroed();
        let bytes = reg.bytes_mut(self.species.byte_size());
        for (i, lane) in bytes.chunks_exact_mut(width).enumerate() {
            if self.bits[i] {
                lane.fill(0xFF);
            }
        }
        Vector::from_register(self.species, reg)
    }

    /// Re-expresses the same lane booleans under another species.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneCountMismatch`](crate::LaneError::LaneCountMismatch)
    /// unless `species` has the same lane count.
    pub fn cast<F: Element>(self, species: Species<F>) -> Result<Mask<F>> {
        self.species.check_lane_count(species)?;
        Ok(Mask::from_fn(species, |i| self.bits[i]))
    }
}

impl<E: Element> PartialEq for Mask<E> {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species && self.as_slice() == other.as_slice()
    }
}

impl<E: Element> Eq for Mask<E> {}

impl<E: Element> fmt::Debug for Mask<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask")
            .field("species", &self.species.id())
            .field("lanes", &self.as_slice())
            .finish()
    }
}

impl<E: Element> fmt::Display for Mask<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.species)?;
        for (i, &bit) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(if bit { "T" } else { "F" })?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaneError;
    use crate::shape::Shape;

    fn s() -> Species<i32> {
        Species::new(Shape::S128)
    }

    #[test]
    fn test_from_slice() {
        let src = [true, false, true, true, false];
        let m = Mask::from_slice(s(), &src, 1).unwrap();
        assert_eq!(m.to_vec(), vec![false, true, true, false]);
        assert_eq!(
            Mask::from_slice(s(), &src, 2),
            Err(LaneError::IndexOutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_logic() {
        let a = Mask::from_slice(s(), &[true, true, false, false], 0).unwrap();
        let b = Mask::from_slice(s(), &[true, false, true, false], 0).unwrap();
        assert_eq!(a.and(b).unwrap().to_vec(), vec![true, false, false, false]);
        assert_eq!(a.or(b).unwrap().to_vec(), vec![true, true, true, false]);
        assert_eq!(a.xor(b).unwrap().to_vec(), vec![false, true, true, false]);
        assert_eq!(a.and_not(b).unwrap().to_vec(), vec![false, true, false, false]);
        assert_eq!(a.not().to_vec(), vec![false, false, true, true]);
    }

    #[test]
    fn test_binary_logic_requires_same_species() {
        let a = s().mask_splat(true);
        let b = Species::<i32>::new(Shape::S256).mask_splat(true);
        assert!(matches!(a.and(b), Err(LaneError::SpeciesMismatch { .. })));
    }

    #[test]
    fn test_reductions() {
        let none = s().mask_splat(false);
        assert!(!none.any_true());
        assert!(!none.all_true());
        assert_eq!(none.first_true(), None);

        let all = s().mask_splat(true);
        assert!(all.any_true());
        assert!(all.all_true());
        assert_eq!(all.true_count(), 4);

        let one = s().mask_from_fn(|i| i == 2);
        assert!(one.any_true());
        assert!(!one.all_true());
        assert_eq!(one.first_true(), Some(2));
    }

    #[test]
    fn test_to_vector_encoding() {
        let m = s().mask_from_fn(|i| i % 2 == 1);
        assert_eq!(m.to_vector().as_slice(), &[0, -1, 0, -1]);
        assert_eq!(m.to_vector().to_mask(), m);

        let fm = Species::<f64>::new(Shape::S128).mask_from_fn(|i| i == 0);
        let fv = fm.to_vector();
        assert_eq!(fv.as_slice()[0].to_bits(), u64::MAX);
        assert_eq!(fv.as_slice()[1].to_bits(), 0);
    }

    #[test]
    fn test_cast() {
        let m = s().mask_from_fn(|i| i < 3);
        let f = m.cast(Species::<f32>::new(Shape::S128)).unwrap();
        assert_eq!(f.to_vec(), m.to_vec());
        let wide = m.cast(Species::<i64>::new(Shape::S256)).unwrap();
        assert_eq!(wide.to_vec(), m.to_vec());
        assert_eq!(
            m.cast(Species::<i8>::new(Shape::S128)),
            Err(LaneError::LaneCountMismatch {
                expected: 4,
                found: 16
            })
        );
    }

    #[test]
    fn test_lane_and_display() {
        let m = s().mask_from_fn(|i| i == 0);
        assert_eq!(m.lane(0), Ok(true));
        assert!(m.lane(4).is_err());
        assert_eq!(m.to_string(), "i32x4[T, F, F, F]");
    }
}

//! Lane index permutations.
//!
//! A [`Shuffle<E>`] holds one source lane index per lane, each inside
//! `[0, lane_count)`. Indices may repeat, so a shuffle can broadcast a lane
//! as well as permute. Every constructor validates the range, which is why
//! applying a shuffle never fails on an index.
//!
//! # Example
//!
//! ```
//! use lanevec::{Shape, Shuffle, Species, Vector};
//!
//! let s = Species::<f32>::new(Shape::S128);
//! let v = Vector::from_lanes(s, &[1.0, 2.0, 3.0, 4.0]).unwrap();
//! let rot = Shuffle::iota(s, 1);
//!
//! assert_eq!(rot.to_vec(), vec![1, 2, 3, 0]);
//! assert_eq!(v.rearrange(rot).unwrap().as_slice(), &[2.0, 3.0, 4.0, 1.0]);
//! ```

use crate::element::Element;
use crate::error::{check_index, check_span, Result};
use crate::register::MAX_LANES;
use crate::species::Species;
use crate::vector::Vector;
use core::fmt;

/// An immutable lane index map.
#[derive(Clone, Copy)]
pub struct Shuffle<E: Element> {
    species: Species<E>,
    indices: [u8; MAX_LANES],
}

impl<E: Element> Shuffle<E> {
    // -------------------------------------------------------------------------
    // Factories
    // -------------------------------------------------------------------------

    /// A shuffle with lane `i` selecting source lane `f(i)`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`](crate::LaneError::IndexOutOfRange)
    /// for the first index outside `[0, lane_count)`.
    pub fn from_fn(species: Species<E>, mut f: impl FnMut(usize) -> usize) -> Result<Self> {
        let lanes = species.lane_count();
        let mut indices = [0u8; MAX_LANES];
        for (i, slot) in indices.iter_mut().take(lanes).enumerate() {
            let index = f(i);
            check_index(index, lanes)?;
            // MAX_LANES fits in a byte.
            *slot = index as u8;
        }
        Ok(Self { species, indices })
    }

    /// Reads `lane_count` indices from `src` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`](crate::LaneError::IndexOutOfRange)
    /// if `src` is too short or holds an index outside `[0, lane_count)`.
    pub fn from_slice(species: Species<E>, src: &[usize], offset: usize) -> Result<Self> {
        check_span(offset, species.lane_count(), src.len())?;
        Self::from_fn(species, |i| src[offset + i])
    }

    /// The shuffle mapping lane `i` to `(i + step) mod lane_count`.
    ///
    /// Negative steps rotate the other way.
    #[must_use]
    pub fn iota(species: Species<E>, step: isize) -> Self {
        let lanes = species.lane_count();
        let step = step.rem_euclid(lanes as isize);
        let mut indices = [0u8; MAX_LANES];
        for (i, slot) in indices.iter_mut().take(lanes).enumerate() {
            *slot = ((i as isize + step) % lanes as isize) as u8;
        }
        Self { species, indices }
    }

    /// The shuffle that leaves every lane in place.
    #[must_use]
    pub fn identity(species: Species<E>) -> Self {
        Self::iota(species, 0)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The species this shuffle permutes.
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

    /// Source index selected by lane `i`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`](crate::LaneError::IndexOutOfRange)
    /// if `i >= lane_count()`.
    pub fn lane(&self, i: usize) -> Result<usize> {
        check_index(i, self.lane_count())?;
        Ok(self.index(i))
    }

    #[inline(always)]
    pub(crate) fn index(&self, i: usize) -> usize {
        self.indices[i] as usize
    }

    /// The indices as an owned `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<usize> {
        (0..self.lane_count()).map(|i| self.index(i)).collect()
    }

    /// Returns true if every lane selects itself.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        (0..self.lane_count()).all(|i| self.index(i) == i)
    }

    // -------------------------------------------------------------------------
    // Composition and conversion
    // -------------------------------------------------------------------------

    /// Composes two shuffles: lane `i` of the result is `self[other[i]]`.
    ///
    /// Rearranging a vector by `self` and then by `other` equals
    /// rearranging it once by `self.rearrange(other)`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SpeciesMismatch`](crate::LaneError::SpeciesMismatch)
    /// if `other` belongs to another species.
    pub fn rearrange(self, other: Self) -> Result<Self> {
        self.species.check_same(other.species)?;
        let mut indices = [0u8; MAX_LANES];
        for (i, slot) in indices.iter_mut().take(self.lane_count()).enumerate() {
            *slot = self.indices[other.index(i)];
        }
        Ok(Self {
            species: self.species,
            indices,
        })
    }

    /// The indices as a vector of the same species.
    #[must_use]
    pub fn to_vector(&self) -> Vector<E> {
        Vector::from_fn(self.species, |i| E::from_index(self.index(i)))
    }

    /// Re-expresses the same indices under another species.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneCountMismatch`](crate::LaneError::LaneCountMismatch)
    /// unless `species` has the same lane count.
    pub fn cast<F: Element>(self, species: Species<F>) -> Result<Shuffle<F>> {
        self.species.check_lane_count(species)?;
        Ok(Shuffle {
            species,
            indices: self.indices,
        })
    }
}

impl<E: Element> PartialEq for Shuffle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species
            && self.indices[..self.lane_count()] == other.indices[..other.lane_count()]
    }
}

impl<E: Element> Eq for Shuffle<E> {}

impl<E: Element> fmt::Debug for Shuffle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shuffle")
            .field("species", &self.species.id())
            .field("indices", &self.to_vec())
            .finish()
    }
}

impl<E: Element> fmt::Display for Shuffle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.species)?;
        for i in 0..self.lane_count() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.index(i))?;
        }
        f.write_str("]")
    }
}

//! Species: the pairing of an element kind with a register shape.
//!
//! A species fixes everything about a vector except its lane values:
//! element width, register width, and therefore the lane count
//! `shape bits / element bits`. Species are plain `Copy` values compared by
//! `(kind, shape)`; two species of the same kind and shape are the same
//! species no matter where they were obtained.
//!
//! [`Species<E>`] carries the element kind in its type. [`SpeciesId`] is the
//! type-erased form used in errors, display and tooling.
//!
//! # Example
//!
//! ```
//! use lanevec::{Shape, Species};
//!
//! let s = Species::<i32>::new(Shape::S128);
//! assert_eq!(s.lane_count(), 4);
//! assert_eq!(s.to_string(), "i32x4");
//!
//! // All preferred species share one shape.
//! let a = Species::<i8>::preferred();
//! let b = Species::<f64>::preferred();
//! assert!(a.is_shape_compatible(b));
//! ```

use crate::element::{Element, ElementKind};
use crate::error::{LaneError, Result};
use crate::mask::Mask;
use crate::shape::{preferred_shape, Shape};
use crate::shuffle::Shuffle;
use crate::vector::Vector;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

// =============================================================================
// SpeciesId
// =============================================================================

/// Type-erased `(element kind, shape)` pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "SpeciesIdFields"))]
pub struct SpeciesId {
    kind: ElementKind,
    shape: Shape,
}

/// Wire form of [`SpeciesId`]; the shape is resolved on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SpeciesIdFields {
    kind: ElementKind,
    shape: Shape,
}

#[cfg(feature = "serde")]
impl From<SpeciesIdFields> for SpeciesId {
    fn from(fields: SpeciesIdFields) -> Self {
        Self::new(fields.kind, fields.shape)
    }
}

impl SpeciesId {
    /// Pairs a kind with a shape, resolving [`Shape::Preferred`].
    #[must_use]
    pub fn new(kind: ElementKind, shape: Shape) -> Self {
        Self {
            kind,
            shape: shape.resolve(),
        }
    }

    /// Looks up the species of `kind` in a register of `bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidShape`] if `bits` is not a known register
    /// width or does not hold a whole number of `kind` lanes.
    ///
    /// # Example
    ///
    /// ```
    /// use lanevec::{ElementKind, SpeciesId};
    ///
    /// let id = SpeciesId::with_bits(ElementKind::I16, 256).unwrap();
    /// assert_eq!(id.lane_count(), 16);
    /// assert!(SpeciesId::with_bits(ElementKind::I16, 200).is_err());
    /// ```
    pub fn with_bits(kind: ElementKind, bits: u32) -> Result<Self> {
        let shape = Shape::from_bits(bits)?;
        if shape.bits() % kind.bits() != 0 || shape.bits() < kind.bits() {
            return Err(LaneError::InvalidShape { bits });
        }
        Ok(Self::new(kind, shape))
    }

    /// Element kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Concrete register shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of lanes: shape bits divided by element bits.
    #[inline]
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.shape.bits() / self.kind.bits()
    }

    /// Every concrete species, grouped by kind in increasing shape.
    #[must_use]
    pub fn all() -> Vec<Self> {
        ElementKind::ALL
            .iter()
            .flat_map(|&kind| Shape::CONCRETE.iter().map(move |&shape| Self::new(kind, shape)))
            .collect()
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.kind, self.lane_count())
    }
}

// =============================================================================
// Species<E>
// =============================================================================

/// The species of vectors with `E` lanes in a given shape.
pub struct Species<E: Element> {
    shape: Shape,
    _element: PhantomData<fn() -> E>,
}

impl<E: Element> Species<E> {
    /// The species of `E` lanes in `shape`. [`Shape::Preferred`] is resolved.
    #[inline]
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape: shape.resolve(),
            _element: PhantomData,
        }
    }

    /// The species of `E` lanes in a register of `bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidShape`] for an unknown register width.
    pub fn with_bits(bits: u32) -> Result<Self> {
        SpeciesId::with_bits(E::KIND, bits).map(|id| Self::new(id.shape()))
    }

    /// The species using the platform's preferred shape.
    #[must_use]
    pub fn preferred() -> Self {
        Self::new(preferred_shape())
    }

    /// Element kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        E::KIND
    }

    /// Concrete register shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Width of one lane in bits.
    #[inline]
    #[must_use]
    pub const fn element_bits(&self) -> usize {
        E::KIND.bits()
    }

    /// Number of lanes.
    #[inline]
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.shape.bits() / E::KIND.bits()
    }

    /// Register width in bytes.
    #[inline]
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.shape.bytes()
    }

    /// Type-erased identity of this species.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SpeciesId {
        SpeciesId {
            kind: E::KIND,
            shape: self.shape,
        }
    }

    /// Returns true if both species use the same shape, so their masks and
    /// shuffles may be cast into each other.
    #[inline]
    #[must_use]
    pub fn is_shape_compatible<F: Element>(&self, other: Species<F>) -> bool {
        self.shape == other.shape()
    }

    /// Fails with [`LaneError::SpeciesMismatch`] unless `other == self`.
    #[inline]
    pub(crate) fn check_same(&self, other: Self) -> Result<()> {
        if *self == other {
            Ok(())
        } else {
            Err(LaneError::SpeciesMismatch {
                expected: self.id(),
                found: other.id(),
            })
        }
    }

    /// Fails with [`LaneError::LaneCountMismatch`] unless `other` has as many lanes.
    #[inline]
    pub(crate) fn check_lane_count<F: Element>(&self, other: Species<F>) -> Result<()> {
        if self.lane_count() == other.lane_count() {
            Ok(())
        } else {
            Err(LaneError::LaneCountMismatch {
                expected: self.lane_count(),
                found: other.lane_count(),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Factories
    // -------------------------------------------------------------------------

    /// The all-zero vector of this species.
    #[must_use]
    pub fn zero(self) -> Vector<E> {
        Vector::zero(self)
    }

    /// A vector with every lane set to `value`.
    #[must_use]
    pub fn broadcast(self, value: E) -> Vector<E> {
        Vector::broadcast(self, value)
    }

    /// A vector with lane `i` set to `f(i)`.
    #[must_use]
    pub fn vector_from_fn(self, f: impl FnMut(usize) -> E) -> Vector<E> {
        Vector::from_fn(self, f)
    }

    /// A vector whose lanes are given literally.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneCountMismatch`] unless exactly
    /// [`lane_count`](Self::lane_count) values are given.
    pub fn vector_from_lanes(self, lanes: &[E]) -> Result<Vector<E>> {
        Vector::from_lanes(self, lanes)
    }

    /// The mask with every lane set to `value`.
    #[must_use]
    pub fn mask_splat(self, value: bool) -> Mask<E> {
        Mask::splat(self, value)
    }

    /// A mask with lane `i` set to `f(i)`.
    #[must_use]
    pub fn mask_from_fn(self, f: impl FnMut(usize) -> bool) -> Mask<E> {
        Mask::from_fn(self, f)
    }

    /// The shuffle mapping lane `i` to `(i + step) mod lane_count`.
    #[must_use]
    pub fn shuffle_iota(self, step: isize) -> Shuffle<E> {
        Shuffle::iota(self, step)
    }

    /// A shuffle with lane `i` selecting source lane `f(i)`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] if `f` produces an index
    /// outside `[0, lane_count)`.
    pub fn shuffle_from_fn(self, f: impl FnMut(usize) -> usize) -> Result<Shuffle<E>> {
        Shuffle::from_fn(self, f)
    }
}

impl<E: Element> Clone for Species<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Element> Copy for Species<E> {}

impl<E: Element> PartialEq for Species<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl<E: Element> Eq for Species<E> {}

impl<E: Element> Hash for Species<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl<E: Element> fmt::Debug for Species<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Species")
            .field("kind", &E::KIND)
            .field("shape", &self.shape)
            .finish()
    }
}

impl<E: Element> fmt::Display for Species<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id(), f)
    }
}

impl<E: Element> From<Species<E>> for SpeciesId {
    fn from(species: Species<E>) -> Self {
        species.id()
    }
}

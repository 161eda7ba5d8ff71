//! Loads and stores between vectors and linear memory.
//!
//! Three addressing modes are supported, each with a masked form:
//!
//! - contiguous: lane `i` lives at `offset + i` of an element slice,
//! - gather/scatter: lane `i` lives at `base + index_map[map_offset + i]`,
//! - raw bytes: lane `i` occupies bytes `[offset + i*w, offset + (i+1)*w)` of
//!   a byte slice, in native byte order.
//!
//! Every address is validated before any lane is read or written, so a
//! failing store leaves the destination untouched. Stores visit lanes in
//! increasing index order; when a scatter maps two lanes to one address the
//! higher lane wins.
//!
//! Masked accesses only compute, check and touch the addresses of set lanes.
//! An unset lane may point anywhere, including past the end of the buffer
//! or past the end of the index map. Unset lanes of a masked load read as
//! zero.
//!
//! # Example
//!
//! ```
//! use lanevec::{Shape, Species, Vector};
//!
//! let s = Species::<i32>::new(Shape::S128);
//! let src = [1, 2, 3];
//! let tail = s.mask_from_fn(|i| i < 2);
//!
//! // Lanes 2 and 3 would read past the end, but they are unset.
//! let v = Vector::from_slice_masked(s, &src, 1, tail).unwrap();
//! assert_eq!(v.as_slice(), &[2, 3, 0, 0]);
//! assert!(Vector::from_slice(s, &src, 1).is_err());
//! ```

use crate::element::Element;
use crate::error::{check_index, check_span, LaneError, Result};
use crate::mask::Mask;
use crate::register::{Register, MAX_LANES};
use crate::species::Species;
use crate::vector::Vector;
use core::fmt;
use tracing::trace;

/// Byte order of raw lane memory.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the running platform.
    #[inline]
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Self::LittleEndian
        } else {
            Self::BigEndian
        }
    }

    /// The other byte order.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::LittleEndian => Self::BigEndian,
            Self::BigEndian => Self::LittleEndian,
        }
    }

    fn check_native(self) -> Result<()> {
        if self == Self::native() {
            Ok(())
        } else {
            Err(LaneError::EndiannessMismatch {
                requested: self,
                native: Self::native(),
            })
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LittleEndian => "little-endian",
            Self::BigEndian => "big-endian",
        })
    }
}

// =============================================================================
// Address planning
// =============================================================================

/// Start address of every lane that will be accessed; `None` for skipped
/// lanes.
type Plan = [Option<usize>; MAX_LANES];

/// Resolves and bounds-checks the address of each active lane.
///
/// `address(i)` yields the first buffer index of lane `i`; the lane spans
/// `width` units from there and must fit inside `len`.
fn plan_lanes<E: Element>(
    species: Species<E>,
    mask: Option<Mask<E>>,
    len: usize,
    width: usize,
    mut address: impl FnMut(usize) -> Result<usize>,
) -> Result<Plan> {
    if let Some(mask) = mask {
        species.check_same(mask.species())?;
    }
    let mut plan = [None; MAX_LANES];
    let mut skipped = 0usize;
    for (i, slot) in plan.iter_mut().take(species.lane_count()).enumerate() {
        if mask.is_none_or(|m| m.test(i)) {
            let start = address(i)?;
            check_span(start, width, len)?;
            *slot = Some(start);
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        trace!(%species, skipped, "masked access skipped unset lanes");
    }
    Ok(plan)
}

/// `a + b`, reporting overflow as an out-of-range index.
#[inline]
fn add_index(a: usize, b: usize, len: usize) -> Result<usize> {
    a.checked_add(b)
        .ok_or(LaneError::IndexOutOfRange { index: usize::MAX, len })
}

/// Address of lane `i` in a gather/scatter.
#[inline]
fn mapped(
    index_map: &[usize],
    map_offset: usize,
    base: usize,
    len: usize,
    i: usize,
) -> Result<usize> {
    let slot = add_index(map_offset, i, index_map.len())?;
    check_index(slot, index_map.len())?;
    add_index(base, index_map[slot], len)
}

impl<E: Element> Vector<E> {
    // -------------------------------------------------------------------------
    // Contiguous element slices
    // -------------------------------------------------------------------------

    /// Loads `lane_count` elements of `src` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] unless
    /// `offset + lane_count <= src.len()`.
    pub fn from_slice(species: Species<E>, src: &[E], offset: usize) -> Result<Self> {
        let lanes = species.lane_count();
        check_span(offset, lanes, src.len())?;
        Self::from_lanes(species, &src[offset..offset + lanes])
    }

    /// Loads the set lanes of `mask` from `src` starting at `offset`; unset
    /// lanes are zero and their addresses are never checked.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] for the first set lane outside
    /// `src`, or [`LaneError::SpeciesMismatch`] for a mask of another species.
    pub fn from_slice_masked(
        species: Species<E>,
        src: &[E],
        offset: usize,
        mask: Mask<E>,
    ) -> Result<Self> {
        let plan = plan_lanes(species, Some(mask), src.len(), 1, |i| {
            add_index(offset, i, src.len())
        })?;
        Ok(Self::gather_planned(species, src, &plan))
    }

    /// Stores every lane into `dst` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] unless
    /// `offset + lane_count <= dst.len()`; `dst` is then left unchanged.
    pub fn into_slice(self, dst: &mut [E], offset: usize) -> Result<()> {
        check_span(offset, self.lane_count(), dst.len())?;
        self.for_each(|i, lane| dst[offset + i] = lane);
        Ok(())
    }

    /// Stores the set lanes of `mask` into `dst` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] for the first set lane outside
    /// `dst`, or [`LaneError::SpeciesMismatch`] for a mask of another species.
    /// Nothing is written on error.
    pub fn into_slice_masked(self, dst: &mut [E], offset: usize, mask: Mask<E>) -> Result<()> {
        let len = dst.len();
        let plan = plan_lanes(self.species(), Some(mask), len, 1, |i| add_index(offset, i, len))?;
        self.scatter_planned(dst, &plan);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Gather / scatter
    // -------------------------------------------------------------------------

    /// Loads lane `i` from `src[base + index_map[map_offset + i]]`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] if `index_map` is too short or
    /// any computed address falls outside `src`.
    pub fn from_slice_gather(
        species: Species<E>,
        src: &[E],
        base: usize,
        index_map: &[usize],
        map_offset: usize,
    ) -> Result<Self> {
        check_span(map_offset, species.lane_count(), index_map.len())?;
        let plan = plan_lanes(species, None, src.len(), 1, |i| {
            mapped(index_map, map_offset, base, src.len(), i)
        })?;
        Ok(Self::gather_planned(species, src, &plan))
    }

    /// Gathers only the set lanes of `mask`; unset lanes are zero and never
    /// read their index map entry.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] for the first set lane whose
    /// map entry or address is out of range, or
    /// [`LaneError::SpeciesMismatch`] for a mask of another species.
    pub fn from_slice_gather_masked(
        species: Species<E>,
        src: &[E],
        base: usize,
        index_map: &[usize],
        map_offset: usize,
        mask: Mask<E>,
    ) -> Result<Self> {
        let plan = plan_lanes(species, Some(mask), src.len(), 1, |i| {
            mapped(index_map, map_offset, base, src.len(), i)
        })?;
        Ok(Self::gather_planned(species, src, &plan))
    }

    /// Stores lane `i` into `dst[base + index_map[map_offset + i]]`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] if `index_map` is too short or
    /// any computed address falls outside `dst`. Nothing is written on error.
    pub fn into_slice_scatter(
        self,
        dst: &mut [E],
        base: usize,
        index_map: &[usize],
        map_offset: usize,
    ) -> Result<()> {
        check_span(map_offset, self.lane_count(), index_map.len())?;
        let len = dst.len();
        let plan = plan_lanes(self.species(), None, len, 1, |i| {
            mapped(index_map, map_offset, base, len, i)
        })?;
        self.scatter_planned(dst, &plan);
        Ok(())
    }

    /// Scatters only the set lanes of `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] for the first set lane whose
    /// map entry or address is out of range, or
    /// [`LaneError::SpeciesMismatch`] for a mask of another species.
    /// Nothing is written on error.
    pub fn into_slice_scatter_masked(
        self,
        dst: &mut [E],
        base: usize,
        index_map: &[usize],
        map_offset: usize,
        mask: Mask<E>,
    ) -> Result<()> {
        let len = dst.len();
        let plan = plan_lanes(self.species(), Some(mask), len, 1, |i| {
            mapped(index_map, map_offset, base, len, i)
        })?;
        self.scatter_planned(dst, &plan);
        Ok(())
    }

    fn gather_planned(species: Species<E>, src: &[E], plan: &Plan) -> Self {
        Self::from_fn(species, |i| plan[i].map_or(E::ZERO, |a| src[a]))
    }

    fn scatter_planned(self, dst: &mut [E], plan: &Plan) {
        self.for_each(|i, lane| {
            if let Some(a) = plan[i] {
                dst[a] = lane;
            }
        });
    }

    // -------------------------------------------------------------------------
    // Raw bytes
    // -------------------------------------------------------------------------

    /// Loads `byte_size` bytes of `src` starting at byte `offset` as packed
    /// lanes.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::EndiannessMismatch`] unless `order` is
    /// [`ByteOrder::native`], or [`LaneError::IndexOutOfRange`] if the bytes
    /// do not fit inside `src`.
    pub fn from_bytes(
        species: Species<E>,
        src: &[u8],
        offset: usize,
        order: ByteOrder,
    ) -> Result<Self> {
        order.check_native()?;
        let size = species.byte_size();
        check_span(offset, size, src.len())?;
        Ok(Self::from_register(
            species,
            Register::from_prefix(&src[offset..offset + size]),
        ))
    }

    /// Loads the set lanes of `mask` from packed bytes; unset lanes are zero.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::EndiannessMismatch`] unless `order` is native,
    /// [`LaneError::IndexOutOfRange`] for the first set lane whose bytes do
    /// not fit inside `src`, or [`LaneError::SpeciesMismatch`] for a mask of
    /// another species.
    pub fn from_bytes_masked(
        species: Species<E>,
        src: &[u8],
        offset: usize,
        order: ByteOrder,
        mask: Mask<E>,
    ) -> Result<Self> {
        order.check_native()?;
        let width = E::KIND.bytes();
        let plan = plan_lanes(species, Some(mask), src.len(), width, |i| {
            add_index(offset, i * width, src.len())
        })?;
        Ok(Self::from_fn(species, |i| {
            plan[i].map_or(E::ZERO, |a| bytemuck::pod_read_unaligned(&src[a..a + width]))
        }))
    }

    /// Stores every lane as packed bytes starting at byte `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::EndiannessMismatch`] unless `order` is native, or
    /// [`LaneError::IndexOutOfRange`] if the bytes do not fit inside `dst`.
    pub fn into_bytes(self, dst: &mut [u8], offset: usize, order: ByteOrder) -> Result<()> {
        order.check_native()?;
        let size = self.species().byte_size();
        check_span(offset, size, dst.len())?;
        dst[offset..offset + size].copy_from_slice(self.register().bytes(size));
        Ok(())
    }

    /// Stores the set lanes of `mask` as packed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::EndiannessMismatch`] unless `order` is native,
    /// [`LaneError::IndexOutOfRange`] for the first set lane whose bytes do
    /// not fit inside `dst`, or [`LaneError::SpeciesMismatch`] for a mask of
    /// another species. Nothing is written on error.
    pub fn into_bytes_masked(
        self,
        dst: &mut [u8],
        offset: usize,
        order: ByteOrder,
        mask: Mask<E>,
    ) -> Result<()> {
        order.check_native()?;
        let width = E::KIND.bytes();
        let len = dst.len();
        let plan = plan_lanes(self.species(), Some(mask), len, width, |i| {
            add_index(offset, i * width, len)
        })?;
        self.for_each(|i, lane| {
            if let Some(a) = plan[i] {
                dst[a..a + width].copy_from_slice(bytemuck::bytes_of(&lane));
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn s() -> Species<i32> {
        Species::new(Shape::S128)
    }

    #[test]
    fn test_slice_round_trip() {
        let v = Vector::from_lanes(s(), &[4, 3, 2, 1]).unwrap();
        let mut buf = [0i32; 6];
        v.into_slice(&mut buf, 2).unwrap();
        assert_eq!(buf, [0, 0, 4, 3, 2, 1]);
        assert_eq!(Vector::from_slice(s(), &buf, 2).unwrap(), v);
    }

    #[test]
    fn test_slice_bounds() {
        let buf = [0i32; 5];
        assert!(Vector::from_slice(s(), &buf, 1).is_ok());
        assert_eq!(
            Vector::from_slice(s(), &buf, 2),
            Err(LaneError::IndexOutOfRange { index: 5, len: 5 })
        );
        let mut small = [9i32; 3];
        assert!(Vector::iota(s()).into_slice(&mut small, 0).is_err());
        assert_eq!(small, [9, 9, 9]);
    }

    #[test]
    fn test_masked_slice_skips_unset_lanes() {
        let src = [10, 20, 30];
        let m = s().mask_from_fn(|i| i == 0 || i == 2);
        let v = Vector::from_slice_masked(s(), &src, 0, m).unwrap();
        assert_eq!(v.as_slice(), &[10, 0, 30, 0]);

        // A set lane past the end is still an error.
        let m = s().mask_from_fn(|i| i == 3);
        assert_eq!(
            Vector::from_slice_masked(s(), &src, 0, m),
            Err(LaneError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_masked_store_is_all_or_nothing() {
        let v = Vector::from_lanes(s(), &[1, 2, 3, 4]).unwrap();
        let mut dst = [0i32; 3];
        let m = s().mask_from_fn(|i| i != 1);
        assert!(v.into_slice_masked(&mut dst, 0, m).is_err());
        assert_eq!(dst, [0, 0, 0]);

        let m = s().mask_from_fn(|i| i < 2);
        v.into_slice_masked(&mut dst, 1, m).unwrap();
        assert_eq!(dst, [0, 1, 2]);
    }

    #[test]
    fn test_gather_scatter() {
        let src = [100, 101, 102, 103, 104, 105];
        let map = [9, 5, 0, 3, 3];
        let v = Vector::from_slice_gather(s(), &src, 0, &map, 1).unwrap();
        assert_eq!(v.as_slice(), &[105, 100, 103, 103]);
        let v = Vector::from_slice_gather(s(), &src, 1, &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(v.as_slice(), &[101, 102, 103, 104]);
        assert!(Vector::from_slice_gather(s(), &src, 0, &map, 0).is_err());

        let mut dst = [0i32; 6];
        Vector::from_lanes(s(), &[1, 2, 3, 4])
            .unwrap()
            .into_slice_scatter(&mut dst, 0, &map, 1)
            .unwrap();
        // Lanes 2 and 3 both map to index 3; the higher lane wins.
        assert_eq!(dst, [2, 0, 0, 4, 0, 1]);
    }

    #[test]
    fn test_masked_gather_scatter_skip_bad_addresses() {
        let src = [7, 8, 9];
        let map = [0, 1000, 2, usize::MAX];
        let m = s().mask_from_fn(|i| i % 2 == 0);
        let v = Vector::from_slice_gather_masked(s(), &src, 0, &map, 0, m).unwrap();
        assert_eq!(v.as_slice(), &[7, 0, 9, 0]);

        // The map is one entry short, but only for an unset lane.
        let v = Vector::from_slice_gather_masked(s(), &src, 0, &map[..3], 0, m).unwrap();
        assert_eq!(v.as_slice(), &[7, 0, 9, 0]);

        let mut dst = [0i32; 3];
        Vector::broadcast(s(), 5)
            .into_slice_scatter_masked(&mut dst, 0, &map, 0, m)
            .unwrap();
        assert_eq!(dst, [5, 0, 5]);

        let all = s().mask_splat(true);
        assert!(Vector::from_slice_gather_masked(s(), &src, 0, &map, 0, all).is_err());
    }

    #[test]
    fn test_bytes_round_trip() {
        let v = Vector::from_lanes(s(), &[1, -1, 0x0102_0304, i32::MIN]).unwrap();
        let mut bytes = [0u8; 20];
        v.into_bytes(&mut bytes, 4, ByteOrder::native()).unwrap();
        assert_eq!(&bytes[4..8], &1i32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &0x0102_0304i32.to_ne_bytes());
        assert_eq!(Vector::from_bytes(s(), &bytes, 4, ByteOrder::native()).unwrap(), v);
        // Unaligned offsets are fine.
        assert!(Vector::from_bytes(s(), &bytes, 3, ByteOrder::native()).is_ok());
        assert!(Vector::from_bytes(s(), &bytes, 5, ByteOrder::native()).is_err());
    }

    #[test]
    fn test_bytes_reject_foreign_order() {
        let foreign = ByteOrder::native().swapped();
        let bytes = [0u8; 16];
        assert_eq!(
            Vector::from_bytes(s(), &bytes, 0, foreign),
            Err(LaneError::EndiannessMismatch {
                requested: foreign,
                native: ByteOrder::native()
            })
        );
        let mut out = [0u8; 16];
        assert!(Vector::iota(s()).into_bytes(&mut out, 0, foreign).is_err());
        let m = s().mask_splat(true);
        assert!(Vector::from_bytes_masked(s(), &bytes, 0, foreign, m).is_err());
    }

    #[test]
    fn test_masked_bytes() {
        let v = Vector::from_lanes(s(), &[1, 2, 3, 4]).unwrap();
        let m = s().mask_from_fn(|i| i < 2);
        let mut bytes = [0xEEu8; 10];
        v.into_bytes_masked(&mut bytes, 2, ByteOrder::native(), m).unwrap();
        assert_eq!(&bytes[2..6], &1i32.to_ne_bytes());
        assert_eq!(&bytes[6..10], &2i32.to_ne_bytes());
        assert_eq!(&bytes[..2], &[0xEE, 0xEE]);

        let back = Vector::from_bytes_masked(s(), &bytes, 2, ByteOrder::native(), m).unwrap();
        assert_eq!(back.as_slice(), &[1, 2, 0, 0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(ByteOrder::LittleEndian.to_string(), "little-endian");
        assert_eq!(ByteOrder::BigEndian.swapped(), ByteOrder::LittleEndian);
    }
}

//! Error taxonomy for lane operations.
//!
//! Every fallible operation in this crate reports one of these variants and
//! fails only the call that violated its precondition. Nothing is retried,
//! clamped, or partially applied.

use crate::memory::ByteOrder;
use crate::shape::Shape;
use crate::species::SpeciesId;
use thiserror::Error;

/// Errors produced by species lookup, lane operations and memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaneError {
    /// The requested register width is not one of the known shapes.
    #[error("invalid shape: {bits} bits is not a supported register width")]
    InvalidShape {
        /// Requested width in bits.
        bits: u32,
    },

    /// Two operands (or an operand and its mask/shuffle) belong to different species.
    #[error("species mismatch: expected {expected}, found {found}")]
    SpeciesMismatch {
        /// Species of the receiver.
        expected: SpeciesId,
        /// Species of the offending operand.
        found: SpeciesId,
    },

    /// A cast was requested between species with different lane counts.
    #[error("lane count mismatch: expected {expected} lanes, found {found}")]
    LaneCountMismatch {
        /// Lane count of the source.
        expected: usize,
        /// Lane count of the target species.
        found: usize,
    },

    /// A lane index, shuffle index or memory offset fell outside its range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Exclusive upper bound.
        len: usize,
    },

    /// Raw byte access was requested in a byte order other than the native one.
    #[error("byte order mismatch: requested {requested}, native is {native}")]
    EndiannessMismatch {
        /// Byte order the caller asked for.
        requested: ByteOrder,
        /// Byte order of the running platform.
        native: ByteOrder,
    },

    /// An integer lane was divided by zero.
    #[error("integer division by zero in lane {lane}")]
    DivideByZero {
        /// First active lane whose divisor is zero.
        lane: usize,
    },

    /// The preferred shape was already resolved and cannot be reconfigured.
    #[error("preferred shape already fixed at {current}")]
    PreferredShapeFixed {
        /// The shape that is in effect for this process.
        current: Shape,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, LaneError>;

/// Fails with [`LaneError::IndexOutOfRange`] unless `index < len`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(LaneError::IndexOutOfRange { index, len })
    }
}

/// Fails unless `[offset, offset + count)` lies inside a buffer of length `len`.
#[inline]
pub(crate) fn check_span(offset: usize, count: usize, len: usize) -> Result<()> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        // Report the first lane that falls outside the buffer.
        _ => Err(LaneError::IndexOutOfRange {
            index: offset.max(len),
            len,
        }),
    }
}

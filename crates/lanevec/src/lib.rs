//! lanevec - Typed Lane Vectors
//!
//! Fixed-width vectors of primitive lanes (`i8`..`i64`, `f32`, `f64`) over
//! hardware register shapes (64, 128, 256, 512 bits, or the platform's
//! preferred width), with boolean lane masks and lane index shuffles.
//!
//! # Type Lattice
//!
//! ```text
//! Shape    = register width tier          (S64 | S128 | S256 | S512 | Preferred)
//! Species  = (element kind, shape)        lane_count = shape bits / element bits
//! Vector   = (species, lane values)       immutable, Copy
//! Mask     = (species, lane booleans)     selects lanes
//! Shuffle  = (species, lane indices)      permutes lanes
//! ```
//!
//! | Kind | S64 | S128 | S256 | S512 |
//! |------|-----|------|------|------|
//! | `i8` | 8 | 16 | 32 | 64 |
//! | `i16` | 4 | 8 | 16 | 32 |
//! | `i32`, `f32` | 2 | 4 | 8 | 16 |
//! | `i64`, `f64` | 1 | 2 | 4 | 8 |
//!
//! # Operation Protocol
//!
//! Every lane-wise method is defined through one of the operations in
//! [`vector::protocol`] (`u_op`, `b_op`, `t_op`, `r_op`, `b_test`,
//! `for_each`), each with a masked form. Species matching and mask handling
//! live there once:
//!
//! - masked lane maps pass the receiver's lane through on unset lanes,
//! - masked reductions substitute the operation's identity on unset lanes,
//! - masked predicates report `false` on unset lanes.
//!
//! # Example
//!
//! ```
//! use lanevec::{Shape, Species, Vector};
//!
//! let s = Species::<i32>::new(Shape::S128);
//! assert_eq!(s.lane_count(), 4);
//!
//! let v = Vector::from_lanes(s, &[1, 2, 3, 4]).unwrap();
//! let m = s.mask_from_fn(|i| i % 2 == 0);
//!
//! assert_eq!(v.add_masked(10, m).unwrap().as_slice(), &[11, 2, 13, 4]);
//! assert_eq!(v.shift_left(1).as_slice(), &[2, 4, 6, 8]);
//! assert_eq!(v.equal(3).unwrap().to_vec(), vec![false, false, true, false]);
//! assert_eq!(v.add_lanes(), 10);
//! ```
//!
//! # Errors
//!
//! Precondition violations (species mismatch, lane count mismatch on cast,
//! out-of-range lane, shuffle or memory index, non-native byte order,
//! integer division by zero) are reported as [`LaneError`] by the call that
//! violated them. No operation panics on bad input.

// Platform feature detection
pub mod arch;

// Element kinds and per-lane arithmetic
pub mod element;

// Error taxonomy
pub mod error;

// Per-lane boolean masks
pub mod mask;

// Loads and stores
pub mod memory;

// Register storage shared by all species
mod register;

// Register shapes and the preferred shape
pub mod shape;

// Lane index permutations
pub mod shuffle;

// (element kind, shape) pairs
pub mod species;

// Lane vectors and the operation protocol
pub mod vector;

pub use arch::CpuFeatures;
pub use element::{Element, ElementKind, FloatElement, IntElement, Scalar};
pub use error::{LaneError, Result};
pub use mask::Mask;
pub use memory::ByteOrder;
pub use register::MAX_LANES;
pub use shape::{preferred_shape, set_preferred_shape, Shape, PREFERRED_BITS_ENV};
pub use shuffle::Shuffle;
pub use species::{Species, SpeciesId};
pub use vector::{Comparison, Operand, Vector};

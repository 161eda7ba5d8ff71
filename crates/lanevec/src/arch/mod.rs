//! Platform capabilities.
//!
//! Lane operations in this crate run as straight-line per-lane loops over
//! register-aligned storage, which the compiler lowers to the SIMD
//! instructions the target enables. The only platform-dependent decision
//! made at runtime is the width of [`Shape::Preferred`](crate::Shape::Preferred),
//! which is derived from the features detected here.

mod features;

pub use features::CpuFeatures;

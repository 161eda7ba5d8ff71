//! Register-sized, register-aligned lane storage.
//!
//! Every vector, whatever its species, stores its lanes in one
//! [`Register`]: 64 bytes aligned to 64, the width of the widest shape.
//! A species of `n` lanes of `E` uses the first `n * size_of::<E>()` bytes;
//! the remaining bytes are always zero.
//!
//! ```text
//! Register (512 bits)
//!   ├── i32x4   uses bytes [0, 16)
//!   ├── i32x8   uses bytes [0, 32)
//!   └── i8x64   uses bytes [0, 64)
//! ```
//!
//! Keeping all species in the same storage makes bit reinterpretation a
//! byte copy and lets the per-lane loops over it lower to whole-register
//! SIMD instructions.

use crate::element::Element;
use crate::shape::MAX_SHAPE_BYTES;

/// Maximum number of lanes any species can have (8-bit lanes in 512 bits).
pub const MAX_LANES: usize = MAX_SHAPE_BYTES;

/// 512 bits of lane storage.
#[derive(Clone, Copy)]
#[repr(C, align(64))]
pub(crate) struct Register([u8; MAX_SHAPE_BYTES]);

impl Register {
    /// The all-zero register.
    #[inline]
    pub(crate) const fn zeroed() -> Self {
        Self([0; MAX_SHAPE_BYTES])
    }

    /// The first `bytes` bytes of storage.
    #[inline]
    pub(crate) fn bytes(&self, bytes: usize) -> &[u8] {
        &self.0[..bytes]
    }

    /// The first `bytes` bytes of storage, mutably.
    #[inline]
    pub(crate) fn bytes_mut(&mut self, bytes: usize) -> &mut [u8] {
        &mut self.0[..bytes]
    }

    /// The first `count` lanes viewed as `E`.
    #[inline]
    pub(crate) fn lanes<E: Element>(&self, count: usize) -> &[E] {
        bytemuck::cast_slice(&self.0[..count * core::mem::size_of::<E>()])
    }

    /// The first `count` lanes viewed as `E`, mutably.
    #[inline]
    pub(crate) fn lanes_mut<E: Element>(&mut self, count: usize) -> &mut [E] {
        bytemuck::cast_slice_mut(&mut self.0[..count * core::mem::size_of::<E>()])
    }

    /// Copies the leading bytes of `src` into a zeroed register.
    ///
    /// Bytes beyond `src.len()` stay zero, which is how narrower shapes are
    /// widened.
    #[inline]
    pub(crate) fn from_prefix(src: &[u8]) -> Self {
        let mut reg = Self::zeroed();
        reg.0[..src.len()].copy_from_slice(src);
        reg
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_alignment() {
        assert_eq!(core::mem::align_of::<Register>(), 64);
        assert_eq!(core::mem::size_of::<Register>(), MAX_SHAPE_BYTES);
    }

    #[test]
    fn test_lane_views() {
        let mut reg = Register::zeroed();
        reg.lanes_mut::<i32>(4).copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(reg.lanes::<i32>(4), &[1, 2, 3, 4]);
        assert_eq!(reg.lanes::<i64>(2)[0], i64::from_ne_bytes({
            let mut b = [0u8; 8];
            b[..4].copy_from_slice(&1i32.to_ne_bytes());
            b[4..].copy_from_slice(&2i32.to_ne_bytes());
            b
        }));
        // Storage past the used lanes is untouched.
        assert!(reg.bytes(MAX_SHAPE_BYTES)[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_prefix_zero_extends() {
        let reg = Register::from_prefix(&[0xAA; 8]);
        assert_eq!(reg.bytes(8), &[0xAA; 8]);
        assert!(reg.bytes(MAX_SHAPE_BYTES)[8..].iter().all(|&b| b == 0));
    }
}

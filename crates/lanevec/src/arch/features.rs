//! CPU feature detection for preferred-shape resolution.
//!
//! The widest register file the running CPU offers decides the process-wide
//! preferred [`Shape`]:
//!
//! | Feature | Register | Preferred shape |
//! |---------|----------|-----------------|
//! | AVX-512F | zmm | 512 bits |
//! | AVX2 | ymm | 256 bits |
//! | SSE2 / NEON | xmm / q | 128 bits |
//! | none | - | 128 bits (scalar lanes) |
//!
//! With the `std` feature, detection happens at runtime. Without it, the
//! compile-time `target_feature` set is used.

use crate::shape::Shape;
use core::fmt;

/// Detected SIMD capabilities of the running CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// AVX-512 Foundation (512-bit registers).
    pub avx512f: bool,
    /// AVX2 (256-bit integer registers).
    pub avx2: bool,
    /// SSE2 (128-bit registers, x86_64 baseline).
    pub sse2: bool,
    /// NEON / Advanced SIMD (128-bit registers, aarch64 baseline).
    pub neon: bool,
}

impl CpuFeatures {
    /// Detect CPU features at runtime.
    ///
    /// # Example
    ///
    /// ```
    /// use lanevec::arch::CpuFeatures;
    ///
    /// let features = CpuFeatures::detect();
    /// println!("{features}");
    /// ```
    #[must_use]
    #[cfg(feature = "std")]
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self {
                avx512f: std::is_x86_feature_detected!("avx512f"),
                avx2: std::is_x86_feature_detected!("avx2"),
                sse2: std::is_x86_feature_detected!("sse2"),
                neon: false,
            }
        }
        #[cfg(target_arch = "aarch64")]
        {
            Self {
                neon: std::arch::is_aarch64_feature_detected!("neon"),
                ..Self::default()
            }
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::compiled()
        }
    }

    /// Detect CPU features from the compile-time target feature set.
    #[must_use]
    #[cfg(not(feature = "std"))]
    pub fn detect() -> Self {
        Self::compiled()
    }

    /// Features enabled at compile time via `-C target-feature`.
    #[must_use]
    pub const fn compiled() -> Self {
        Self {
            avx512f: cfg!(target_feature = "avx512f"),
            avx2: cfg!(target_feature = "avx2"),
            sse2: cfg!(target_feature = "sse2"),
            neon: cfg!(target_feature = "neon"),
        }
    }

    /// The widest shape these features can hold in one register.
    #[must_use]
    pub const fn widest_shape(&self) -> Shape {
        if self.avx512f {
            Shape::S512
        } else if self.avx2 {
            Shape::S256
        } else {
            // SSE2, NEON and the scalar fallback all settle on 128 bits.
            Shape::S128
        }
    }

    /// Returns the detected features as a human-readable list.
    #[must_use]
    pub fn present_features(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.avx512f {
            present.push("AVX-512F");
        }
        if self.avx2 {
            present.push("AVX2");
        }
        if self.sse2 {
            present.push("SSE2");
        }
        if self.neon {
            present.push("NEON");
        }
        present
    }
}

impl fmt::Display for CpuFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CpuFeatures {{ avx512f: {}, avx2: {}, sse2: {}, neon: {} }}",
            self.avx512f, self.avx2, self.sse2, self.neon
        )
    }
}

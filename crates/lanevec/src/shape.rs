//! Register shapes and the process-wide preferred shape.
//!
//! A [`Shape`] is a hardware register width tier. Four widths are concrete;
//! [`Shape::Preferred`] stands for the widest width the platform offers and
//! resolves to exactly one concrete shape per process.
//!
//! # Resolution order
//!
//! The preferred shape is resolved on first use and is immutable afterwards:
//!
//! 1. a shape installed with [`set_preferred_shape`] before first use,
//! 2. the `LANEVEC_PREFERRED_BITS` environment variable (`64`, `128`, `256` or `512`),
//! 3. the widest register detected by [`CpuFeatures`].

use crate::arch::CpuFeatures;
use crate::error::{LaneError, Result};
use core::fmt;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Environment variable consulted when resolving the preferred shape.
pub const PREFERRED_BITS_ENV: &str = "LANEVEC_PREFERRED_BITS";

/// Widest supported register, in bits.
pub const MAX_SHAPE_BITS: usize = 512;

/// Widest supported register, in bytes.
pub const MAX_SHAPE_BYTES: usize = MAX_SHAPE_BITS / 8;

static PREFERRED: OnceLock<Shape> = OnceLock::new();

/// A register width tier.
///
/// # Example
///
/// ```
/// use lanevec::Shape;
///
/// assert_eq!(Shape::S128.bits(), 128);
/// assert_eq!(Shape::from_bits(256).unwrap(), Shape::S256);
/// assert!(Shape::from_bits(96).is_err());
/// assert!(Shape::Preferred.resolve().is_concrete());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// 64-bit register.
    S64,
    /// 128-bit register (SSE, NEON).
    S128,
    /// 256-bit register (AVX2).
    S256,
    /// 512-bit register (AVX-512).
    S512,
    /// The platform's widest register, fixed once per process.
    Preferred,
}

impl Shape {
    /// All concrete shapes in increasing width.
    pub const CONCRETE: [Self; 4] = [Self::S64, Self::S128, Self::S256, Self::S512];

    /// Looks up the concrete shape of the given width.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidShape`] for any width other than 64, 128,
    /// 256 or 512 bits.
    pub const fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            64 => Ok(Self::S64),
            128 => Ok(Self::S128),
            256 => Ok(Self::S256),
            512 => Ok(Self::S512),
            _ => Err(LaneError::InvalidShape { bits }),
        }
    }

    /// Returns the concrete shape this value stands for.
    #[inline]
    #[must_use]
    pub fn resolve(self) -> Self {
        match self {
            Self::Preferred => preferred_shape(),
            concrete => concrete,
        }
    }

    /// Returns true unless this is [`Shape::Preferred`].
    #[inline]
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, Self::Preferred)
    }

    /// Register width in bits.
    #[inline]
    #[must_use]
    pub fn bits(self) -> usize {
        match self.resolve() {
            Self::S64 => 64,
            Self::S128 => 128,
            Self::S256 => 256,
            // `resolve` never yields `Preferred`.
            Self::S512 | Self::Preferred => 512,
        }
    }

    /// Register width in bytes.
    #[inline]
    #[must_use]
    pub fn bytes(self) -> usize {
        self.bits() / 8
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preferred => write!(f, "preferred"),
            concrete => write!(f, "{}-bit", concrete.bits()),
        }
    }
}

/// Returns the process-wide preferred shape, resolving it on first call.
///
/// All preferred species share this shape, which makes them mutually
/// shape-compatible.
pub fn preferred_shape() -> Shape {
    *PREFERRED.get_or_init(resolve_preferred)
}

/// Fixes the preferred shape before it is first resolved.
///
/// Installing the shape that is already in effect is a no-op.
///
/// # Errors
///
/// Returns [`LaneError::PreferredShapeFixed`] if a different shape was
/// already resolved for this process.
pub fn set_preferred_shape(shape: Shape) -> Result<()> {
    // `Preferred` names whatever is (or will be) detected.
    let shape = match shape {
        Shape::Preferred => return Ok(()),
        concrete => concrete,
    };
    let current = *PREFERRED.get_or_init(|| {
        info!(bits = shape.bits(), source = "configured", "preferred shape resolved");
        shape
    });
    if current == shape {
        Ok(())
    } else {
        Err(LaneError::PreferredShapeFixed { current })
    }
}

fn resolve_preferred() -> Shape {
    if let Some(shape) = shape_from_env() {
        info!(bits = shape.bits(), source = "environment", "preferred shape resolved");
        return shape;
    }
    let features = CpuFeatures::detect();
    let shape = features.widest_shape();
    debug!(bits = shape.bits(), %features, source = "detected", "preferred shape resolved");
    shape
}

fn shape_from_env() -> Option<Shape> {
    let raw = std::env::var(PREFERRED_BITS_ENV).ok()?;
    match parse_bits(&raw) {
        Ok(shape) => Some(shape),
        Err(err) => {
            warn!(value = %raw, error = %err, "ignoring {PREFERRED_BITS_ENV}");
            None
        }
    }
}

fn parse_bits(raw: &str) -> Result<Shape> {
    let bits = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| LaneError::InvalidShape { bits: 0 })?;
    Shape::from_bits(bits)
}

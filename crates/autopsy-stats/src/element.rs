//! Floating-point element types accepted by the stats engine
//!
//! The engine is written once against [`StatElement`]. Each supported width
//! contributes a single impl; nothing in the accumulation path is specific
//! to `f32` or `f64`.

use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of an IEEE-754 element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    /// Size of one element in bytes
    pub fn byte_size(&self) -> usize {
        match self {
            FloatWidth::F32 => 4,
            FloatWidth::F64 => 8,
        }
    }

    /// Host-facing dtype name ("float32" / "float64")
    pub fn dtype_name(&self) -> &'static str {
        match self {
            FloatWidth::F32 => "float32",
            FloatWidth::F64 => "float64",
        }
    }

    /// Relative tolerance to use when comparing results computed at this width
    pub fn tolerance(&self) -> f64 {
        match self {
            FloatWidth::F32 => 1e-4,
            FloatWidth::F64 => 1e-10,
        }
    }
}

impl fmt::Display for FloatWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype_name())
    }
}

/// A floating-point type the stats engine can reduce over
pub trait StatElement: Float + fmt::Debug + Send + Sync + 'static {
    /// Width tag for this element type
    const WIDTH: FloatWidth;

    /// Widen to f64 for accumulation. Lossless for every supported width.
    fn widen(self) -> f64;
}

impl StatElement for f32 {
    const WIDTH: FloatWidth = FloatWidth::F32;

    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }
}

impl StatElement for f64 {
    const WIDTH: FloatWidth = FloatWidth::F64;

    #[inline]
    fn widen(self) -> f64 {
        self
    }
}

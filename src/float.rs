//! # Floating point numbers
//!
//! Floats are stored as their raw IEEE-754 bit patterns so that [`Value`]
//! is `Eq`, `Ord`, and `Hash` and can serve as a map key. Conversions to
//! and from the primitive float types go through [`From`] and [`TryFrom`]:
//!
//! ```
//! use jksn::prelude::*;
//! use std::convert::TryFrom;
//!
//! let single = Float::from(1f32);
//! assert_eq!(f32::try_from(single), Ok(1f32));
//!
//! let double = Float::from(1f64);
//! assert_eq!(f64::try_from(double), Ok(1f64));
//! ```
//!
//! [`Value`]: crate::Value

use std::convert::TryFrom;

#[derive(Eq, Copy, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// Floating point number variants
pub enum Float {
    /// Single precision float
    Single(u32),
    /// Double precision float
    Double(u64),
}

use Float::*;

// From impls
impl From<f32> for Float {
    fn from(f: f32) -> Self { Single(f.to_bits()) }
}

impl From<f64> for Float {
    fn from(f: f64) -> Self { Double(f.to_bits()) }
}

// TryFrom impls
impl TryFrom<Float> for f32 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Single(n) => Ok(Self::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl TryFrom<Float> for f64 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Double(n) => Ok(Self::from_bits(n)),
            _ => Err(f),
        }
    }
}

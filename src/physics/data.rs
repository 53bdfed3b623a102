//! Floating-point precision
//!
//! All builders and the advancer are generic over [`Real`], which is
//! implemented for `f32` and `f64`. Choosing the precision is a matter of
//! choosing the element type of the grid and of the solution matrix:
//!
//! ```rust
//! use findiff_rs::physics::{Precision, Real};
//!
//! assert_eq!(<f32 as Real>::PRECISION, Precision::Single);
//! assert_eq!(<f64 as Real>::PRECISION.bytes(), 8);
//! ```

use nalgebra::RealField;
use std::fmt;

/// Element width tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 32-bit IEEE-754
    Single,

    /// 64-bit IEEE-754
    Double,
}

impl Precision {
    /// Size of one element in bytes
    pub fn bytes(&self) -> usize {
        match self {
            Precision::Single => 4,
            Precision::Double => 8,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Single => write!(f, "f32"),
            Precision::Double => write!(f, "f64"),
        }
    }
}

/// Scalar type accepted by the engine
///
/// Boundary values and Butcher coefficients are stored as `f64` and brought
/// to the working precision with [`Real::constant`].
pub trait Real: RealField + Copy {
    /// Precision tag of this type
    const PRECISION: Precision;

    /// Convert an `f64` constant to this precision
    fn constant(value: f64) -> Self {
        nalgebra::convert(value)
    }

    /// Widen to `f64` (used for diagnostics and tolerance checks)
    fn to_f64(self) -> f64;
}

impl Real for f32 {
    const PRECISION: Precision = Precision::Single;

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    const PRECISION: Precision = Precision::Double;

    fn to_f64(self) -> f64 {
        self
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_tags() {
        assert_eq!(<f32 as Real>::PRECISION.bytes(), 4);
        assert_eq!(<f64 as Real>::PRECISION.bytes(), 8);
        assert_eq!(format!("{}", Precision::Single), "f32");
        assert_eq!(format!("{}", Precision::Double), "f64");
    }

    #[test]
    fn test_constant_conversion() {
        let third = <f32 as Real>::constant(1.0 / 3.0);
        assert!((third - 0.333_333_34_f32).abs() < 1e-7);
        assert_eq!(<f64 as Real>::constant(0.25), 0.25);
        assert_eq!(2.5_f32.to_f64(), 2.5);
    }
}

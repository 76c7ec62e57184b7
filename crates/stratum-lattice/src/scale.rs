//! Quantities that scale with the code parameter `k`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `slope * k + offset`, with integer coefficients.
///
/// Used both for template shapes and for the number of repetitions of a
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinearFunction {
    /// Coefficient of `k`.
    pub slope: i64,
    /// Constant term.
    pub offset: i64,
}

impl LinearFunction {
    /// Create a new linear function.
    pub const fn new(slope: i64, offset: i64) -> Self {
        Self { slope, offset }
    }

    /// A function that does not depend on `k`.
    pub const fn constant(value: i64) -> Self {
        Self::new(0, value)
    }

    /// Evaluate the function at `k`.
    pub fn call(&self, k: u32) -> i64 {
        self.slope * i64::from(k) + self.offset
    }

    /// Multiply both coefficients by `factor`.
    #[must_use]
    pub const fn scaled(&self, factor: i64) -> Self {
        Self::new(self.slope * factor, self.offset * factor)
    }
}

impl fmt::Display for LinearFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*k + {}", self.slope, self.offset)
    }
}

/// A 2D shape whose sides scale linearly with `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scalable2D {
    /// Number of columns.
    pub width: LinearFunction,
    /// Number of rows.
    pub height: LinearFunction,
}

impl Scalable2D {
    /// Create a new scalable shape.
    pub const fn new(width: LinearFunction, height: LinearFunction) -> Self {
        Self { width, height }
    }

    /// Concrete `(rows, columns)` at `k`, clamped at zero.
    pub fn to_shape(&self, k: u32) -> (usize, usize) {
        let clamp = |v: i64| usize::try_from(v.max(0)).unwrap_or(usize::MAX);
        (clamp(self.height.call(k)), clamp(self.width.call(k)))
    }
}

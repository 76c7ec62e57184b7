//! Grid qubits and 2D positions.
//!
//! Three coordinate systems coexist:
//!
//! - [`GridQubit`]: physical qubit coordinates,
//! - [`PlaquettePosition2D`]: a cell of a template instantiation,
//! - [`BlockPosition2D`]: a block of a layout, one template instantiation wide.
//!
//! Moving between them goes through [`Shift2D`] and the template increments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A 2D integer displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Shift2D {
    /// Displacement along the first axis.
    pub x: i32,
    /// Displacement along the second axis.
    pub y: i32,
}

impl Shift2D {
    /// Create a new shift.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Shift2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shift2D({}, {})", self.x, self.y)
    }
}

/// A qubit placed on a 2-dimensional grid.
///
/// Qubits are totally ordered by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridQubit {
    /// Coordinate in the first spatial dimension.
    pub x: i32,
    /// Coordinate in the second spatial dimension.
    pub y: i32,
}

impl GridQubit {
    /// Create a new grid qubit.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the qubit by `(dx, dy)`.
    #[must_use]
    pub const fn offset_by(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add<Shift2D> for GridQubit {
    type Output = GridQubit;

    fn add(self, shift: Shift2D) -> GridQubit {
        self.offset_by(shift.x, shift.y)
    }
}

impl Sub<Shift2D> for GridQubit {
    type Output = GridQubit;

    fn sub(self, shift: Shift2D) -> GridQubit {
        self.offset_by(-shift.x, -shift.y)
    }
}

impl Mul<i32> for GridQubit {
    type Output = GridQubit;

    fn mul(self, factor: i32) -> GridQubit {
        GridQubit::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for GridQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q[{}, {}]", self.x, self.y)
    }
}

/// Position of a plaquette (a cell) in a template instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PlaquettePosition2D {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl PlaquettePosition2D {
    /// Create a new plaquette position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Position of a block in a 2D layout of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockPosition2D {
    /// Column of the block.
    pub x: i32,
    /// Row of the block.
    pub y: i32,
}

impl BlockPosition2D {
    /// Create a new block position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for BlockPosition2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({}, {})", self.x, self.y)
    }
}

//! Measurements and detector coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::GridQubit;

/// A single classical outcome, addressed relative to the end of a qubit's
/// measurement history.
///
/// `offset == -1` is the most recent measurement of `qubit`, `-2` the one
/// before, and so on. Offsets are always strictly negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMeasurement")]
pub struct Measurement {
    qubit: GridQubit,
    offset: i32,
}

#[derive(Deserialize)]
struct RawMeasurement {
    qubit: GridQubit,
    offset: i32,
}

impl TryFrom<RawMeasurement> for Measurement {
    type Error = IrError;

    fn try_from(raw: RawMeasurement) -> IrResult<Self> {
        Measurement::new(raw.qubit, raw.offset)
    }
}

impl Measurement {
    /// Create a measurement, rejecting non-negative offsets.
    pub fn new(qubit: GridQubit, offset: i32) -> IrResult<Self> {
        if offset >= 0 {
            return Err(IrError::InvalidMeasurementOffset { offset });
        }
        Ok(Self { qubit, offset })
    }

    /// The measured qubit.
    pub fn qubit(&self) -> GridQubit {
        self.qubit
    }

    /// The (negative) offset into the qubit's measurement history.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Translate the measured qubit by `(dx, dy)`.
    #[must_use]
    pub fn offset_spatially_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            qubit: self.qubit.offset_by(dx, dy),
            offset: self.offset,
        }
    }

    /// Move the measurement `dt` records further back (negative `dt`) or
    /// forward (positive `dt`) in time.
    pub fn offset_temporally_by(&self, dt: i32) -> IrResult<Self> {
        Self::new(self.qubit, self.offset + dt)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M[{}, {}]", self.qubit, self.offset)
    }
}

/// Annotation coordinates attached to a detector.
///
/// `t` is optional: spatial-only detectors carry two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpatialCoordinates {
    /// First spatial coordinate.
    pub x: i32,
    /// Second spatial coordinate.
    pub y: i32,
    /// Optional time coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<i32>,
}

impl SpatialCoordinates {
    /// Two-coordinate annotation.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, t: None }
    }

    /// Three-coordinate annotation.
    pub const fn with_time(x: i32, y: i32, t: i32) -> Self {
        Self { x, y, t: Some(t) }
    }

    /// Translate the spatial part; `t` is left untouched.
    #[must_use]
    pub const fn offset_spatially_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            t: self.t,
        }
    }

    /// The coordinates as instruction arguments.
    pub fn to_args(&self) -> Vec<i32> {
        let mut args = vec![self.x, self.y];
        args.extend(self.t);
        args
    }
}

impl fmt::Display for SpatialCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.t {
            Some(t) => write!(f, "({}, {}, {t})", self.x, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

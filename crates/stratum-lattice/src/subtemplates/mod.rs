//! Enumeration of distinct local neighbourhoods of an instantiation.
//!
//! A *subtemplate* is the square window of side `2r + 1` centred on a cell
//! of a template instantiation, `r` being the Manhattan radius. Cells with
//! equal windows see the same local environment, so anything computed for
//! one of them (detectors, in practice) can be reused for all of them up to
//! a translation.

pub mod spatial;
pub mod temporal;

pub use spatial::{UniqueSubtemplates, get_spatially_distinct_subtemplates};
pub use temporal::{Unique3DSubtemplates, get_spatially_distinct_3d_subtemplates};

use crate::error::{LatticeError, LatticeResult};

/// A 2D subtemplate: a square window of plaquette indices.
pub type Subtemplate = ndarray::Array2<u32>;

/// Check that every `(rows, cols)` spatial shape is square, odd and shared.
///
/// Returns the common side, or `None` when there is no shape at all.
pub(crate) fn common_odd_square_side(
    shapes: impl IntoIterator<Item = (usize, usize)>,
) -> LatticeResult<Option<usize>> {
    let mut side = None;
    for (rows, cols) in shapes {
        if rows != cols {
            return Err(LatticeError::Shape(format!(
                "subtemplates should be square, found shape ({rows}, {cols})"
            )));
        }
        if rows % 2 == 0 {
            return Err(LatticeError::Shape(format!(
                "subtemplates should have an odd side, found {rows}"
            )));
        }
        match side {
            None => side = Some(rows),
            Some(s) if s != rows => {
                return Err(LatticeError::Shape(format!(
                    "all subtemplates should share the same shape, found sides {s} and {rows}"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(side)
}

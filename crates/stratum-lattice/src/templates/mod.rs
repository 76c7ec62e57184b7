//! Scalable templates.
//!
//! A template turns the scale parameter `k` into a 2D array of plaquette
//! indices (its *instantiation*). Index `0` marks an empty cell; any other
//! index is resolved through a [`Plaquettes`](crate::plaquette::Plaquettes)
//! collection by the caller.

pub mod fixed;
pub mod layout;
pub mod qubit;

pub use fixed::FixedTemplate;
pub use layout::LayoutTemplate;
pub use qubit::QubitTemplate;

use ndarray::Array2;
use std::fmt::Debug;

use stratum_ir::{PlaquettePosition2D, Shift2D};

use crate::error::{LatticeError, LatticeResult};
use crate::plaquette::library::CELL_INCREMENTS;
use crate::scale::Scalable2D;

/// A scalable 2D arrangement of plaquette indices.
pub trait Template: Debug + Send + Sync {
    /// Generate the instantiation at scale `k`.
    ///
    /// `plaquette_indices`, when given, renames the template's default
    /// indices `1..=expected_plaquettes_number()` by position: default index
    /// `i` becomes `plaquette_indices[i - 1]`.
    fn instantiate(&self, k: u32, plaquette_indices: Option<&[u32]>) -> LatticeResult<Array2<u32>>;

    /// Shape of the instantiation as a function of `k`.
    fn scalable_shape(&self) -> Scalable2D;

    /// Number of distinct non-zero indices the template uses.
    fn expected_plaquettes_number(&self) -> usize;

    /// Qubit displacement between two neighbouring cells.
    fn get_increments(&self) -> Shift2D {
        CELL_INCREMENTS
    }

    /// Position of the top-left cell, in cell units.
    fn instantiation_origin(&self, _k: u32) -> PlaquettePosition2D {
        PlaquettePosition2D::new(0, 0)
    }
}

/// Resolve the indices a template should write: the caller's, or `1..=n`.
pub(crate) fn resolve_indices(
    expected: usize,
    plaquette_indices: Option<&[u32]>,
) -> LatticeResult<Vec<u32>> {
    match plaquette_indices {
        Some(indices) if indices.len() != expected => Err(LatticeError::PlaquetteIndexCount {
            expected,
            got: indices.len(),
        }),
        Some(indices) => Ok(indices.to_vec()),
        None => Ok((1..).take(expected).collect()),
    }
}

//! The square template of one logical qubit.

use ndarray::Array2;

use super::{Template, resolve_indices};
use crate::error::LatticeResult;
use crate::scale::{LinearFunction, Scalable2D};

/// A `(2k + 2) x (2k + 2)` square with 14 default indices.
///
/// ```text
/// 1  5  6  5  6  2
/// 7  9 10  9 10 11
/// 8 10  9 10  9 12
/// 7  9 10  9 10 11
/// 8 10  9 10  9 12
/// 3 13 14 13 14  4
/// ```
///
/// Indices 1 to 4 are the corners, 5 to 8 and 11 to 14 alternate along the
/// four sides and 9/10 form the bulk checkerboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QubitTemplate;

impl QubitTemplate {
    /// Create the template.
    pub fn new() -> Self {
        Self
    }
}

impl Template for QubitTemplate {
    fn instantiate(&self, k: u32, plaquette_indices: Option<&[u32]>) -> LatticeResult<Array2<u32>> {
        let ret = resolve_indices(self.expected_plaquettes_number(), plaquette_indices)?;
        let idx = |default: usize| ret[default - 1];
        let size = 2 * k as usize + 2;
        let last = size - 1;

        Ok(Array2::from_shape_fn((size, size), |(row, col)| {
            let even_col = col % 2 == 0;
            let odd_row = row % 2 == 1;
            match (row, col) {
                (0, 0) => idx(1),
                (0, c) if c == last => idx(2),
                (r, 0) if r == last => idx(3),
                (r, c) if r == last && c == last => idx(4),
                (0, _) => idx(if even_col { 6 } else { 5 }),
                (r, _) if r == last => idx(if even_col { 14 } else { 13 }),
                (_, 0) => idx(if odd_row { 7 } else { 8 }),
                (_, c) if c == last => idx(if odd_row { 11 } else { 12 }),
                _ => match (odd_row, even_col) {
                    (true, false) | (false, true) => idx(9),
                    _ => idx(10),
                },
            }
        }))
    }

    fn scalable_shape(&self) -> Scalable2D {
        let side = LinearFunction::new(2, 2);
        Scalable2D::new(side, side)
    }

    fn expected_plaquettes_number(&self) -> usize {
        14
    }
}

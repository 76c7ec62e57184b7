//! A template that does not scale.

use ndarray::Array2;

use super::{Template, resolve_indices};
use crate::error::{LatticeError, LatticeResult};
use crate::scale::{LinearFunction, Scalable2D};

/// A constant arrangement of indices, identical for every `k`.
///
/// The non-zero values of the array must be exactly `1..=n` for some `n`;
/// custom indices rename them positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTemplate {
    indices: Array2<u32>,
    num_plaquettes: usize,
}

impl FixedTemplate {
    /// Create a fixed template, checking its indices are `0..=n` with every
    /// value in `1..=n` used.
    pub fn new(indices: Array2<u32>) -> LatticeResult<Self> {
        let max = indices.iter().copied().max().unwrap_or(0) as usize;
        let mut used = vec![false; max + 1];
        for &i in &indices {
            used[i as usize] = true;
        }
        if let Some(missing) = used.iter().skip(1).position(|&u| !u) {
            return Err(LatticeError::InvalidTemplate(format!(
                "index {} is not used although {max} is",
                missing + 1
            )));
        }
        Ok(Self {
            indices,
            num_plaquettes: max,
        })
    }

    /// The stored indices.
    pub fn indices(&self) -> &Array2<u32> {
        &self.indices
    }
}

impl Template for FixedTemplate {
    fn instantiate(
        &self,
        _k: u32,
        plaquette_indices: Option<&[u32]>,
    ) -> LatticeResult<Array2<u32>> {
        let ret = resolve_indices(self.num_plaquettes, plaquette_indices)?;
        Ok(self
            .indices
            .mapv(|i| if i == 0 { 0 } else { ret[i as usize - 1] }))
    }

    fn scalable_shape(&self) -> Scalable2D {
        let (rows, cols) = self.indices.dim();
        Scalable2D::new(
            LinearFunction::constant(cols as i64),
            LinearFunction::constant(rows as i64),
        )
    }

    fn expected_plaquettes_number(&self) -> usize {
        self.num_plaquettes
    }
}

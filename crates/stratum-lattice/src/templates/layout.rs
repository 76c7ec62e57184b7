//! Templates placed side by side on a grid of blocks.

use ndarray::{Array2, s};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use stratum_ir::{BlockPosition2D, PlaquettePosition2D, Shift2D};

use super::{Template, resolve_indices};
use crate::error::{LatticeError, LatticeResult};
use crate::scale::Scalable2D;

/// Several templates sharing one scalable shape, each placed at a
/// [`BlockPosition2D`].
///
/// Each element keeps its own index space; the layout renumbers them into a
/// single global space, walking positions in order. Cells of the bounding
/// box not covered by any element are `0`.
#[derive(Debug, Clone)]
pub struct LayoutTemplate {
    layout: BTreeMap<BlockPosition2D, Arc<dyn Template>>,
    element_shape: Scalable2D,
    increments: Shift2D,
    min: BlockPosition2D,
    max: BlockPosition2D,
}

impl LayoutTemplate {
    /// Build a layout from templates placed at block positions.
    pub fn new(layout: BTreeMap<BlockPosition2D, Arc<dyn Template>>) -> LatticeResult<Self> {
        let mut elements = layout.iter();
        let Some((_, first)) = elements.next() else {
            return Err(LatticeError::EmptyLayout);
        };
        let element_shape = first.scalable_shape();
        let increments = first.get_increments();

        for (&position, template) in elements {
            if template.scalable_shape() != element_shape {
                return Err(LatticeError::LayoutShapeMismatch {
                    position,
                    what: "scalable shape",
                });
            }
            if template.get_increments() != increments {
                return Err(LatticeError::LayoutShapeMismatch {
                    position,
                    what: "increments",
                });
            }
        }

        let min = BlockPosition2D::new(
            layout.keys().map(|p| p.x).min().unwrap_or(0),
            layout.keys().map(|p| p.y).min().unwrap_or(0),
        );
        let max = BlockPosition2D::new(
            layout.keys().map(|p| p.x).max().unwrap_or(0),
            layout.keys().map(|p| p.y).max().unwrap_or(0),
        );
        debug!(
            "Layout of {} templates spanning {} to {}",
            layout.len(),
            min,
            max
        );

        Ok(Self {
            layout,
            element_shape,
            increments,
            min,
            max,
        })
    }

    /// The templates of the layout, by position.
    pub fn element_layouts(&self) -> &BTreeMap<BlockPosition2D, Arc<dyn Template>> {
        &self.layout
    }

    /// Shape shared by every element.
    pub fn element_shape(&self) -> Scalable2D {
        self.element_shape
    }

    /// Number of blocks along `(x, y)` in the bounding box.
    fn blocks_span(&self) -> (usize, usize) {
        let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo) + 1) as usize;
        (span(self.min.x, self.max.x), span(self.min.y, self.max.y))
    }

    /// For each element, the mapping from its own indices to the global
    /// indices used in the layout instantiation.
    pub fn get_indices_map_for_instantiation(
        &self,
    ) -> BTreeMap<BlockPosition2D, BTreeMap<u32, u32>> {
        let mut next = 1u32;
        self.layout
            .iter()
            .map(|(&position, template)| {
                let n = template.expected_plaquettes_number() as u32;
                let mapping = (1..=n).map(|i| (i, next + i - 1)).collect();
                next += n;
                (position, mapping)
            })
            .collect()
    }
}

impl Template for LayoutTemplate {
    fn instantiate(&self, k: u32, plaquette_indices: Option<&[u32]>) -> LatticeResult<Array2<u32>> {
        let global = resolve_indices(self.expected_plaquettes_number(), plaquette_indices)?;
        let (rows, cols) = self.element_shape.to_shape(k);
        let (nx, ny) = self.blocks_span();
        let mut ret = Array2::zeros((ny * rows, nx * cols));

        let mut consumed = 0;
        for (position, template) in &self.layout {
            let n = template.expected_plaquettes_number();
            let element = template.instantiate(k, Some(&global[consumed..consumed + n]))?;
            consumed += n;

            let r0 = (position.y - self.min.y) as usize * rows;
            let c0 = (position.x - self.min.x) as usize * cols;
            ret.slice_mut(s![r0..r0 + rows, c0..c0 + cols])
                .assign(&element);
        }
        Ok(ret)
    }

    fn scalable_shape(&self) -> Scalable2D {
        let (nx, ny) = self.blocks_span();
        Scalable2D::new(
            self.element_shape.width.scaled(nx as i64),
            self.element_shape.height.scaled(ny as i64),
        )
    }

    fn expected_plaquettes_number(&self) -> usize {
        self.layout
            .values()
            .map(|t| t.expected_plaquettes_number())
            .sum()
    }

    fn get_increments(&self) -> Shift2D {
        self.increments
    }

    fn instantiation_origin(&self, k: u32) -> PlaquettePosition2D {
        let (rows, cols) = self.element_shape.to_shape(k);
        PlaquettePosition2D::new(self.min.x * cols as i32, self.min.y * rows as i32)
    }
}

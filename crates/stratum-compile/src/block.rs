//! Compiled blocks and their composition into a layout.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use stratum_ir::{BlockPosition2D, Circuit, Shift2D};
use stratum_lattice::{LayoutTemplate, Plaquette, Plaquettes, Template};

use crate::error::{CompileError, CompileResult};
use crate::generation::generate_circuit;

/// A block of the computation: a template and the plaquettes of each of its
/// time layers.
///
/// Cubes and spatial pipes have 3 layers (initialisation, repeated memory,
/// readout); temporal pipes have 2.
#[derive(Debug, Clone)]
pub struct CompiledBlock {
    template: Arc<dyn Template>,
    layers: Vec<Plaquettes>,
}

impl CompiledBlock {
    /// Create a block.
    pub fn new(template: Arc<dyn Template>, layers: Vec<Plaquettes>) -> Self {
        Self { template, layers }
    }

    /// The block's template.
    pub fn template(&self) -> &Arc<dyn Template> {
        &self.template
    }

    /// The layers, oldest first.
    pub fn layers(&self) -> &[Plaquettes] {
        &self.layers
    }

    /// Number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Override plaquettes of some layers.
    ///
    /// Keys are layer indices, negative ones counting from the end. Every
    /// index is checked before any layer changes. The targeted layers keep
    /// their default and repetitions.
    pub fn update_layers(&mut self, updates: &BTreeMap<isize, Plaquettes>) -> CompileResult<()> {
        let num_layers = self.num_layers();
        let resolved = updates
            .iter()
            .map(|(&index, plaquettes)| {
                let absolute = if index < 0 {
                    index + num_layers as isize
                } else {
                    index
                };
                usize::try_from(absolute)
                    .ok()
                    .filter(|&i| i < num_layers)
                    .map(|i| (i, plaquettes))
                    .ok_or(CompileError::LayerIndexOutOfRange { index, num_layers })
            })
            .collect::<CompileResult<Vec<_>>>()?;

        for (i, plaquettes) in resolved {
            self.layers[i] = self.layers[i]
                .with_updated_plaquettes(plaquettes.collection().entries());
        }
        Ok(())
    }
}

/// Blocks placed on a 2D grid, merged into a single template and a single
/// list of layers.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    template: LayoutTemplate,
    layers: Vec<Plaquettes>,
}

impl BlockLayout {
    /// Merge the given blocks.
    ///
    /// All blocks must have the same number of layers, and layers at the same
    /// index must share their repetitions (all unrepeated, or all repeated
    /// the same number of times). Nothing is built unless both hold.
    #[instrument(skip_all, fields(blocks = blocks.len()))]
    pub fn new(blocks: &BTreeMap<BlockPosition2D, CompiledBlock>) -> CompileResult<Self> {
        let Some(first) = blocks.values().next() else {
            return Err(CompileError::EmptyLayout);
        };
        let num_layers = first.num_layers();

        if let Some(block) = blocks.values().find(|b| b.num_layers() != num_layers) {
            return Err(CompileError::LayerCountMismatch {
                expected: num_layers,
                got: block.num_layers(),
            });
        }
        for (layer, reference) in first.layers.iter().enumerate() {
            if blocks
                .values()
                .any(|b| !b.layers[layer].is_repetition_compatible(reference))
            {
                return Err(CompileError::RepetitionConflict { layer });
            }
        }

        let template = LayoutTemplate::new(
            blocks
                .iter()
                .map(|(&position, block)| (position, Arc::clone(&block.template)))
                .collect(),
        )?;
        let indices_map = template.get_indices_map_for_instantiation();

        let mut layers = Vec::with_capacity(num_layers);
        for (layer, reference) in first.layers.iter().enumerate() {
            let mut merged: BTreeMap<u32, Plaquette> = BTreeMap::new();
            for (position, block) in blocks {
                let local_to_global = &indices_map[position];
                for (&index, plaquette) in block.layers[layer].collection().iter() {
                    let global = local_to_global.get(&index).ok_or(
                        CompileError::UnmappedPlaquetteIndex {
                            position: *position,
                            index,
                        },
                    )?;
                    merged.insert(*global, plaquette.clone());
                }
            }
            debug!("Layer {} merges {} plaquettes", layer, merged.len());

            let plaquettes = Plaquettes::from_entries(merged);
            layers.push(match reference.repetitions() {
                Some(repetitions) => plaquettes.repeat(repetitions),
                None => plaquettes,
            });
        }

        info!(
            "Merged {} blocks into a layout with {} layers",
            blocks.len(),
            layers.len()
        );
        Ok(Self { template, layers })
    }

    /// The merged template.
    pub fn template(&self) -> &LayoutTemplate {
        &self.template
    }

    /// The merged layers.
    pub fn layers(&self) -> &[Plaquettes] {
        &self.layers
    }

    /// Number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Generate the circuit of every layer at scale `k`, in global qubit
    /// coordinates.
    ///
    /// The layout template is instantiated from its top-left block, so each
    /// circuit is translated by the instantiation origin times the
    /// increments.
    pub fn get_shifted_circuits(&self, k: u32) -> CompileResult<Vec<Circuit>> {
        let origin = self.template.instantiation_origin(k);
        let increments = self.template.get_increments();
        let offset = Shift2D::new(origin.x * increments.x, origin.y * increments.y);

        self.layers
            .iter()
            .map(|layer| {
                generate_circuit(&self.template, k, layer).map(|circuit| circuit.shifted_by(offset))
            })
            .collect()
    }
}

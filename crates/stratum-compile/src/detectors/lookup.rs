//! Placing cached detectors on a layered instantiation.

use ndarray::{Axis, s};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

use stratum_ir::Shift2D;
use stratum_lattice::{LatticeError, Plaquettes, Subtemplate, Unique3DSubtemplates};

use super::database::DetectorDatabase;
use super::detector::Detector;
use crate::error::{CompileError, CompileResult};

/// Outcome of [`lookup_detectors`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorLookup {
    /// Detectors found in the database, placed at every matching cell.
    pub detectors: BTreeSet<Detector>,
    /// Id tuples of the 3D subtemplates the database knows nothing about.
    pub missing: Vec<Vec<usize>>,
}

impl DetectorLookup {
    /// Check if every situation was found.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Look up the detectors of every distinct 3D subtemplate and translate them
/// to each cell where that subtemplate occurs.
///
/// `plaquettes_by_slice` gives the plaquettes of each time slice of
/// `subtemplates`. A detector stored for a situation is moved by
/// `(col * increments.x, row * increments.y)` for the cell at `(row, col)`.
#[instrument(skip_all, fields(situations = subtemplates.len()))]
pub fn lookup_detectors(
    database: &DetectorDatabase,
    subtemplates: &Unique3DSubtemplates,
    plaquettes_by_slice: &[Plaquettes],
    increments: Shift2D,
) -> CompileResult<DetectorLookup> {
    let t = subtemplates.num_time_slices();
    if plaquettes_by_slice.len() != t {
        return Err(CompileError::LengthMismatch {
            subtemplates: t,
            plaquettes: plaquettes_by_slice.len(),
        });
    }

    let indices = subtemplates.subtemplate_indices();
    let (rows, cols, _) = indices.dim();
    let mut cells: BTreeMap<Vec<usize>, Vec<(usize, usize)>> = BTreeMap::new();
    for row in 0..rows {
        for col in 0..cols {
            let key = indices.slice(s![row, col, ..]).to_vec();
            if key.iter().any(|&id| id != 0) {
                cells.entry(key).or_default().push((row, col));
            }
        }
    }

    let mut lookup = DetectorLookup::default();
    for (key, positions) in cells {
        let stacked = subtemplates
            .get(&key)
            .ok_or_else(|| LatticeError::UnknownSubtemplate { id: key.clone() })?;
        let windows: Vec<Subtemplate> = stacked
            .axis_iter(Axis(2))
            .map(|window| window.to_owned())
            .collect();

        let Some(detectors) = database.get_detectors(&windows, plaquettes_by_slice)? else {
            debug!("No detectors stored for subtemplate {:?}", key);
            lookup.missing.push(key);
            continue;
        };
        for &(row, col) in &positions {
            let dx = col as i32 * increments.x;
            let dy = row as i32 * increments.y;
            lookup
                .detectors
                .extend(detectors.iter().map(|d| d.offset_spatially_by(dx, dy)));
        }
    }

    info!(
        "Placed {} detectors, {} situations missing from the database",
        lookup.detectors.len(),
        lookup.missing.len()
    );
    Ok(lookup)
}

//! Distinct subtemplates across consecutive time slices.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::common_odd_square_side;
use super::spatial::{UniqueSubtemplates, get_spatially_distinct_subtemplates};
use crate::error::{LatticeError, LatticeResult};

/// Distinct space-time neighbourhoods of a sequence of instantiations.
///
/// `subtemplate_indices` has shape `(rows, cols, t)`: the lane at `(i, j)`
/// holds the per-slice 2D subtemplate ids of cell `(i, j)`. Each distinct
/// non-zero lane is a key of `subtemplates`, whose values stack the
/// corresponding 2D windows along the last axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unique3DSubtemplates {
    subtemplate_indices: Array3<usize>,
    subtemplates: BTreeMap<Vec<usize>, Array3<u32>>,
}

impl Unique3DSubtemplates {
    /// Build the structure, checking key lengths, coverage of every
    /// non-zero lane and the shape of every stored subtemplate.
    pub fn new(
        subtemplate_indices: Array3<usize>,
        subtemplates: BTreeMap<Vec<usize>, Array3<u32>>,
    ) -> LatticeResult<Self> {
        let t = subtemplate_indices.len_of(Axis(2));

        if let Some(key) = subtemplates.keys().find(|key| key.len() != t) {
            return Err(LatticeError::Shape(format!(
                "subtemplate key {key:?} should have one id per time slice ({t})"
            )));
        }
        for lane in subtemplate_indices.lanes(Axis(2)) {
            if lane.iter().any(|&id| id != 0) {
                let key = lane.to_vec();
                if !subtemplates.contains_key(&key) {
                    return Err(LatticeError::UnknownSubtemplate { id: key });
                }
            }
        }
        if let Some(s) = subtemplates.values().find(|s| s.len_of(Axis(2)) != t) {
            return Err(LatticeError::Shape(format!(
                "3D subtemplates should have {t} time slices, found {}",
                s.len_of(Axis(2))
            )));
        }
        common_odd_square_side(
            subtemplates
                .values()
                .map(|s| (s.len_of(Axis(0)), s.len_of(Axis(1)))),
        )?;

        Ok(Self {
            subtemplate_indices,
            subtemplates,
        })
    }

    /// Per-slice subtemplate ids of every cell.
    pub fn subtemplate_indices(&self) -> &Array3<usize> {
        &self.subtemplate_indices
    }

    /// Distinct 3D subtemplates by id tuple.
    pub fn subtemplates(&self) -> &BTreeMap<Vec<usize>, Array3<u32>> {
        &self.subtemplates
    }

    /// The 3D subtemplate with the given id tuple.
    pub fn get(&self, key: &[usize]) -> Option<&Array3<u32>> {
        self.subtemplates.get(key)
    }

    /// Number of time slices.
    pub fn num_time_slices(&self) -> usize {
        self.subtemplate_indices.len_of(Axis(2))
    }

    /// Number of distinct 3D subtemplates.
    pub fn len(&self) -> usize {
        self.subtemplates.len()
    }

    /// Check if no 3D subtemplate was found.
    pub fn is_empty(&self) -> bool {
        self.subtemplates.is_empty()
    }

    /// Radius of the stored subtemplates, `None` if there is none.
    pub fn manhattan_radius(&self) -> Option<usize> {
        self.subtemplates.values().next().map(|s| s.len_of(Axis(0)) / 2)
    }
}

/// Find the distinct space-time neighbourhoods of `instantiations`, one
/// instantiation per time slice.
///
/// Every slice goes through [`get_spatially_distinct_subtemplates`] without
/// skipping empty cells, then cells are grouped by their tuple of per-slice
/// ids. Tuples made only of zeros are dropped. All slices must share one
/// shape and are assumed to share their origin.
#[instrument(skip(instantiations), fields(slices = instantiations.len()))]
pub fn get_spatially_distinct_3d_subtemplates(
    instantiations: &[Array2<u32>],
    manhattan_radius: usize,
) -> LatticeResult<Unique3DSubtemplates> {
    let Some(first) = instantiations.first() else {
        return Err(LatticeError::Shape(
            "at least one instantiation is needed to compute 3D subtemplates".into(),
        ));
    };
    if let Some(other) = instantiations.iter().find(|i| i.dim() != first.dim()) {
        return Err(LatticeError::Shape(format!(
            "all instantiations should have the same shape, found {:?} and {:?}",
            first.dim(),
            other.dim()
        )));
    }

    let per_slice = instantiations
        .iter()
        .map(|instantiation| {
            get_spatially_distinct_subtemplates(instantiation.view(), manhattan_radius, false)
        })
        .collect::<LatticeResult<Vec<UniqueSubtemplates>>>()?;

    let views: Vec<ArrayView2<'_, usize>> = per_slice
        .iter()
        .map(|unique| unique.subtemplate_indices().view())
        .collect();
    let subtemplate_indices = ndarray::stack(Axis(2), &views)?;

    let side = 2 * manhattan_radius + 1;
    let t = instantiations.len();
    let mut subtemplates = BTreeMap::new();
    for lane in subtemplate_indices.lanes(Axis(2)) {
        let key = lane.to_vec();
        if key.iter().all(|&id| id == 0) || subtemplates.contains_key(&key) {
            continue;
        }
        let mut stacked = Array3::<u32>::zeros((side, side, t));
        for (slice, &id) in key.iter().enumerate() {
            if id == 0 {
                continue;
            }
            let window = per_slice[slice]
                .get(id)
                .ok_or_else(|| LatticeError::UnknownSubtemplate { id: vec![id] })?;
            stacked.index_axis_mut(Axis(2), slice).assign(window);
        }
        subtemplates.insert(key, stacked);
    }

    debug!(
        "Found {} distinct 3D subtemplates over {} slices",
        subtemplates.len(),
        t
    );
    Unique3DSubtemplates::new(subtemplate_indices, subtemplates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, s};

    #[test]
    fn test_identical_slices() {
        let slice = array![[1, 2], [2, 1]];
        let unique =
            get_spatially_distinct_3d_subtemplates(&[slice.clone(), slice.clone()], 0).unwrap();

        assert_eq!(unique.num_time_slices(), 2);
        assert_eq!(unique.len(), 2);
        for (key, subtemplate) in unique.subtemplates() {
            assert_eq!(key[0], key[1]);
            assert_eq!(
                subtemplate.slice(s![.., .., 0]),
                subtemplate.slice(s![.., .., 1])
            );
        }
    }

    #[test]
    fn test_slices_refine_each_other() {
        let first = array![[1, 1, 1]];
        let second = array![[1, 2, 1]];
        let unique = get_spatially_distinct_3d_subtemplates(&[first, second], 0).unwrap();

        // Radius 0: slice one has a single window, slice two has two.
        assert_eq!(unique.len(), 2);
        let corner = unique.subtemplate_indices().slice(s![0, 0, ..]).to_vec();
        let middle = unique.subtemplate_indices().slice(s![0, 1, ..]).to_vec();
        assert_ne!(corner, middle);
        assert_eq!(unique.get(&middle).unwrap()[[0, 0, 1]], 2);
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            get_spatially_distinct_3d_subtemplates(&[], 1),
            Err(LatticeError::Shape(_))
        ));
        assert!(matches!(
            get_spatially_distinct_3d_subtemplates(&[array![[1, 2]], array![[1], [2]]], 1),
            Err(LatticeError::Shape(_))
        ));
    }

    #[test]
    fn test_validation_requires_every_lane() {
        let indices = Array3::from_shape_vec((1, 1, 2), vec![1, 0]).unwrap();
        assert!(matches!(
            Unique3DSubtemplates::new(indices, BTreeMap::new()),
            Err(LatticeError::UnknownSubtemplate { .. })
        ));
    }

    #[test]
    fn test_stored_shape_gives_radius() {
        let indices = Array3::from_shape_vec((1, 1, 2), vec![1, 1]).unwrap();
        let square = BTreeMap::from([(vec![1, 1], Array3::<u32>::zeros((5, 5, 2)))]);
        let unique = Unique3DSubtemplates::new(indices.clone(), square).unwrap();
        assert_eq!(unique.manhattan_radius(), Some(2));

        let flat = BTreeMap::from([(vec![1, 1], Array3::<u32>::zeros((3, 5, 2)))]);
        assert!(matches!(
            Unique3DSubtemplates::new(indices, flat),
            Err(LatticeError::Shape(_))
        ));
    }
}

//! Spatially distinct subtemplates of a single instantiation.

use ndarray::{Array2, ArrayView2, s};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::{Subtemplate, common_odd_square_side};
use crate::error::{LatticeError, LatticeResult};

/// The distinct subtemplates of an instantiation and where they occur.
///
/// `subtemplate_indices` has the shape of the instantiation; entry `(i, j)`
/// is the id of the subtemplate centred on cell `(i, j)`, or `0` if the cell
/// was skipped. Ids start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueSubtemplates {
    subtemplate_indices: Array2<usize>,
    subtemplates: BTreeMap<usize, Subtemplate>,
}

impl UniqueSubtemplates {
    /// Build the structure, checking that every non-zero id has a
    /// subtemplate and that all subtemplates are odd squares of one shape.
    pub fn new(
        subtemplate_indices: Array2<usize>,
        subtemplates: BTreeMap<usize, Subtemplate>,
    ) -> LatticeResult<Self> {
        if let Some(&id) = subtemplate_indices
            .iter()
            .find(|&&id| id != 0 && !subtemplates.contains_key(&id))
        {
            return Err(LatticeError::UnknownSubtemplate { id: vec![id] });
        }
        common_odd_square_side(subtemplates.values().map(Array2::dim))?;
        Ok(Self {
            subtemplate_indices,
            subtemplates,
        })
    }

    /// Subtemplate id of every cell.
    pub fn subtemplate_indices(&self) -> &Array2<usize> {
        &self.subtemplate_indices
    }

    /// Distinct subtemplates by id.
    pub fn subtemplates(&self) -> &BTreeMap<usize, Subtemplate> {
        &self.subtemplates
    }

    /// The subtemplate with the given id.
    pub fn get(&self, id: usize) -> Option<&Subtemplate> {
        self.subtemplates.get(&id)
    }

    /// Number of distinct subtemplates.
    pub fn len(&self) -> usize {
        self.subtemplates.len()
    }

    /// Check if no subtemplate was found.
    pub fn is_empty(&self) -> bool {
        self.subtemplates.is_empty()
    }

    /// Radius of the stored subtemplates, `None` if there is none.
    pub fn manhattan_radius(&self) -> Option<usize> {
        self.subtemplates.values().next().map(|s| s.nrows() / 2)
    }
}

/// Find the distinct `(2r + 1) x (2r + 1)` windows of `instantiation`.
///
/// The instantiation is padded with `manhattan_radius` zeros on each side,
/// so windows of border cells see zeros beyond the edge. Cells holding `0`
/// are skipped when `avoid_zero_plaquettes` is set and get id `0`.
///
/// Windows are ordered by lexicographic comparison of their row-major
/// contents and ids follow that order, so the output only depends on the
/// instantiation. Comparisons are done on views of the padded array and a
/// window is copied once per distinct id: with `n` considered cells and
/// windows of `w` cells this takes `O(n log(n) w)` time and `O(n + d w)`
/// memory for `d` distinct windows, `d <= n`.
#[instrument(skip(instantiation), fields(shape = ?instantiation.dim()))]
pub fn get_spatially_distinct_subtemplates(
    instantiation: ArrayView2<'_, u32>,
    manhattan_radius: usize,
    avoid_zero_plaquettes: bool,
) -> LatticeResult<UniqueSubtemplates> {
    let (rows, cols) = instantiation.dim();
    let r = manhattan_radius;
    let side = 2 * r + 1;

    let mut padded = Array2::<u32>::zeros((rows + 2 * r, cols + 2 * r));
    padded
        .slice_mut(s![r..r + rows, r..r + cols])
        .assign(&instantiation);
    let window = |(i, j): (usize, usize)| padded.slice(s![i..i + side, j..j + side]);

    let mut positions: Vec<(usize, usize)> = instantiation
        .indexed_iter()
        .filter(|&(_, &value)| !(avoid_zero_plaquettes && value == 0))
        .map(|(position, _)| position)
        .collect();
    positions.sort_by(|&a, &b| window(a).iter().cmp(window(b).iter()));

    let mut subtemplate_indices = Array2::<usize>::zeros((rows, cols));
    let mut subtemplates = BTreeMap::new();
    let mut representative: Option<(usize, usize)> = None;
    for position in positions {
        let is_new = representative.is_none_or(|previous| window(previous) != window(position));
        if is_new {
            let id = subtemplates.len() + 1;
            subtemplates.insert(id, window(position).to_owned());
            representative = Some(position);
        }
        subtemplate_indices[position] = subtemplates.len();
    }

    debug!(
        "Found {} distinct subtemplates of radius {}",
        subtemplates.len(),
        r
    );
    UniqueSubtemplates::new(subtemplate_indices, subtemplates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_radius_zero_groups_equal_values() {
        let instantiation = array![[3, 1], [1, 0]];
        let unique = get_spatially_distinct_subtemplates(instantiation.view(), 0, false).unwrap();

        assert_eq!(unique.len(), 3);
        assert_eq!(unique.get(1), Some(&array![[0]]));
        assert_eq!(unique.get(2), Some(&array![[1]]));
        assert_eq!(unique.get(3), Some(&array![[3]]));
        assert_eq!(unique.subtemplate_indices(), &array![[3, 2], [2, 1]]);
        assert_eq!(unique.manhattan_radius(), Some(0));
    }

    #[test]
    fn test_zero_cells_are_skipped() {
        let instantiation = array![[0, 0, 0], [0, 4, 0], [0, 0, 0]];
        let unique = get_spatially_distinct_subtemplates(instantiation.view(), 1, true).unwrap();

        assert_eq!(unique.len(), 1);
        assert_eq!(unique.get(1), Some(&instantiation));
        assert_eq!(unique.subtemplate_indices()[[1, 1]], 1);
        assert_eq!(unique.subtemplate_indices().iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_all_zero_instantiation() {
        let instantiation = Array2::<u32>::zeros((2, 3));
        let unique = get_spatially_distinct_subtemplates(instantiation.view(), 2, true).unwrap();
        assert!(unique.is_empty());
        assert_eq!(unique.manhattan_radius(), None);
    }

    #[test]
    fn test_border_windows_are_zero_padded() {
        let instantiation = array![[1, 1, 1]];
        let unique = get_spatially_distinct_subtemplates(instantiation.view(), 1, true).unwrap();

        // Left border, middle and right border cells all differ.
        assert_eq!(unique.len(), 3);
        assert_eq!(unique.get(1), Some(&array![[0, 0, 0], [0, 1, 1], [0, 0, 0]]));
        assert_eq!(unique.get(3), Some(&array![[0, 0, 0], [1, 1, 1], [0, 0, 0]]));
        assert_eq!(unique.subtemplate_indices(), &array![[1, 3, 2]]);
    }

    #[test]
    fn test_validation_rejects_dangling_ids() {
        let result = UniqueSubtemplates::new(array![[1, 2]], BTreeMap::from([(1, array![[5]])]));
        assert!(matches!(result, Err(LatticeError::UnknownSubtemplate { .. })));

        let result = UniqueSubtemplates::new(array![[1]], BTreeMap::from([(1, array![[5, 5]])]));
        assert!(matches!(result, Err(LatticeError::Shape(_))));
    }
}

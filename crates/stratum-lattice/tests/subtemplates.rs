//! Integration tests for subtemplate enumeration.

use ndarray::{Array2, Axis, array, s};
use proptest::prelude::*;
use stratum_lattice::{
    QubitTemplate, Template, get_spatially_distinct_3d_subtemplates,
    get_spatially_distinct_subtemplates,
};

/// Window of side `2r + 1` centred on `(i, j)`, reading zeros outside.
fn naive_window(instantiation: &Array2<u32>, r: usize, i: usize, j: usize) -> Array2<u32> {
    let (rows, cols) = instantiation.dim();
    let side = 2 * r + 1;
    Array2::from_shape_fn((side, side), |(di, dj)| {
        let (ii, jj) = ((i + di).checked_sub(r), (j + dj).checked_sub(r));
        match (ii, jj) {
            (Some(ii), Some(jj)) if ii < rows && jj < cols => instantiation[[ii, jj]],
            _ => 0,
        }
    })
}

fn arb_instantiation() -> impl Strategy<Value = Array2<u32>> {
    (1_usize..=6, 1_usize..=6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(0_u32..4, rows * cols).prop_map(move |values| {
            Array2::from_shape_vec((rows, cols), values).expect("shape matches length")
        })
    })
}

#[test]
fn test_qubit_template_window_scenario() {
    let instantiation = QubitTemplate::new().instantiate(2, None).unwrap();
    let unique = get_spatially_distinct_subtemplates(instantiation.view(), 1, true).unwrap();

    let id = unique.subtemplate_indices()[[1, 1]];
    assert_ne!(id, 0);
    assert_eq!(
        unique.get(id).unwrap(),
        &array![[1, 5, 6], [7, 9, 10], [8, 10, 9]]
    );
    // No cell of the qubit template is empty.
    assert!(unique.subtemplate_indices().iter().all(|&id| id != 0));
}

#[test]
fn test_bulk_windows_are_shared_across_scales() {
    let template = QubitTemplate::new();
    let small = template.instantiate(2, None).unwrap();
    let large = template.instantiate(6, None).unwrap();

    let small_unique = get_spatially_distinct_subtemplates(small.view(), 1, true).unwrap();
    let large_unique = get_spatially_distinct_subtemplates(large.view(), 1, true).unwrap();

    // With radius 1 every window already appears at k = 2.
    assert_eq!(small_unique.len(), large_unique.len());
    assert_eq!(small_unique.subtemplates(), large_unique.subtemplates());
}

#[test]
fn test_3d_subtemplates_of_memory_layers() {
    let instantiation = QubitTemplate::new().instantiate(2, None).unwrap();
    let layers = vec![instantiation.clone(), instantiation.clone(), instantiation];
    let unique = get_spatially_distinct_3d_subtemplates(&layers, 1).unwrap();
    let single = get_spatially_distinct_subtemplates(layers[0].view(), 1, false).unwrap();

    assert_eq!(unique.len(), single.len());
    assert_eq!(unique.subtemplate_indices().dim(), (6, 6, 3));
    assert_eq!(unique.manhattan_radius(), Some(1));
}

proptest! {
    /// Every considered cell points to a subtemplate equal to its window,
    /// and distinct ids hold distinct windows.
    #[test]
    fn test_dedup_soundness(
        instantiation in arb_instantiation(),
        radius in 0_usize..3,
        avoid_zero in any::<bool>(),
    ) {
        let unique = get_spatially_distinct_subtemplates(instantiation.view(), radius, avoid_zero)
            .expect("valid instantiation");

        for ((i, j), &id) in unique.subtemplate_indices().indexed_iter() {
            if avoid_zero && instantiation[[i, j]] == 0 {
                prop_assert_eq!(id, 0);
            } else {
                let expected = naive_window(&instantiation, radius, i, j);
                prop_assert_ne!(id, 0);
                prop_assert_eq!(unique.get(id), Some(&expected));
            }
        }

        let windows: Vec<_> = unique.subtemplates().values().collect();
        for pair in windows.windows(2) {
            prop_assert!(pair[0].iter().cmp(pair[1].iter()).is_lt(), "ids follow window order");
        }
        let ids: Vec<usize> = unique.subtemplates().keys().copied().collect();
        prop_assert_eq!(ids, (1..=unique.len()).collect::<Vec<_>>());
    }

    /// Each time slice of a 3D subtemplate is the 2D window of that slice.
    #[test]
    fn test_3d_slices_match_windows(
        first in arb_instantiation(),
        values in prop::collection::vec(0_u32..4, 36),
        radius in 0_usize..3,
    ) {
        let (rows, cols) = first.dim();
        let second = Array2::from_shape_vec((rows, cols), values[..rows * cols].to_vec())
            .expect("shape matches length");
        let slices = [first, second];
        let unique = get_spatially_distinct_3d_subtemplates(&slices, radius)
            .expect("slices share a shape");

        for i in 0..rows {
            for j in 0..cols {
                let key = unique.subtemplate_indices().slice(s![i, j, ..]).to_vec();
                let stacked = unique.get(&key).expect("every lane has a subtemplate");
                for (t, slice) in slices.iter().enumerate() {
                    prop_assert_eq!(
                        stacked.index_axis(Axis(2), t),
                        naive_window(slice, radius, i, j)
                    );
                }
            }
        }
    }
}

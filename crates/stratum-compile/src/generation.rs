//! Turning an instantiation and its plaquettes into a circuit.

use tracing::debug;

use stratum_ir::{Circuit, Shift2D};
use stratum_lattice::{Plaquettes, Template};

use crate::error::CompileResult;

/// Build the circuit of one layer.
///
/// Every non-zero cell `(row, col)` of the instantiation contributes the
/// circuit of its plaquette, translated by `(col * increments.x, row *
/// increments.y)`. All plaquette circuits start at the same moment and are
/// merged moment by moment. Repetitions are not expanded.
pub fn generate_circuit(
    template: &dyn Template,
    k: u32,
    plaquettes: &Plaquettes,
) -> CompileResult<Circuit> {
    let instantiation = template.instantiate(k, None)?;
    let increments = template.get_increments();

    let mut circuit = Circuit::new();
    let mut placed = 0usize;
    for ((row, col), &index) in instantiation.indexed_iter() {
        if index == 0 {
            continue;
        }
        let plaquette = plaquettes.get(index);
        if plaquette.is_empty() {
            continue;
        }
        let shift = Shift2D::new(col as i32 * increments.x, row as i32 * increments.y);
        circuit.merge_parallel(&plaquette.circuit().shifted_by(shift));
        placed += 1;
    }

    debug!(
        "Generated {} moments from {} plaquettes",
        circuit.num_moments(),
        placed
    );
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use stratum_ir::{Basis, GridQubit};
    use stratum_lattice::FixedTemplate;
    use stratum_lattice::plaquette::library::{PlaquetteSide, syndrome_plaquette};

    #[test]
    fn test_plaquettes_are_shifted_by_cell() {
        let template = FixedTemplate::new(array![[1, 0], [0, 1]]).unwrap();
        let plaquettes = Plaquettes::from_entries([(
            1,
            syndrome_plaquette(Basis::Z, PlaquetteSide::Full, None, None),
        )]);

        let circuit = generate_circuit(&template, 0, &plaquettes).unwrap();
        let qubits = circuit.qubits();
        assert!(qubits.contains(&GridQubit::new(1, 1)));
        assert!(qubits.contains(&GridQubit::new(3, 3)));
        assert!(!qubits.contains(&GridQubit::new(3, 1)));
        // Two syndrome measurements in the same last moment.
        assert_eq!(circuit.num_moments(), 6);
        assert_eq!(circuit.num_measurements(), 2);
    }

    #[test]
    fn test_empty_plaquettes_generate_nothing() {
        let template = FixedTemplate::new(array![[1, 2]]).unwrap();
        let circuit = generate_circuit(&template, 0, &Plaquettes::from_entries([])).unwrap();
        assert!(circuit.is_empty());
    }
}

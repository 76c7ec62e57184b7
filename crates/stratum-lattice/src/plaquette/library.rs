//! Ready-made plaquettes for rotated surface code memory experiments.
//!
//! Plaquettes live on a 3x3 qubit cell: data qubits sit on the corners
//! `(0, 0)`, `(2, 0)`, `(0, 2)` and `(2, 2)` and the syndrome qubit sits at
//! `(1, 1)`. Neighbouring cells of a template share their corner qubits,
//! which is why templates advance by [`CELL_INCREMENTS`].

use std::collections::BTreeMap;

use stratum_ir::{Basis, Circuit, GridQubit, Instruction, Moment, Shift2D};

use super::{Plaquette, Plaquettes};

/// Qubit displacement between two neighbouring cells.
pub const CELL_INCREMENTS: Shift2D = Shift2D::new(2, 2);

/// The syndrome qubit of a cell.
pub const SYNDROME_QUBIT: GridQubit = GridQubit::new(1, 1);

/// The data qubits of a cell, in interaction order.
pub const DATA_QUBITS: [GridQubit; 4] = [
    GridQubit::new(0, 0),
    GridQubit::new(2, 0),
    GridQubit::new(0, 2),
    GridQubit::new(2, 2),
];

/// Which data qubits a syndrome plaquette interacts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaquetteSide {
    /// All four corners.
    Full,
    /// The two upper corners (the plaquette is cut by the bottom boundary).
    Up,
    /// The two lower corners.
    Down,
    /// The two left corners.
    Left,
    /// The two right corners.
    Right,
}

impl PlaquetteSide {
    fn data_qubits(self) -> Vec<GridQubit> {
        let [tl, tr, bl, br] = DATA_QUBITS;
        match self {
            PlaquetteSide::Full => vec![tl, tr, bl, br],
            PlaquetteSide::Up => vec![tl, tr],
            PlaquetteSide::Down => vec![bl, br],
            PlaquetteSide::Left => vec![tl, bl],
            PlaquetteSide::Right => vec![tr, br],
        }
    }

    fn label(self) -> &'static str {
        match self {
            PlaquetteSide::Full => "full",
            PlaquetteSide::Up => "up",
            PlaquetteSide::Down => "down",
            PlaquetteSide::Left => "left",
            PlaquetteSide::Right => "right",
        }
    }
}

/// The plaquette that does nothing.
pub fn empty_square_plaquette() -> Plaquette {
    Plaquette::new("empty", Circuit::new())
}

/// A stabilizer measurement plaquette.
///
/// The syndrome qubit is reset and measured in `basis`. Data qubits are
/// optionally reset before the first interaction and measured after the
/// last one, which is how memory experiments initialise and read out their
/// logical qubit.
pub fn syndrome_plaquette(
    basis: Basis,
    side: PlaquetteSide,
    data_reset: Option<Basis>,
    data_measurement: Option<Basis>,
) -> Plaquette {
    let data = side.data_qubits();

    let mut first = Moment::from_instructions([Instruction::reset(basis, [SYNDROME_QUBIT])]);
    if let Some(reset) = data_reset {
        first.push(Instruction::reset(reset, data.iter().copied()));
    }

    let mut circuit = Circuit::from_moments([first]);
    for &qubit in &data {
        let gate = match basis {
            Basis::X => Instruction::cx(SYNDROME_QUBIT, qubit),
            Basis::Z => Instruction::cx(qubit, SYNDROME_QUBIT),
        };
        circuit.push_moment(Moment::from_instructions([gate]));
    }

    let mut last = Moment::from_instructions([Instruction::measure(basis, [SYNDROME_QUBIT])]);
    if let Some(measurement) = data_measurement {
        last.push(Instruction::measure(measurement, data.iter().copied()));
    }
    circuit.push_moment(last);

    let mut name = format!("syndrome_{basis}_{}", side.label()).to_lowercase();
    if let Some(reset) = data_reset {
        name.push_str(&format!("_r{reset}").to_lowercase());
    }
    if let Some(measurement) = data_measurement {
        name.push_str(&format!("_m{measurement}").to_lowercase());
    }
    Plaquette::new(name, circuit)
}

/// Plaquettes implementing one round of a rotated surface code memory on
/// the 14 indices of [`QubitTemplate`](crate::templates::QubitTemplate).
///
/// Corners and every other boundary cell stay empty; bulk cells alternate
/// between X and Z stabilizers.
pub fn memory_plaquettes(data_reset: Option<Basis>, data_measurement: Option<Basis>) -> Plaquettes {
    let p = |basis, side| syndrome_plaquette(basis, side, data_reset, data_measurement);
    let entries = BTreeMap::from([
        (6, p(Basis::X, PlaquetteSide::Down)),
        (7, p(Basis::Z, PlaquetteSide::Right)),
        (9, p(Basis::X, PlaquetteSide::Full)),
        (10, p(Basis::Z, PlaquetteSide::Full)),
        (12, p(Basis::Z, PlaquetteSide::Left)),
        (13, p(Basis::X, PlaquetteSide::Up)),
    ]);
    Plaquettes::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syndrome_plaquette_structure() {
        let plaquette = syndrome_plaquette(Basis::Z, PlaquetteSide::Full, None, None);
        assert_eq!(plaquette.name(), "syndrome_z_full");
        assert_eq!(plaquette.circuit().num_moments(), 6);
        assert_eq!(plaquette.circuit().num_measurements(), 1);
        assert_eq!(plaquette.circuit().qubits().len(), 5);
    }

    #[test]
    fn test_half_plaquette_with_readout() {
        let plaquette =
            syndrome_plaquette(Basis::X, PlaquetteSide::Up, Some(Basis::Z), Some(Basis::Z));
        assert_eq!(plaquette.name(), "syndrome_x_up_rz_mz");
        assert_eq!(plaquette.circuit().num_moments(), 4);
        // One syndrome measurement plus two data measurements.
        assert_eq!(plaquette.circuit().num_measurements(), 3);
    }

    #[test]
    fn test_memory_plaquettes_names_are_distinct() {
        let init = memory_plaquettes(Some(Basis::Z), None);
        let bulk = memory_plaquettes(None, None);
        assert_ne!(init.get(9).name(), bulk.get(9).name());
        assert_eq!(bulk.get(1), &empty_square_plaquette());
        assert!(bulk.get(5).is_empty());
    }
}

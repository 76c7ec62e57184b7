//! Moment-scheduled circuits over grid qubits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::instruction::Instruction;
use crate::qubit::{GridQubit, Shift2D};

/// A set of instructions executed in the same time step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Moment {
    instructions: Vec<Instruction>,
}

impl Moment {
    /// Create an empty moment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a moment from instructions.
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        Self {
            instructions: instructions.into_iter().collect(),
        }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Append every instruction of `other` that is not already in `self`.
    ///
    /// Neighbouring plaquettes share data qubits, so identical operations
    /// (e.g. the same data reset) are only kept once.
    pub fn merge(&mut self, other: &Moment) {
        for instruction in &other.instructions {
            if !self.instructions.contains(instruction) {
                self.instructions.push(instruction.clone());
            }
        }
    }

    /// The instructions in this moment.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Check if the moment has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// A circuit as an ordered sequence of moments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Circuit {
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit from moments.
    pub fn from_moments(moments: impl IntoIterator<Item = Moment>) -> Self {
        Self {
            moments: moments.into_iter().collect(),
        }
    }

    /// Append a moment at the end of the circuit.
    pub fn push_moment(&mut self, moment: Moment) -> &mut Self {
        self.moments.push(moment);
        self
    }

    /// Merge `other` into `self`, moment by moment, as if both ran in
    /// parallel from the same starting time step.
    pub fn merge_parallel(&mut self, other: &Circuit) {
        if other.moments.len() > self.moments.len() {
            self.moments.resize_with(other.moments.len(), Moment::new);
        }
        for (mine, theirs) in self.moments.iter_mut().zip(&other.moments) {
            mine.merge(theirs);
        }
    }

    /// The moments of the circuit.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments.
    pub fn num_moments(&self) -> usize {
        self.moments.len()
    }

    /// Check if the circuit contains no instruction at all.
    pub fn is_empty(&self) -> bool {
        self.moments.iter().all(Moment::is_empty)
    }

    /// Iterate over instructions in time order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.moments.iter().flat_map(|m| m.instructions.iter())
    }

    /// All qubits touched by a non-annotation instruction.
    pub fn qubits(&self) -> BTreeSet<GridQubit> {
        self.instructions()
            .filter(|i| !i.is_annotation())
            .flat_map(|i| i.qubits.iter().copied())
            .collect()
    }

    /// Total number of single-qubit measurement outcomes.
    pub fn num_measurements(&self) -> usize {
        self.instructions()
            .filter(|i| i.is_measurement())
            .map(|i| i.qubits.len())
            .sum()
    }

    /// Apply `f` to every qubit of the circuit.
    #[must_use]
    pub fn map_qubits(&self, f: impl Fn(GridQubit) -> GridQubit) -> Self {
        Self {
            moments: self
                .moments
                .iter()
                .map(|m| Moment {
                    instructions: m.instructions.iter().map(|i| i.map_qubits(&f)).collect(),
                })
                .collect(),
        }
    }

    /// Translate every qubit of the circuit.
    #[must_use]
    pub fn shifted_by(&self, shift: Shift2D) -> Self {
        self.map_qubits(|q| q + shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Basis;

    fn syndrome_round(ancilla: GridQubit, data: GridQubit) -> Circuit {
        Circuit::from_moments([
            Moment::from_instructions([Instruction::reset(Basis::Z, [ancilla])]),
            Moment::from_instructions([Instruction::cx(data, ancilla)]),
            Moment::from_instructions([Instruction::measure(Basis::Z, [ancilla])]),
        ])
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_moments(), 0);
        assert_eq!(circuit.num_measurements(), 0);
    }

    #[test]
    fn test_merge_parallel() {
        let mut left = syndrome_round(GridQubit::new(1, 1), GridQubit::new(0, 0));
        let right = syndrome_round(GridQubit::new(3, 1), GridQubit::new(2, 0));
        left.merge_parallel(&right);

        assert_eq!(left.num_moments(), 3);
        assert_eq!(left.moments()[0].instructions().len(), 2);
        assert_eq!(left.num_measurements(), 2);
        assert_eq!(left.qubits().len(), 4);
    }

    #[test]
    fn test_merge_deduplicates_identical_instructions() {
        let mut circuit = Circuit::new();
        let reset = Circuit::from_moments([Moment::from_instructions([Instruction::reset(
            Basis::Z,
            [GridQubit::new(0, 0)],
        )])]);
        circuit.merge_parallel(&reset);
        circuit.merge_parallel(&reset);
        assert_eq!(circuit.moments()[0].instructions().len(), 1);
    }

    #[test]
    fn test_merge_longer_circuit() {
        let mut short = Circuit::from_moments([Moment::new()]);
        short.merge_parallel(&syndrome_round(GridQubit::new(1, 1), GridQubit::new(0, 0)));
        assert_eq!(short.num_moments(), 3);
    }

    #[test]
    fn test_shifted_by() {
        let circuit = syndrome_round(GridQubit::new(1, 1), GridQubit::new(0, 0));
        let shifted = circuit.shifted_by(Shift2D::new(2, 4));
        let qubits: Vec<_> = shifted.qubits().into_iter().collect();
        assert_eq!(qubits, vec![GridQubit::new(2, 4), GridQubit::new(3, 5)]);
    }
}

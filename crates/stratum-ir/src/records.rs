//! Mapping from qubits to their position in the global measurement record.

use std::collections::BTreeMap;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::measurement::Measurement;
use crate::qubit::GridQubit;

/// For each measured qubit, the negative global record offsets of its
/// measurements, oldest first.
///
/// A [`Measurement`] with offset `-n` resolves to the `n`-th entry from the
/// end of its qubit's list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementRecordsMap {
    records: BTreeMap<GridQubit, Vec<i32>>,
}

impl MeasurementRecordsMap {
    /// Create a map from explicit record offsets.
    ///
    /// Every list must be made of strictly negative, strictly increasing offsets.
    pub fn new(records: BTreeMap<GridQubit, Vec<i32>>) -> IrResult<Self> {
        for (&qubit, offsets) in &records {
            if offsets.iter().any(|&o| o >= 0) {
                return Err(IrError::InvalidRecords {
                    qubit,
                    reason: "offsets must be negative".into(),
                });
            }
            if offsets.windows(2).any(|w| w[0] >= w[1]) {
                return Err(IrError::InvalidRecords {
                    qubit,
                    reason: "offsets must be strictly increasing".into(),
                });
            }
        }
        Ok(Self { records })
    }

    /// Build the map of all measurements performed by `circuit`, with offsets
    /// relative to the end of the circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let total = i32::try_from(circuit.num_measurements()).unwrap_or(i32::MAX);
        let mut records: BTreeMap<GridQubit, Vec<i32>> = BTreeMap::new();
        let mut index = 0i32;
        for instruction in circuit.instructions().filter(|i| i.is_measurement()) {
            for &qubit in &instruction.qubits {
                records.entry(qubit).or_default().push(index - total);
                index += 1;
            }
        }
        Self { records }
    }

    /// Resolve a measurement to its global record offset.
    pub fn get(&self, measurement: &Measurement) -> IrResult<i32> {
        let offsets = self
            .records
            .get(&measurement.qubit())
            .ok_or(IrError::MissingRecords {
                qubit: measurement.qubit(),
            })?;
        let back = measurement.offset().unsigned_abs() as usize;
        offsets
            .len()
            .checked_sub(back)
            .map(|i| offsets[i])
            .ok_or(IrError::RecordOutOfRange {
                measurement: *measurement,
                available: offsets.len(),
            })
    }

    /// Check if the qubit has at least one recorded measurement.
    pub fn contains(&self, qubit: GridQubit) -> bool {
        self.records.contains_key(&qubit)
    }

    /// Record offsets of a qubit, oldest first.
    pub fn records_of(&self, qubit: GridQubit) -> Option<&[i32]> {
        self.records.get(&qubit).map(Vec::as_slice)
    }

    /// Number of measured qubits.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no qubit was measured.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Moment;
    use crate::instruction::{Basis, Instruction};

    #[test]
    fn test_get() {
        let q = GridQubit::new(0, 0);
        let map = MeasurementRecordsMap::new(BTreeMap::from([(q, vec![-7, -3, -1])])).unwrap();

        let last = Measurement::new(q, -1).unwrap();
        let first = Measurement::new(q, -3).unwrap();
        assert_eq!(map.get(&last).unwrap(), -1);
        assert_eq!(map.get(&first).unwrap(), -7);

        let too_old = Measurement::new(q, -4).unwrap();
        assert!(matches!(
            map.get(&too_old),
            Err(IrError::RecordOutOfRange { available: 3, .. })
        ));

        let unknown = Measurement::new(GridQubit::new(1, 1), -1).unwrap();
        assert!(matches!(
            map.get(&unknown),
            Err(IrError::MissingRecords { .. })
        ));
    }

    #[test]
    fn test_new_validates_offsets() {
        let q = GridQubit::new(0, 0);
        assert!(MeasurementRecordsMap::new(BTreeMap::from([(q, vec![-1, 0])])).is_err());
        assert!(MeasurementRecordsMap::new(BTreeMap::from([(q, vec![-1, -2])])).is_err());
    }

    #[test]
    fn test_from_circuit() {
        let a = GridQubit::new(1, 1);
        let b = GridQubit::new(3, 1);
        let circuit = Circuit::from_moments([
            Moment::from_instructions([Instruction::measure(Basis::Z, [a, b])]),
            Moment::from_instructions([Instruction::reset(Basis::Z, [a])]),
            Moment::from_instructions([Instruction::measure(Basis::Z, [a])]),
        ]);
        let map = MeasurementRecordsMap::from_circuit(&circuit);

        assert_eq!(map.len(), 2);
        assert_eq!(map.records_of(a), Some(&[-3, -1][..]));
        assert_eq!(map.records_of(b), Some(&[-2][..]));
    }
}

//! Property tests for measurement records built from circuits.

use std::collections::BTreeSet;

use proptest::prelude::*;
use stratum_ir::{
    Basis, Circuit, GridQubit, Instruction, Measurement, MeasurementRecordsMap, Moment,
};

const QUBITS: [GridQubit; 4] = [
    GridQubit::new(0, 0),
    GridQubit::new(2, 0),
    GridQubit::new(0, 2),
    GridQubit::new(2, 2),
];

/// One measurement moment per mask, measuring the qubits whose bit is set.
fn measurement_circuit(masks: &[u8]) -> Circuit {
    Circuit::from_moments(masks.iter().map(|&mask| {
        let measured = QUBITS
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask & (1 << i) != 0)
            .map(|(_, &q)| q);
        Moment::from_instructions([Instruction::measure(Basis::Z, measured)])
    }))
}

proptest! {
    /// Every record offset is used exactly once and each qubit keeps one
    /// offset per measurement.
    #[test]
    fn test_records_cover_all_measurements(masks in prop::collection::vec(0_u8..16, 0..8)) {
        let circuit = measurement_circuit(&masks);
        let records = MeasurementRecordsMap::from_circuit(&circuit);
        let total = circuit.num_measurements() as i32;

        let mut seen = BTreeSet::new();
        for (i, &qubit) in QUBITS.iter().enumerate() {
            let expected = masks.iter().filter(|&&m| m & (1 << i) != 0).count();
            let offsets = records.records_of(qubit).unwrap_or(&[]);
            prop_assert_eq!(offsets.len(), expected);
            prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            seen.extend(offsets.iter().copied());
        }
        prop_assert_eq!(seen, (-total..0).collect::<BTreeSet<_>>());
    }

    /// The most recent measurement of a qubit resolves to its last record.
    #[test]
    fn test_latest_measurement_resolves_last(masks in prop::collection::vec(1_u8..16, 1..8)) {
        let circuit = measurement_circuit(&masks);
        let records = MeasurementRecordsMap::from_circuit(&circuit);

        for qubit in QUBITS.into_iter().filter(|&q| records.contains(q)) {
            let latest = Measurement::new(qubit, -1).unwrap();
            let last = *records.records_of(qubit).unwrap().last().unwrap();
            prop_assert_eq!(records.get(&latest).unwrap(), last);

            let count = records.records_of(qubit).unwrap().len() as i32;
            let too_old = Measurement::new(qubit, -count - 1).unwrap();
            prop_assert!(records.get(&too_old).is_err());
        }
    }
}

#[test]
fn test_unmeasured_qubit_is_missing() {
    let circuit = measurement_circuit(&[0b0001]);
    let records = MeasurementRecordsMap::from_circuit(&circuit);
    let measurement = Measurement::new(QUBITS[3], -1).unwrap();
    assert!(records.get(&measurement).is_err());
    assert_eq!(records.len(), 1);
}

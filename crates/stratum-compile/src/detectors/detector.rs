//! Detectors: parity checks over a set of measurements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use stratum_ir::{Instruction, Measurement, MeasurementRecordsMap, SpatialCoordinates};

use crate::error::{CompileError, CompileResult};

/// A set of measurements whose parity is deterministic in the absence of
/// errors, annotated with coordinates.
///
/// Measurements are kept sorted, so detectors compare and hash the same way
/// whatever order they were listed in. Detectors order by measurements
/// first, then coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDetector")]
pub struct Detector {
    measurements: BTreeSet<Measurement>,
    coordinates: SpatialCoordinates,
}

#[derive(Deserialize)]
struct RawDetector {
    measurements: BTreeSet<Measurement>,
    coordinates: SpatialCoordinates,
}

impl TryFrom<RawDetector> for Detector {
    type Error = CompileError;

    fn try_from(raw: RawDetector) -> CompileResult<Self> {
        Detector::new(raw.measurements, raw.coordinates)
    }
}

impl Detector {
    /// Create a detector, rejecting an empty set of measurements.
    pub fn new(
        measurements: impl IntoIterator<Item = Measurement>,
        coordinates: SpatialCoordinates,
    ) -> CompileResult<Self> {
        let measurements: BTreeSet<Measurement> = measurements.into_iter().collect();
        if measurements.is_empty() {
            return Err(CompileError::EmptyDetector);
        }
        Ok(Self {
            measurements,
            coordinates,
        })
    }

    /// The measurements involved, sorted.
    pub fn measurements(&self) -> &BTreeSet<Measurement> {
        &self.measurements
    }

    /// The annotation coordinates.
    pub fn coordinates(&self) -> SpatialCoordinates {
        self.coordinates
    }

    /// Build the `DETECTOR` instruction of this detector for a circuit whose
    /// measurements are described by `records`.
    pub fn to_instruction(&self, records: &MeasurementRecordsMap) -> CompileResult<Instruction> {
        let targets = self
            .measurements
            .iter()
            .map(|m| {
                records.get(m).map_err(|source| CompileError::Resolution {
                    measurement: *m,
                    source,
                })
            })
            .collect::<CompileResult<Vec<i32>>>()?;
        Ok(Instruction::detector(self.coordinates, targets))
    }

    /// The same detector, translated by `(dx, dy)`.
    #[must_use]
    pub fn offset_spatially_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            measurements: self
                .measurements
                .iter()
                .map(|m| m.offset_spatially_by(dx, dy))
                .collect(),
            coordinates: self.coordinates.offset_spatially_by(dx, dy),
        }
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}{{", self.coordinates)?;
        for (i, m) in self.measurements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_ir::{Basis, Circuit, GridQubit, Moment};

    fn m(x: i32, y: i32, offset: i32) -> Measurement {
        Measurement::new(GridQubit::new(x, y), offset).unwrap()
    }

    #[test]
    fn test_empty_detector() {
        let err = Detector::new([], SpatialCoordinates::new(0, 0)).unwrap_err();
        assert!(matches!(err, CompileError::EmptyDetector));
        assert_eq!(
            err.to_string(),
            "Trying to create a detector without any measurement."
        );
    }

    #[test]
    fn test_measurement_order_is_irrelevant() {
        let a = Detector::new([m(0, 0, -1), m(1, 1, -2)], SpatialCoordinates::new(0, 0)).unwrap();
        let b = Detector::new([m(1, 1, -2), m(0, 0, -1)], SpatialCoordinates::new(0, 0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_instruction() {
        let q = GridQubit::new(1, 1);
        let p = GridQubit::new(3, 1);
        let circuit = Circuit::from_moments([
            Moment::from_instructions([Instruction::measure(Basis::Z, [q, p])]),
            Moment::from_instructions([Instruction::measure(Basis::Z, [q])]),
        ]);
        let records = MeasurementRecordsMap::from_circuit(&circuit);

        let detector = Detector::new(
            [m(1, 1, -1), m(1, 1, -2)],
            SpatialCoordinates::with_time(1, 1, 0),
        )
        .unwrap();
        let instruction = detector.to_instruction(&records).unwrap();
        assert_eq!(instruction.to_string(), "DETECTOR(1, 1, 0) rec[-3] rec[-1]");
    }

    #[test]
    fn test_to_instruction_unresolved() {
        let records = MeasurementRecordsMap::default();
        let detector = Detector::new([m(4, 4, -1)], SpatialCoordinates::new(4, 4)).unwrap();
        let err = detector.to_instruction(&records).unwrap_err();
        assert!(matches!(err, CompileError::Resolution { .. }));
        assert!(err.to_string().contains("M[Q[4, 4], -1]"));
    }

    #[test]
    fn test_offset_spatially() {
        let detector =
            Detector::new([m(1, 1, -1)], SpatialCoordinates::with_time(1, 1, 3)).unwrap();
        let shifted = detector.offset_spatially_by(2, -4);
        assert_eq!(shifted.measurements().first(), Some(&m(3, -3, -1)));
        assert_eq!(shifted.coordinates(), SpatialCoordinates::with_time(3, -3, 3));
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let json = r#"{"measurements": [], "coordinates": {"x": 0, "y": 0}}"#;
        assert!(serde_json::from_str::<Detector>(json).is_err());
    }
}

//! Circuit instructions acting on grid qubits.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::measurement::SpatialCoordinates;
use crate::qubit::{GridQubit, Shift2D};

/// Basis of a reset or a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Basis {
    /// Pauli-X basis.
    X,
    /// Pauli-Z basis.
    Z,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::X => write!(f, "X"),
            Basis::Z => write!(f, "Z"),
        }
    }
}

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Reset in the given basis.
    Reset(Basis),
    /// Hadamard gate.
    H,
    /// Controlled-X, targets are `(control, target)` pairs.
    CX,
    /// Controlled-Z, targets are pairs.
    CZ,
    /// Measurement in the given basis.
    Measure(Basis),
    /// Parity check over past measurement records.
    Detector {
        /// Annotation coordinates.
        coordinates: SpatialCoordinates,
        /// Negative offsets into the global measurement record.
        records: Vec<i32>,
    },
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<GridQubit>,
}

impl Instruction {
    /// Create a reset instruction.
    pub fn reset(basis: Basis, qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        Self {
            kind: InstructionKind::Reset(basis),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a Hadamard instruction.
    pub fn h(qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        Self {
            kind: InstructionKind::H,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a CX instruction.
    pub fn cx(control: GridQubit, target: GridQubit) -> Self {
        Self {
            kind: InstructionKind::CX,
            qubits: vec![control, target],
        }
    }

    /// Create a CZ instruction.
    pub fn cz(q1: GridQubit, q2: GridQubit) -> Self {
        Self {
            kind: InstructionKind::CZ,
            qubits: vec![q1, q2],
        }
    }

    /// Create a measurement instruction.
    pub fn measure(basis: Basis, qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        Self {
            kind: InstructionKind::Measure(basis),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a detector annotation.
    pub fn detector(coordinates: SpatialCoordinates, records: Vec<i32>) -> Self {
        Self {
            kind: InstructionKind::Detector {
                coordinates,
                records,
            },
            qubits: vec![],
        }
    }

    /// Get the instruction name.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Reset(Basis::X) => "RX",
            InstructionKind::Reset(Basis::Z) => "RZ",
            InstructionKind::H => "H",
            InstructionKind::CX => "CX",
            InstructionKind::CZ => "CZ",
            InstructionKind::Measure(Basis::X) => "MX",
            InstructionKind::Measure(Basis::Z) => "MZ",
            InstructionKind::Detector { .. } => "DETECTOR",
        }
    }

    /// Check if this is a measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure(_))
    }

    /// Check if this is an annotation (does not act on qubits).
    pub fn is_annotation(&self) -> bool {
        matches!(self.kind, InstructionKind::Detector { .. })
    }

    /// Apply `f` to every qubit operand.
    #[must_use]
    pub fn map_qubits(&self, f: impl Fn(GridQubit) -> GridQubit) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().map(|&q| f(q)).collect(),
        }
    }

    /// Translate every qubit operand.
    #[must_use]
    pub fn shifted_by(&self, shift: Shift2D) -> Self {
        self.map_qubits(|q| q + shift)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let InstructionKind::Detector {
            coordinates,
            records,
        } = &self.kind
        {
            write!(f, "DETECTOR{coordinates}")?;
            for record in records {
                write!(f, " rec[{record}]")?;
            }
            return Ok(());
        }
        write!(f, "{}", self.name())?;
        for qubit in &self.qubits {
            write!(f, " {qubit}")?;
        }
        Ok(())
    }
}

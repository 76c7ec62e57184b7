//! Error types for the IR crate.

use crate::measurement::Measurement;
use crate::qubit::GridQubit;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A measurement offset must point into the past.
    #[error("Measurement offsets must be strictly negative, got {offset}")]
    InvalidMeasurementOffset {
        /// The rejected offset.
        offset: i32,
    },

    /// No measurement record is known for the qubit.
    #[error("No measurement record for qubit {qubit}")]
    MissingRecords {
        /// The qubit that was never measured.
        qubit: GridQubit,
    },

    /// The qubit was measured, but not often enough for the requested offset.
    #[error("Cannot resolve {measurement}: only {available} measurements recorded on its qubit")]
    RecordOutOfRange {
        /// The measurement that could not be resolved.
        measurement: Measurement,
        /// Number of measurements recorded for the qubit.
        available: usize,
    },

    /// Record offsets given to a map were not negative and strictly increasing.
    #[error("Invalid record offsets for qubit {qubit}: {reason}")]
    InvalidRecords {
        /// The qubit whose record list is malformed.
        qubit: GridQubit,
        /// What is wrong with the list.
        reason: String,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

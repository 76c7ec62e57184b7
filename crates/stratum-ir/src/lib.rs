//! Stratum circuit representation
//!
//! This crate provides the value types shared by the whole Stratum stack:
//! qubits placed on a 2D grid, measurements addressed relative to a qubit's
//! measurement history, and moment-scheduled circuits.
//!
//! # Core Components
//!
//! - **Positions**: [`GridQubit`], [`Shift2D`], [`PlaquettePosition2D`],
//!   [`BlockPosition2D`]
//! - **Measurements**: [`Measurement`] (qubit + negative offset) and the
//!   [`SpatialCoordinates`] annotating detectors
//! - **Circuits**: [`Instruction`], [`Moment`], [`Circuit`]
//! - **Records**: [`MeasurementRecordsMap`] resolving measurements to
//!   global record offsets
//!
//! # Example
//!
//! ```rust
//! use stratum_ir::{
//!     Basis, Circuit, GridQubit, Instruction, Measurement, MeasurementRecordsMap, Moment,
//! };
//!
//! let ancilla = GridQubit::new(1, 1);
//! let circuit = Circuit::from_moments([
//!     Moment::from_instructions([Instruction::reset(Basis::Z, [ancilla])]),
//!     Moment::from_instructions([Instruction::measure(Basis::Z, [ancilla])]),
//! ]);
//!
//! let records = MeasurementRecordsMap::from_circuit(&circuit);
//! let last = Measurement::new(ancilla, -1).unwrap();
//! assert_eq!(records.get(&last).unwrap(), -1);
//! ```

pub mod circuit;
pub mod error;
pub mod instruction;
pub mod measurement;
pub mod qubit;
pub mod records;

pub use circuit::{Circuit, Moment};
pub use error::{IrError, IrResult};
pub use instruction::{Basis, Instruction, InstructionKind};
pub use measurement::{Measurement, SpatialCoordinates};
pub use qubit::{BlockPosition2D, GridQubit, PlaquettePosition2D, Shift2D};
pub use records::MeasurementRecordsMap;

//! Stratum compilation
//!
//! This crate turns lattice blocks into annotated circuits. It provides:
//!
//! - **Detectors**: [`Detector`], resolved to `DETECTOR` instructions
//!   against a [`MeasurementRecordsMap`](stratum_ir::MeasurementRecordsMap)
//! - **Detector database**: [`DetectorDatabase`], a translation-invariant
//!   cache from local situations (subtemplates plus plaquettes) to detectors,
//!   serializable to JSON
//! - **Lookup**: [`lookup_detectors`], placing cached detectors on every cell
//!   of a layered instantiation
//! - **Blocks**: [`CompiledBlock`] and [`BlockLayout`], merging blocks
//!   placed on a grid into one template and one list of layers
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! use stratum_compile::{BlockLayout, CompiledBlock};
//! use stratum_ir::{Basis, BlockPosition2D};
//! use stratum_lattice::plaquette::library::memory_plaquettes;
//! use stratum_lattice::{LinearFunction, QubitTemplate};
//!
//! let layers = vec![
//!     memory_plaquettes(Some(Basis::Z), None),
//!     memory_plaquettes(None, None).repeat(LinearFunction::new(2, -1)),
//!     memory_plaquettes(None, Some(Basis::Z)),
//! ];
//! let block = CompiledBlock::new(Arc::new(QubitTemplate::new()), layers);
//! let blocks = BTreeMap::from([
//!     (BlockPosition2D::new(0, 0), block.clone()),
//!     (BlockPosition2D::new(1, 0), block),
//! ]);
//!
//! let layout = BlockLayout::new(&blocks).unwrap();
//! let circuits = layout.get_shifted_circuits(2).unwrap();
//! assert_eq!(circuits.len(), 3);
//! ```

pub mod block;
pub mod config;
pub mod detectors;
pub mod error;
pub mod generation;

pub use block::{BlockLayout, CompiledBlock};
pub use config::CompileConfig;
pub use detectors::{
    DATABASE_VERSION, Detector, DetectorDatabase, DetectorDatabaseKey, DetectorLookup,
    lookup_detectors,
};
pub use error::{CompileError, CompileResult};
pub use generation::generate_circuit;

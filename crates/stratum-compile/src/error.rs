//! Error types for the compilation crate.

use stratum_ir::{BlockPosition2D, IrError, Measurement};
use stratum_lattice::LatticeError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Error from the lattice crate.
    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),

    /// A database key was built from sequences of different lengths.
    #[error(
        "DetectorDatabaseKey can only store an equal number of subtemplates and plaquettes. \
         Got {subtemplates} subtemplates and {plaquettes} plaquettes."
    )]
    LengthMismatch { subtemplates: usize, plaquettes: usize },

    /// A detector needs at least one measurement.
    #[error("Trying to create a detector without any measurement.")]
    EmptyDetector,

    /// A detector measurement has no matching record.
    #[error("Cannot resolve {measurement} to a measurement record: {source}")]
    Resolution {
        measurement: Measurement,
        #[source]
        source: IrError,
    },

    /// The database is frozen and cannot be modified.
    #[error("Cannot {action} a situation to a frozen database.")]
    FrozenDatabase { action: &'static str },

    /// A layer index does not exist in a block.
    #[error("Layer index {index} is out of range for a block with {num_layers} layers")]
    LayerIndexOutOfRange { index: isize, num_layers: usize },

    /// Blocks of one layout do not have the same number of layers.
    #[error("Found blocks with {expected} and {got} layers in the same layout")]
    LayerCountMismatch { expected: usize, got: usize },

    /// Blocks of one layout repeat a layer differently.
    #[error("Layer {layer} is not repeated identically by every block of the layout")]
    RepetitionConflict { layer: usize },

    /// A layout needs at least one block.
    #[error("Cannot build a layout without any block")]
    EmptyLayout,

    /// A plaquette index of a block has no global index in its layout.
    #[error("Plaquette index {index} of {position} has no index in the layout")]
    UnmappedPlaquetteIndex { position: BlockPosition2D, index: u32 },

    /// A stored database was written by an incompatible version.
    #[error("Incompatible database version: found {found}, expected {expected}")]
    IncompatibleDatabaseVersion { found: u32, expected: u32 },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing a database file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;

//! Error types for the lattice crate.

use stratum_ir::BlockPosition2D;
use thiserror::Error;

/// Errors produced by templates and subtemplate enumeration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// Subtemplates are not square, have an even side, or differ in shape.
    #[error("Invalid subtemplate shape: {0}")]
    Shape(String),

    /// The subtemplate index array references an id with no subtemplate.
    #[error("Found subtemplate index {id:?} that does not correspond to a valid subtemplate")]
    UnknownSubtemplate {
        /// The dangling id (one entry per time slice for 3D subtemplates).
        id: Vec<usize>,
    },

    /// A template was instantiated with the wrong number of plaquette indices.
    #[error("Template expects {expected} plaquette indices, got {got}")]
    PlaquetteIndexCount {
        /// Number of indices the template needs.
        expected: usize,
        /// Number of indices provided.
        got: usize,
    },

    /// Invalid template definition.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Templates placed in the same layout do not scale the same way.
    #[error("Template at {position} does not share the layout's {what}")]
    LayoutShapeMismatch {
        /// Position of the offending template.
        position: BlockPosition2D,
        /// The property that differs (shape or increments).
        what: &'static str,
    },

    /// A layout needs at least one template.
    #[error("Cannot build a layout without any template")]
    EmptyLayout,

    /// Array construction failed.
    #[error("Array error: {0}")]
    Array(#[from] ndarray::ShapeError),
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

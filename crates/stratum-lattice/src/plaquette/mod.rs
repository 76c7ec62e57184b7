//! Plaquettes: local gate assignments placed on template cells.
//!
//! A [`Plaquette`] describes the operations applied around one cell of a
//! template instantiation, as a small circuit whose qubits are expressed
//! relative to the cell origin. A [`Plaquettes`] collection maps the integer
//! indices found in an instantiation to plaquettes, with a declared default
//! for indices it does not cover.

pub mod collection;
pub mod library;

pub use collection::{DefaultMap, Plaquettes};

use serde::{Deserialize, Serialize};
use std::fmt;

use stratum_ir::Circuit;

/// A named local gate assignment.
///
/// Two plaquettes with the same name are assumed to implement the same
/// operations; detector database keys rely on this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plaquette {
    name: String,
    circuit: Circuit,
}

impl Plaquette {
    /// Create a new plaquette.
    pub fn new(name: impl Into<String>, circuit: Circuit) -> Self {
        Self {
            name: name.into(),
            circuit,
        }
    }

    /// The plaquette name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The plaquette circuit, relative to the cell origin.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Check if the plaquette applies no operation.
    pub fn is_empty(&self) -> bool {
        self.circuit.is_empty()
    }
}

impl fmt::Display for Plaquette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plaquette({})", self.name)
    }
}

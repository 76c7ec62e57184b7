//! Stratum lattice model
//!
//! Scalable templates of plaquette indices, the plaquettes those indices
//! stand for, and the enumeration of distinct local neighbourhoods
//! (subtemplates) that the compiler uses to reuse detector computations.
//!
//! # Example
//!
//! ```rust
//! use stratum_lattice::subtemplates::get_spatially_distinct_subtemplates;
//! use stratum_lattice::templates::{QubitTemplate, Template};
//!
//! let instantiation = QubitTemplate::new().instantiate(2, None).unwrap();
//! let unique = get_spatially_distinct_subtemplates(instantiation.view(), 1, true).unwrap();
//!
//! assert_eq!(unique.subtemplate_indices().dim(), (6, 6));
//! assert_eq!(unique.manhattan_radius(), Some(1));
//! ```

pub mod error;
pub mod plaquette;
pub mod scale;
pub mod subtemplates;
pub mod templates;

pub use error::{LatticeError, LatticeResult};
pub use plaquette::{DefaultMap, Plaquette, Plaquettes};
pub use scale::{LinearFunction, Scalable2D};
pub use subtemplates::{
    Subtemplate, Unique3DSubtemplates, UniqueSubtemplates, get_spatially_distinct_3d_subtemplates,
    get_spatially_distinct_subtemplates,
};
pub use templates::{FixedTemplate, LayoutTemplate, QubitTemplate, Template};

//! Detectors and the database caching them.

pub mod database;
pub mod detector;
pub mod key;
pub mod lookup;

pub use database::{DATABASE_VERSION, DetectorDatabase, DetectorDatabaseDocument, SituationDocument};
pub use detector::Detector;
pub use key::{DetectorDatabaseKey, DetectorDatabaseKeyDocument};
pub use lookup::{DetectorLookup, lookup_detectors};

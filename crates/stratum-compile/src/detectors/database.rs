//! A cache of detectors computed for local situations.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use stratum_lattice::{Plaquettes, Subtemplate};

use super::detector::Detector;
use super::key::{DetectorDatabaseKey, DetectorDatabaseKeyDocument};
use crate::error::{CompileError, CompileResult};

/// Version written to serialized databases. Documents carrying another
/// version are rejected.
pub const DATABASE_VERSION: u32 = 1;

/// Detectors indexed by the local situation they were computed for.
///
/// Detectors are stored relative to the central cell of the situation's
/// subtemplates: a caller placing them at a cell translates them by that
/// cell's qubit offset.
///
/// A frozen database rejects additions and removals but still answers
/// lookups.
#[derive(Debug, Clone, Default)]
pub struct DetectorDatabase {
    mapping: FxHashMap<DetectorDatabaseKey, BTreeSet<Detector>>,
    frozen: bool,
}

impl DetectorDatabase {
    /// Create an empty, unfrozen database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `detectors` for the given situation, replacing any previous
    /// entry.
    pub fn add_situation(
        &mut self,
        subtemplates: &[Subtemplate],
        plaquettes: &[Plaquettes],
        detectors: impl IntoIterator<Item = Detector>,
    ) -> CompileResult<()> {
        if self.frozen {
            return Err(CompileError::FrozenDatabase { action: "add" });
        }
        let key = DetectorDatabaseKey::new(subtemplates, plaquettes)?;
        debug!("Adding situation {:016x}", key.reliable_hash());
        self.mapping.insert(key, detectors.into_iter().collect());
        Ok(())
    }

    /// Forget the detectors stored for the given situation, if any.
    pub fn remove_situation(
        &mut self,
        subtemplates: &[Subtemplate],
        plaquettes: &[Plaquettes],
    ) -> CompileResult<Option<BTreeSet<Detector>>> {
        if self.frozen {
            return Err(CompileError::FrozenDatabase { action: "remove" });
        }
        let key = DetectorDatabaseKey::new(subtemplates, plaquettes)?;
        Ok(self.mapping.remove(&key))
    }

    /// Detectors stored for the given situation.
    pub fn get_detectors(
        &self,
        subtemplates: &[Subtemplate],
        plaquettes: &[Plaquettes],
    ) -> CompileResult<Option<&BTreeSet<Detector>>> {
        let key = DetectorDatabaseKey::new(subtemplates, plaquettes)?;
        Ok(self.mapping.get(&key))
    }

    /// Prevent any further modification.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Allow modifications again.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Check if the database is frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of stored situations.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Check if no situation is stored.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Stored situations, in unspecified order.
    pub fn situations(
        &self,
    ) -> impl Iterator<Item = (&DetectorDatabaseKey, &BTreeSet<Detector>)> + '_ {
        self.mapping.iter()
    }

    /// Serializable form of the database. Situations are sorted by key so
    /// that equal databases give equal documents.
    pub fn to_document(&self) -> DetectorDatabaseDocument {
        let mut entries: Vec<_> = self.mapping.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.canonical_cmp(b));
        DetectorDatabaseDocument {
            version: DATABASE_VERSION,
            frozen: self.frozen,
            situations: entries
                .into_iter()
                .map(|(key, detectors)| SituationDocument {
                    key: key.to_document(),
                    detectors: detectors.iter().cloned().collect(),
                })
                .collect(),
        }
    }

    /// Rebuild a database from its serializable form.
    pub fn from_document(document: DetectorDatabaseDocument) -> CompileResult<Self> {
        if document.version != DATABASE_VERSION {
            return Err(CompileError::IncompatibleDatabaseVersion {
                found: document.version,
                expected: DATABASE_VERSION,
            });
        }
        let mapping = document
            .situations
            .into_iter()
            .map(|situation| -> CompileResult<_> {
                let key = DetectorDatabaseKey::from_document(situation.key)?;
                let detectors: BTreeSet<Detector> = situation.detectors.into_iter().collect();
                Ok((key, detectors))
            })
            .collect::<CompileResult<_>>()?;
        Ok(Self {
            mapping,
            frozen: document.frozen,
        })
    }

    /// Encode the database as pretty-printed JSON.
    pub fn to_json(&self) -> CompileResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Decode a database from JSON.
    pub fn from_json(json: &str) -> CompileResult<Self> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Write the database to a JSON file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> CompileResult<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!("Saved detector database with {} situations", self.len());
        Ok(())
    }

    /// Read a database from a JSON file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> CompileResult<Self> {
        let database = Self::from_json(&fs::read_to_string(path.as_ref())?)?;
        info!(
            "Loaded detector database with {} situations (frozen: {})",
            database.len(),
            database.frozen
        );
        Ok(database)
    }
}

/// Serialized form of a [`DetectorDatabase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorDatabaseDocument {
    /// Encoding version, [`DATABASE_VERSION`] when written by this crate.
    pub version: u32,
    /// Whether the database was frozen.
    pub frozen: bool,
    /// Stored situations, sorted by key.
    pub situations: Vec<SituationDocument>,
}

/// One stored situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationDocument {
    /// The situation.
    pub key: DetectorDatabaseKeyDocument,
    /// Its detectors, sorted.
    pub detectors: Vec<Detector>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use stratum_ir::{Circuit, GridQubit, Measurement, SpatialCoordinates};
    use stratum_lattice::Plaquette;

    fn plaquettes() -> Plaquettes {
        Plaquettes::from_entries([
            (1, Plaquette::new("a", Circuit::new())),
            (2, Plaquette::new("b", Circuit::new())),
        ])
    }

    fn detector(t: i32) -> Detector {
        Detector::new(
            [Measurement::new(GridQubit::new(0, 0), -1).unwrap()],
            SpatialCoordinates::with_time(0, 0, t),
        )
        .unwrap()
    }

    #[test]
    fn test_frozen_database_rejects_modifications() {
        let subtemplates = [array![[1, 2]]];
        let mut database = DetectorDatabase::new();
        database
            .add_situation(&subtemplates, &[plaquettes()], [detector(0)])
            .unwrap();
        database.freeze();

        let err = database
            .add_situation(&subtemplates, &[plaquettes()], [detector(1)])
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot add a situation to a frozen database.");
        let err = database
            .remove_situation(&subtemplates, &[plaquettes()])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot remove a situation to a frozen database."
        );

        // Lookups still work and nothing changed.
        let stored = database
            .get_detectors(&subtemplates, &[plaquettes()])
            .unwrap()
            .unwrap();
        assert_eq!(stored, &BTreeSet::from([detector(0)]));

        database.unfreeze();
        assert!(database
            .remove_situation(&subtemplates, &[plaquettes()])
            .unwrap()
            .is_some());
        assert!(database.is_empty());
    }

    #[test]
    fn test_version_mismatch() {
        let mut document = DetectorDatabase::new().to_document();
        document.version = DATABASE_VERSION + 1;
        assert!(matches!(
            DetectorDatabase::from_document(document),
            Err(CompileError::IncompatibleDatabaseVersion { .. })
        ));
    }

    #[test]
    fn test_document_is_deterministic() {
        let mut a = DetectorDatabase::new();
        let mut b = DetectorDatabase::new();
        let first = [array![[1, 2]]];
        let second = [array![[2, 1]]];

        a.add_situation(&first, &[plaquettes()], [detector(0)]).unwrap();
        a.add_situation(&second, &[plaquettes()], [detector(1)]).unwrap();
        b.add_situation(&second, &[plaquettes()], [detector(1)]).unwrap();
        b.add_situation(&first, &[plaquettes()], [detector(0)]).unwrap();

        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }
}

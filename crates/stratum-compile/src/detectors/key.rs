//! Translation-invariant keys of the detector database.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use ndarray::Array2;
use stratum_lattice::{LatticeError, Plaquettes, Subtemplate};

use crate::error::{CompileError, CompileResult};

/// Prefix mixed into every reliable hash. Changing the canonical encoding
/// requires changing this prefix.
const RELIABLE_HASH_DOMAIN: &[u8] = b"stratum/detector-database-key/v1";

/// One time slice of a key, stripped of the actual index values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct CanonicalSlice {
    shape: (usize, usize),
    names: Vec<String>,
}

/// The local situation a set of detectors was computed for: one subtemplate
/// and the plaquettes it refers to, per time slice.
///
/// Two keys are equal when, slice by slice, their subtemplates have the same
/// shape and resolve to the same grid of plaquette names. Index values are
/// irrelevant, so renumbering the indices of a subtemplate and of its
/// plaquettes consistently gives an equal key.
///
/// A non-zero index missing from its collection resolves to the collection
/// default, exactly like `0`.
#[derive(Debug, Clone)]
pub struct DetectorDatabaseKey {
    subtemplates: Vec<Subtemplate>,
    plaquettes: Vec<Plaquettes>,
    canonical: Vec<CanonicalSlice>,
    reliable_hash: u64,
}

impl DetectorDatabaseKey {
    /// Build a key, one subtemplate and one plaquette collection per time
    /// slice. Collections are restricted to the indices their subtemplate
    /// uses.
    pub fn new(subtemplates: &[Subtemplate], plaquettes: &[Plaquettes]) -> CompileResult<Self> {
        if subtemplates.len() != plaquettes.len() {
            return Err(CompileError::LengthMismatch {
                subtemplates: subtemplates.len(),
                plaquettes: plaquettes.len(),
            });
        }

        let plaquettes: Vec<Plaquettes> = subtemplates
            .iter()
            .zip(plaquettes)
            .map(|(subtemplate, collection)| {
                let used: BTreeSet<u32> = subtemplate.iter().copied().filter(|&i| i != 0).collect();
                collection.restricted_to(&used)
            })
            .collect();
        let canonical: Vec<CanonicalSlice> = subtemplates
            .iter()
            .zip(&plaquettes)
            .map(|(subtemplate, collection)| canonical_slice(subtemplate, collection))
            .collect();
        let reliable_hash = reliable_hash_of(&canonical);

        Ok(Self {
            subtemplates: subtemplates.to_vec(),
            plaquettes,
            canonical,
            reliable_hash,
        })
    }

    /// Number of time slices.
    pub fn num_timeslices(&self) -> usize {
        self.subtemplates.len()
    }

    /// The subtemplates, one per time slice.
    pub fn subtemplates(&self) -> &[Subtemplate] {
        &self.subtemplates
    }

    /// The plaquettes, restricted to the indices used by each subtemplate.
    pub fn plaquettes(&self) -> &[Plaquettes] {
        &self.plaquettes
    }

    /// A 64-bit digest of the canonical form, stable across platforms,
    /// processes and releases using the same encoding.
    ///
    /// The digest is the first 8 bytes (big-endian) of the SHA-256 of a
    /// length-prefixed little-endian encoding of every slice's shape and
    /// plaquette names.
    pub fn reliable_hash(&self) -> u64 {
        self.reliable_hash
    }

    pub(crate) fn canonical_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.reliable_hash
            .cmp(&other.reliable_hash)
            .then_with(|| self.canonical.cmp(&other.canonical))
    }

    /// Serializable form of the key.
    pub fn to_document(&self) -> DetectorDatabaseKeyDocument {
        DetectorDatabaseKeyDocument {
            subtemplates: self
                .subtemplates
                .iter()
                .map(|s| s.rows().into_iter().map(|row| row.to_vec()).collect())
                .collect(),
            plaquettes: self.plaquettes.clone(),
        }
    }

    /// Rebuild a key from its serializable form.
    pub fn from_document(document: DetectorDatabaseKeyDocument) -> CompileResult<Self> {
        let subtemplates = document
            .subtemplates
            .into_iter()
            .map(rows_to_array)
            .collect::<CompileResult<Vec<_>>>()?;
        Self::new(&subtemplates, &document.plaquettes)
    }
}

impl PartialEq for DetectorDatabaseKey {
    fn eq(&self, other: &Self) -> bool {
        self.reliable_hash == other.reliable_hash && self.canonical == other.canonical
    }
}

impl Eq for DetectorDatabaseKey {}

impl Hash for DetectorDatabaseKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.reliable_hash);
    }
}

/// Serialized form of a [`DetectorDatabaseKey`]: subtemplates as nested
/// rows and the restricted plaquette collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorDatabaseKeyDocument {
    /// One row-major grid of indices per time slice.
    pub subtemplates: Vec<Vec<Vec<u32>>>,
    /// One plaquette collection per time slice.
    pub plaquettes: Vec<Plaquettes>,
}

fn canonical_slice(subtemplate: &Subtemplate, plaquettes: &Plaquettes) -> CanonicalSlice {
    let default = plaquettes.collection().default_value();
    CanonicalSlice {
        shape: subtemplate.dim(),
        names: subtemplate
            .iter()
            .map(|&i| {
                let plaquette = if i == 0 { default } else { plaquettes.get(i) };
                plaquette.name().to_owned()
            })
            .collect(),
    }
}

fn reliable_hash_of(canonical: &[CanonicalSlice]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(RELIABLE_HASH_DOMAIN);
    hasher.update((canonical.len() as u64).to_le_bytes());
    for slice in canonical {
        hasher.update((slice.shape.0 as u64).to_le_bytes());
        hasher.update((slice.shape.1 as u64).to_le_bytes());
        for name in &slice.names {
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
        }
    }
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

fn rows_to_array(rows: Vec<Vec<u32>>) -> CompileResult<Subtemplate> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(LatticeError::Shape("subtemplate rows have different lengths".into()).into());
    }
    let data: Vec<u32> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), data)
        .map_err(|e| CompileError::Lattice(LatticeError::Array(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use stratum_ir::Circuit;
    use stratum_lattice::Plaquette;

    fn named(name: &str) -> Plaquette {
        Plaquette::new(name, Circuit::new())
    }

    fn collection() -> Plaquettes {
        Plaquettes::from_entries([(1, named("a")), (2, named("b")), (3, named("c"))])
    }

    #[test]
    fn test_length_mismatch_reports_both_counts() {
        let subtemplates = vec![array![[1]]; 4];
        let plaquettes = vec![collection(); 3];
        let err = DetectorDatabaseKey::new(&subtemplates, &plaquettes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DetectorDatabaseKey can only store an equal number of subtemplates and plaquettes. \
             Got 4 subtemplates and 3 plaquettes."
        );
    }

    #[test]
    fn test_num_timeslices() {
        for n in 0..4 {
            let key =
                DetectorDatabaseKey::new(&vec![array![[1]]; n], &vec![collection(); n]).unwrap();
            assert_eq!(key.num_timeslices(), n);
        }
    }

    #[test]
    fn test_collections_are_restricted() {
        let key = DetectorDatabaseKey::new(&[array![[0, 1, 0]]], &[collection()]).unwrap();
        assert_eq!(key.plaquettes()[0].collection().len(), 1);
    }

    #[test]
    fn test_missing_index_resolves_to_default() {
        let unmapped = DetectorDatabaseKey::new(&[array![[1, 7]]], &[collection()]).unwrap();
        let empty = DetectorDatabaseKey::new(&[array![[1, 0]]], &[collection()]).unwrap();
        assert_eq!(unmapped, empty);
        assert_eq!(unmapped.reliable_hash(), empty.reliable_hash());

        let mapped = DetectorDatabaseKey::new(&[array![[1, 2]]], &[collection()]).unwrap();
        assert_ne!(mapped, empty);
    }

    #[test]
    fn test_renumbering_gives_equal_key() {
        let original = DetectorDatabaseKey::new(&[array![[1, 2, 0]]], &[collection()]).unwrap();
        let renumbered = DetectorDatabaseKey::new(
            &[array![[11, 12, 0]]],
            &[collection().map_indices(|i| i + 10)],
        )
        .unwrap();
        assert_eq!(original, renumbered);
        assert_eq!(original.reliable_hash(), renumbered.reliable_hash());
    }

    #[test]
    fn test_different_names_give_different_keys() {
        let a = DetectorDatabaseKey::new(&[array![[1]]], &[collection()]).unwrap();
        let b = DetectorDatabaseKey::new(&[array![[2]]], &[collection()]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.reliable_hash(), b.reliable_hash());
    }

    #[test]
    fn test_document_roundtrip() {
        let key = DetectorDatabaseKey::new(&[array![[1, 2], [3, 0]]], &[collection()]).unwrap();
        let back = DetectorDatabaseKey::from_document(key.to_document()).unwrap();
        assert_eq!(back, key);
        assert_eq!(back.subtemplates(), key.subtemplates());
    }

    #[test]
    fn test_ragged_document_is_rejected() {
        let document = DetectorDatabaseKeyDocument {
            subtemplates: vec![vec![vec![1, 2], vec![3], vec![4, 5, 6]]],
            plaquettes: vec![collection()],
        };
        assert!(matches!(
            DetectorDatabaseKey::from_document(document),
            Err(CompileError::Lattice(LatticeError::Shape(_)))
        ));
    }
}

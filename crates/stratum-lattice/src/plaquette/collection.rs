//! Index-addressed plaquette collections.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::Plaquette;
use super::library::empty_square_plaquette;
use crate::scale::LinearFunction;

/// An ordered map with an explicit value returned for missing keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultMap<K: Ord, V> {
    entries: BTreeMap<K, V>,
    default: V,
}

impl<K: Ord + Copy, V: Clone> DefaultMap<K, V> {
    /// Create a map from its entries and its default value.
    pub fn new(entries: BTreeMap<K, V>, default: V) -> Self {
        Self { entries, default }
    }

    /// Value stored at `key`, or the default.
    pub fn get(&self, key: &K) -> &V {
        self.entries.get(key).unwrap_or(&self.default)
    }

    /// The value returned for missing keys.
    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Check if `key` has an explicit entry.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Explicit entries, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter()
    }

    /// Explicit entries.
    pub fn entries(&self) -> &BTreeMap<K, V> {
        &self.entries
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there is no explicit entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rename every key through `f`. If two keys collide, the larger
    /// original key wins.
    #[must_use]
    pub fn map_keys(&self, f: impl Fn(K) -> K) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(&k, v)| (f(k), v.clone()))
                .collect(),
            default: self.default.clone(),
        }
    }

    /// Copy of `self` where the entries of `updates` replace or extend the
    /// existing ones.
    #[must_use]
    pub fn with_updated(&self, updates: &BTreeMap<K, V>) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(updates.iter().map(|(&k, v)| (k, v.clone())));
        Self {
            entries,
            default: self.default.clone(),
        }
    }

    /// Copy of `self` keeping only the explicit entries whose key is in `keys`.
    #[must_use]
    pub fn restricted_to(&self, keys: &BTreeSet<K>) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| keys.contains(k))
                .map(|(&k, v)| (k, v.clone()))
                .collect(),
            default: self.default.clone(),
        }
    }
}

/// A collection of plaquettes addressed by template indices, optionally
/// repeated a scale-dependent number of times.
///
/// Collections with `repetitions` set are the "repeated" layers of a block
/// (the bulk memory rounds). Two collections are repetition-compatible when
/// their repetition functions are equal (including both being `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plaquettes {
    collection: DefaultMap<u32, Plaquette>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repetitions: Option<LinearFunction>,
}

impl Plaquettes {
    /// Create an unrepeated collection.
    pub fn new(collection: DefaultMap<u32, Plaquette>) -> Self {
        Self {
            collection,
            repetitions: None,
        }
    }

    /// Create an unrepeated collection whose default is the empty plaquette.
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, Plaquette)>) -> Self {
        Self::new(DefaultMap::new(
            entries.into_iter().collect(),
            empty_square_plaquette(),
        ))
    }

    /// Plaquette used for `index`.
    pub fn get(&self, index: u32) -> &Plaquette {
        self.collection.get(&index)
    }

    /// The underlying map.
    pub fn collection(&self) -> &DefaultMap<u32, Plaquette> {
        &self.collection
    }

    /// Scale-dependent number of repetitions, if this layer is repeated.
    pub fn repetitions(&self) -> Option<LinearFunction> {
        self.repetitions
    }

    /// Check if this collection is repeated.
    pub fn is_repeated(&self) -> bool {
        self.repetitions.is_some()
    }

    /// Check if both collections share the same repetition structure.
    pub fn is_repetition_compatible(&self, other: &Plaquettes) -> bool {
        self.repetitions == other.repetitions
    }

    /// The same plaquettes, repeated `repetitions(k)` times.
    #[must_use]
    pub fn repeat(&self, repetitions: LinearFunction) -> Self {
        Self {
            collection: self.collection.clone(),
            repetitions: Some(repetitions),
        }
    }

    /// Rename every index through `f`, keeping repetitions.
    #[must_use]
    pub fn map_indices(&self, f: impl Fn(u32) -> u32) -> Self {
        Self {
            collection: self.collection.map_keys(f),
            repetitions: self.repetitions,
        }
    }

    /// Replace or add the given plaquettes, keeping the default and the
    /// repetitions of `self`.
    #[must_use]
    pub fn with_updated_plaquettes(&self, updates: &BTreeMap<u32, Plaquette>) -> Self {
        Self {
            collection: self.collection.with_updated(updates),
            repetitions: self.repetitions,
        }
    }

    /// Keep only the plaquettes stored at `indices`.
    #[must_use]
    pub fn restricted_to(&self, indices: &BTreeSet<u32>) -> Self {
        Self {
            collection: self.collection.restricted_to(indices),
            repetitions: self.repetitions,
        }
    }
}

//! Core data model types for acrodrill.
//!
//! An [`AcronymStore`] maps acronym names to [`TermMap`]s, and a `TermMap`
//! maps term labels to their meanings. Both keep insertion order so the
//! persisted file, the "available acronyms" listing, and the quiz all walk
//! entries in the order they were written.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalize a typed acronym name or term label into its stored key form.
///
/// Surrounding whitespace is dropped and the rest is uppercased, so `" nasa "`
/// and `"NASA"` address the same entry.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A string-keyed map that remembers insertion order.
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Term label → meaning for a single acronym.
pub type TermMap = OrderedMap<String>;

/// All known acronyms, keyed by their uppercase name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcronymStore {
    acronyms: OrderedMap<TermMap>,
}

impl AcronymStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an acronym by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&TermMap> {
        self.acronyms.get(&normalize_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Add a new acronym. Returns `false` and leaves the store untouched if
    /// the normalized name is already present.
    pub fn add(&mut self, name: &str, terms: TermMap) -> bool {
        let key = normalize_key(name);
        if self.acronyms.contains_key(&key) {
            return false;
        }
        self.acronyms.insert(key, terms);
        true
    }

    /// Drop an acronym again. Only used to roll back an add whose save failed.
    pub(crate) fn discard(&mut self, name: &str) -> Option<TermMap> {
        self.acronyms.remove(&normalize_key(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.acronyms.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermMap)> {
        self.acronyms.iter()
    }

    pub fn len(&self) -> usize {
        self.acronyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acronyms.is_empty()
    }

    /// Total number of terms across all acronyms.
    pub fn term_count(&self) -> usize {
        self.acronyms.iter().map(|(_, terms)| terms.len()).sum()
    }
}

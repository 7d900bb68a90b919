//! Dictionary module - the immutable lookup table

use crate::normalize::normalize;
use std::collections::HashMap;

/// A raw `key -> value` pair as supplied by a dictionary source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Key as written in the source (not yet normalized)
    pub key: String,

    /// Mapped value, stored verbatim
    pub value: String,
}

impl DictionaryEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Immutable mapping from normalized key to value
///
/// Every stored key equals `normalize(original_key, ignore_case)`. The only way
/// to populate a dictionary is [`Dictionary::from_entries`], which applies the
/// normalization itself, so the invariant cannot be broken from outside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
    ignore_case: bool,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn empty(ignore_case: bool) -> Self {
        Self {
            entries: HashMap::new(),
            ignore_case,
        }
    }

    /// Build a dictionary from entries in order
    ///
    /// Keys are normalized; on collision the later entry wins.
    pub fn from_entries<I>(entries: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let mut map = HashMap::new();
        for entry in entries {
            let key = normalize(&entry.key, ignore_case).into_owned();
            map.insert(key, entry.value);
        }
        Self {
            entries: map,
            ignore_case,
        }
    }

    /// Look up a raw input, normalizing it with the dictionary's case policy
    pub fn lookup(&self, input: &str) -> Option<&str> {
        self.entries
            .get(normalize(input, self.ignore_case).as_ref())
            .map(String::as_str)
    }

    /// Look up an already-normalized key
    pub fn get(&self, normalized_key: &str) -> Option<&str> {
        self.entries.get(normalized_key).map(String::as_str)
    }

    /// Whether keys and lookup input are case folded
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (normalized key, value) pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

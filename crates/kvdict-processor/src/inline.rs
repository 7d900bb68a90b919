//! Inline dictionary entries as written in a processor definition

use kvdict_domain::DictionaryEntry;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// `dictionary_json` entries in definition order
///
/// Order matters under `ignore_case`: when two keys fold to the same key, the
/// one written later wins. Deserialization keeps every entry as it appears,
/// duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineDictionary {
    entries: Vec<DictionaryEntry>,
}

impl InlineDictionary {
    /// Entries in definition order
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Value of the last entry with exactly this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for InlineDictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| DictionaryEntry::new(key, value))
                .collect(),
        }
    }
}

impl Serialize for InlineDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InlineDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InlineVisitor;

        impl<'de> Visitor<'de> for InlineVisitor {
            type Value = InlineDictionary;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of text keys to text values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    entries.push(DictionaryEntry::new(key, value));
                }
                Ok(InlineDictionary { entries })
            }
        }

        deserializer
            .deserialize_map(InlineVisitor)
            .map_err(|e: D::Error| de::Error::custom(format!("dictionary_json: {}", e)))
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Entry types per source display name
pub type AvailableTypes = BTreeMap<String, Vec<String>>;

/// Entry counts per source display name, in the order the backend sent them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceCounts(Vec<(String, u64)>);

impl SourceCounts {
    /// Set the count for `source`. A known source keeps its position.
    pub fn insert(&mut self, source: String, count: u64) {
        match self.0.iter_mut().find(|(name, _)| *name == source) {
            Some(entry) => entry.1 = count,
            None => self.0.push((source, count)),
        }
    }

    pub fn get(&self, source: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == source)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter().map(|(name, count)| (name, count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.iter().map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u64)> for SourceCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = SourceCounts::default();
        for (source, count) in iter {
            counts.insert(source, count);
        }
        counts
    }
}

impl<const N: usize> From<[(String, u64); N]> for SourceCounts {
    fn from(entries: [(String, u64); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for SourceCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (source, count) in &self.0 {
            map.serialize_entry(source, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SourceCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = SourceCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of source name to entry count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = SourceCounts::default();
                while let Some((source, count)) = access.next_entry::<String, u64>()? {
                    counts.insert(source, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// Aggregate counts reported by the backend, keyed by source display name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_entries: u64,
    #[serde(default)]
    pub entries_by_source: SourceCounts,
    #[serde(default)]
    pub available_types: AvailableTypes,
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Federated data source known to the unified dictionary backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    Aqelei,
    Waryaghri,
    Verbs,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Aqelei, Source::Waryaghri, Source::Verbs];

    /// Wire name used by the search API (`AQELEI`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Aqelei => "AQELEI",
            Source::Waryaghri => "WARYAGHRI",
            Source::Verbs => "VERBS",
        }
    }

    /// Human readable name, also the key used in statistics maps
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::Aqelei => "Aqelɛi",
            Source::Waryaghri => "Waryaghri",
            Source::Verbs => "Verbs",
        }
    }

    /// Collection name used in every favorite-related gateway call.
    ///
    /// Sources without a dedicated collection use their lowercase wire name.
    pub fn collection_name(&self) -> &'static str {
        match self {
            Source::Aqelei => "dictionary_aqelɛi",
            Source::Waryaghri => "dictionary_waryaghri",
            Source::Verbs => "verbs",
        }
    }

    pub fn is_verbs(&self) -> bool {
        matches!(self, Source::Verbs)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown source: {0}")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    /// Accepts the wire name, display name or collection name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Source::ALL
            .into_iter()
            .find(|source| {
                source.as_str().to_lowercase() == needle
                    || source.display_name().to_lowercase() == needle
                    || source.collection_name() == needle
            })
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

/// Enabled/disabled flag per source.
///
/// An empty active set is valid and means no search will be dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFilterSet {
    flags: BTreeMap<Source, bool>,
}

impl SourceFilterSet {
    /// Every known source present but disabled
    pub fn none() -> Self {
        Self {
            flags: Source::ALL.into_iter().map(|s| (s, false)).collect(),
        }
    }

    pub fn all() -> Self {
        Self {
            flags: Source::ALL.into_iter().map(|s| (s, true)).collect(),
        }
    }

    pub fn with_enabled(sources: &[Source]) -> Self {
        let mut set = Self::none();
        for source in sources {
            set.set(*source, true);
        }
        set
    }

    pub fn set(&mut self, source: Source, enabled: bool) {
        self.flags.insert(source, enabled);
    }

    pub fn is_enabled(&self, source: Source) -> bool {
        self.flags.get(&source).copied().unwrap_or(false)
    }

    /// Enabled sources in declaration order
    pub fn active(&self) -> Vec<Source> {
        self.flags
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(source, _)| *source)
            .collect()
    }

    pub fn has_active(&self) -> bool {
        self.flags.values().any(|enabled| *enabled)
    }
}

impl Default for SourceFilterSet {
    fn default() -> Self {
        Self::with_enabled(&[Source::Aqelei, Source::Waryaghri])
    }
}

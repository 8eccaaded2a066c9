use amawal_types::{Source, SourceFilterSet};
use serde::{Deserialize, Serialize};

fn default_max_results() -> usize {
    50
}

fn default_sources() -> Vec<Source> {
    vec![Source::Aqelei, Source::Waryaghri]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on rows requested per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Sources enabled when a session starts
    #[serde(default = "default_sources")]
    pub default_sources: Vec<Source>,
}

impl SearchConfig {
    pub fn filters(&self) -> SourceFilterSet {
        SourceFilterSet::with_enabled(&self.default_sources)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            default_sources: default_sources(),
        }
    }
}

use std::sync::Arc;

use amawal_gateway::DictionaryGateway;
use amawal_types::{AvailableTypes, Source, Statistics};
use tokio::sync::RwLock;

#[derive(Default)]
struct CacheSlots {
    statistics: Option<Statistics>,
    available_types: AvailableTypes,
}

/// Aggregate counts and entry types per source, loaded at session start
#[derive(Clone)]
pub struct StatisticsCache {
    gateway: Arc<dyn DictionaryGateway>,
    inner: Arc<RwLock<CacheSlots>>,
}

impl StatisticsCache {
    pub fn new(gateway: Arc<dyn DictionaryGateway>) -> Self {
        Self {
            gateway,
            inner: Arc::new(RwLock::new(CacheSlots::default())),
        }
    }

    /// Reload both slots concurrently. A failed call leaves its slot as it
    /// was and does not hold back the other one.
    pub async fn refresh(&self) {
        tokio::join!(self.refresh_statistics(), self.refresh_available_types());
    }

    async fn refresh_statistics(&self) {
        match self.gateway.statistics().await {
            Ok(statistics) => {
                tracing::info!("Loaded statistics: {} entries", statistics.total_entries);
                self.inner.write().await.statistics = Some(statistics);
            }
            Err(e) => tracing::error!("Error loading statistics: {}", e),
        }
    }

    async fn refresh_available_types(&self) {
        match self.gateway.available_types().await {
            Ok(types) => {
                tracing::debug!("Loaded entry types for {} sources", types.len());
                self.inner.write().await.available_types = types;
            }
            Err(e) => tracing::error!("Error loading types: {}", e),
        }
    }

    pub async fn statistics(&self) -> Option<Statistics> {
        self.inner.read().await.statistics.clone()
    }

    pub async fn available_types(&self) -> AvailableTypes {
        self.inner.read().await.available_types.clone()
    }

    /// Entry count over dictionary sources (verbs excluded), grouped by
    /// thousands
    pub async fn total_dictionary_entries(&self) -> String {
        let slots = self.inner.read().await;
        let total: u64 = slots
            .statistics
            .iter()
            .flat_map(|stats| stats.entries_by_source.iter())
            .filter(|(source, _)| !is_verb_source(source))
            .map(|(_, count)| *count)
            .sum();

        group_thousands(total)
    }

    /// Dictionary source names (verbs excluded) in key order
    pub async fn dictionary_sources_only(&self) -> Vec<String> {
        let slots = self.inner.read().await;
        slots
            .statistics
            .iter()
            .flat_map(|stats| stats.entries_by_source.keys())
            .filter(|source| !is_verb_source(source))
            .cloned()
            .collect()
    }
}

fn is_verb_source(name: &str) -> bool {
    name == Source::Verbs.display_name()
}

/// `1234567` -> `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

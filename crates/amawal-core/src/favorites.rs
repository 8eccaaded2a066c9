use std::collections::HashMap;
use std::sync::Arc;

use amawal_gateway::DictionaryGateway;
use amawal_types::{FavoriteRequest, RemovalStatus, SearchResult};
use tokio::sync::RwLock;
use tokio::task::JoinSet;

use crate::auth::AuthStatusProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Not logged in, nothing was sent
    Unauthenticated,
    Added,
    Removed,
    /// Backend answered but reported nothing removed
    Unchanged,
    Failed,
}

#[derive(Default)]
struct FavoriteMap {
    status: HashMap<String, bool>,
    /// Bumped on every clear; writes started under an older epoch are dropped
    epoch: u64,
}

/// Per-result favorite flags keyed by `global_id`.
///
/// Flags are best effort: `toggle` trusts the in-memory value instead of
/// asking the backend again, so a toggle racing an in-flight `reconcile`
/// may be overwritten by the check result. The next reconcile repairs it.
#[derive(Clone)]
pub struct FavoriteTracker {
    gateway: Arc<dyn DictionaryGateway>,
    auth: Arc<dyn AuthStatusProvider>,
    inner: Arc<RwLock<FavoriteMap>>,
}

impl FavoriteTracker {
    pub fn new(gateway: Arc<dyn DictionaryGateway>, auth: Arc<dyn AuthStatusProvider>) -> Self {
        Self {
            gateway,
            auth,
            inner: Arc::new(RwLock::new(FavoriteMap::default())),
        }
    }

    /// Re-derive favorite flags for `results` from the backend.
    ///
    /// One check per result, all running concurrently. Each writes its own
    /// key as soon as it lands; a failed check records `false`. Nothing is
    /// written once the user has logged out.
    pub async fn reconcile(&self, results: &[SearchResult]) {
        // Epoch first: a logout after this point always invalidates it
        let epoch = self.inner.read().await.epoch;

        if !self.auth.is_authenticated() {
            self.clear().await;
            return;
        }

        let mut checks = JoinSet::new();

        for result in results {
            let gateway = self.gateway.clone();
            let auth = self.auth.clone();
            let inner = self.inner.clone();
            let global_id = result.global_id.clone();
            let collection = result.source.collection_name();
            let entry_key = result.entry_key().to_string();

            checks.spawn(async move {
                let favorited = match gateway.is_entry_favorited(collection, &entry_key).await {
                    Ok(status) => status.is_favorited,
                    Err(e) => {
                        tracing::error!("Error checking favorite status for {}: {}", global_id, e);
                        false
                    }
                };

                let mut map = inner.write().await;
                if map.epoch == epoch && auth.is_authenticated() {
                    map.status.insert(global_id, favorited);
                } else {
                    tracing::debug!("Dropping favorite check for {} after logout", global_id);
                }
            });
        }

        tracing::debug!("Reconciling favorites for {} results", checks.len());
        while let Some(joined) = checks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Favorite check task failed: {}", e);
            }
        }
    }

    /// Flip the favorite flag of `result` through the backend
    pub async fn toggle(&self, result: &SearchResult) -> ToggleOutcome {
        let (favorited, epoch) = {
            let map = self.inner.read().await;
            (
                map.status.get(&result.global_id).copied().unwrap_or(false),
                map.epoch,
            )
        };

        if !self.auth.is_authenticated() {
            tracing::info!("User must be authenticated to save favorites");
            return ToggleOutcome::Unauthenticated;
        }

        if favorited {
            match self
                .gateway
                .remove_from_favorites(result.source, result.entry_key())
                .await
            {
                Ok(RemovalStatus { removed: true }) => {
                    self.write(&result.global_id, false, epoch).await;
                    ToggleOutcome::Removed
                }
                Ok(RemovalStatus { removed: false }) => {
                    tracing::warn!("Backend removed nothing for {}", result.global_id);
                    ToggleOutcome::Unchanged
                }
                Err(e) => {
                    tracing::error!("Error removing favorite: {}", e);
                    ToggleOutcome::Failed
                }
            }
        } else {
            let request = FavoriteRequest::from_result(result);
            match self.gateway.add_to_favorites(&request).await {
                Ok(record) => {
                    tracing::debug!("Added favorite {}:{}", record.source_collection, record.entry_id);
                    self.write(&result.global_id, true, epoch).await;
                    ToggleOutcome::Added
                }
                Err(e) => {
                    tracing::error!("Error adding favorite: {}", e);
                    ToggleOutcome::Failed
                }
            }
        }
    }

    /// Forget every flag, e.g. on logout
    pub async fn clear(&self) {
        let mut map = self.inner.write().await;
        map.status.clear();
        map.epoch += 1;
    }

    pub async fn is_favorited(&self, global_id: &str) -> bool {
        self.inner
            .read()
            .await
            .status
            .get(global_id)
            .copied()
            .unwrap_or(false)
    }

    pub async fn snapshot(&self) -> HashMap<String, bool> {
        self.inner.read().await.status.clone()
    }

    async fn write(&self, global_id: &str, favorited: bool, epoch: u64) {
        let mut map = self.inner.write().await;
        if map.epoch == epoch && self.auth.is_authenticated() {
            map.status.insert(global_id.to_string(), favorited);
        }
    }
}

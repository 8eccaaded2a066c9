use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use amawal_config::search::SearchConfig;
use amawal_gateway::DictionaryGateway;
use amawal_types::{SearchResult, Source, SourceFilterSet};
use rand::seq::SliceRandom;
use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::auth::AuthStatusProvider;
use crate::favorites::FavoriteTracker;
use crate::preprocess::{Preprocessor, TermPreprocessor};
use crate::state::{SearchOutcome, SearchPhase, SessionState, SkipReason};
use crate::statistics::StatisticsCache;

struct SessionInner {
    id: Uuid,
    gateway: Arc<dyn DictionaryGateway>,
    auth: Arc<dyn AuthStatusProvider>,
    state: RwLock<SessionState>,
    favorites: FavoriteTracker,
    statistics: StatisticsCache,
    /// Sequence number of the latest dispatch, only that one may write
    dispatch: AtomicU64,
    max_results: usize,
    preprocessor: TermPreprocessor,
    started: AtomicBool,
    cancel: CancellationToken,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Federated search over the dictionary sources.
///
/// Cheap to clone; clones share one session. Every operation that talks to
/// the gateway is async, callers that must not wait spawn it.
#[derive(Clone)]
pub struct SearchSession {
    inner: Arc<SessionInner>,
}

impl SearchSession {
    pub fn new(
        gateway: Arc<dyn DictionaryGateway>,
        auth: Arc<dyn AuthStatusProvider>,
        config: &SearchConfig,
    ) -> Self {
        let inner = SessionInner {
            id: Uuid::new_v4(),
            favorites: FavoriteTracker::new(gateway.clone(), auth.clone()),
            statistics: StatisticsCache::new(gateway.clone()),
            gateway,
            auth,
            state: RwLock::new(SessionState::new(config.filters())),
            dispatch: AtomicU64::new(0),
            max_results: config.max_results,
            preprocessor: TermPreprocessor,
            started: AtomicBool::new(false),
            cancel: CancellationToken::new(),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Subscribe to auth changes and load statistics. Later calls are no-ops.
    pub async fn start(&self) {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!(session = %self.inner.id, "Starting search session");

        let receiver = self.inner.auth.subscribe();
        tokio::spawn(watch_auth(
            Arc::downgrade(&self.inner),
            receiver,
            self.inner.cancel.clone(),
        ));

        self.inner.statistics.refresh().await;
    }

    /// Stop listening to auth changes. In-flight requests still finish.
    pub fn shutdown(&self) {
        tracing::info!(session = %self.inner.id, "Shutting down search session");
        self.inner.cancel.cancel();
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn favorites(&self) -> &FavoriteTracker {
        &self.inner.favorites
    }

    pub fn statistics(&self) -> &StatisticsCache {
        &self.inner.statistics
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.auth.is_authenticated()
    }

    pub async fn state(&self) -> SessionState {
        self.inner.state.read().await.clone()
    }

    pub async fn results(&self) -> Vec<SearchResult> {
        self.inner.state.read().await.results.clone()
    }

    /// Search with the session's own filters and result limit
    pub async fn search(&self, term: &str) -> SearchOutcome {
        let sources = self.inner.state.read().await.filters.active();
        self.perform_search(term, &sources, self.inner.max_results)
            .await
    }

    /// Query `active_sources` for `term` and replace the result set.
    ///
    /// Never fails: a gateway error ends in [`SearchPhase::Failed`] with an
    /// empty result set. A response that arrives after a newer dispatch is
    /// dropped.
    pub async fn perform_search(
        &self,
        term: &str,
        active_sources: &[Source],
        max_results: usize,
    ) -> SearchOutcome {
        let query = self.inner.preprocessor.process(term);

        let ticket = {
            let mut state = self.inner.state.write().await;
            state.search_term = term.to_string();

            if query.is_empty() {
                self.next_ticket();
                state.results.clear();
                state.has_searched = false;
                state.loading = false;
                state.phase = SearchPhase::Idle;
                return SearchOutcome::Skipped(SkipReason::BlankTerm);
            }

            if active_sources.is_empty() {
                tracing::debug!("No active source, search not dispatched");
                return SearchOutcome::Skipped(SkipReason::NoActiveSources);
            }

            if max_results == 0 {
                tracing::warn!("Refusing search with a zero result limit");
                return SearchOutcome::Skipped(SkipReason::InvalidLimit);
            }

            state.loading = true;
            state.phase = SearchPhase::Searching;
            self.next_ticket()
        };

        tracing::debug!(session = %self.inner.id, ticket, "Searching '{}' in {:?}", query, active_sources);
        let response = self
            .inner
            .gateway
            .search_across_sources(&query, active_sources, max_results)
            .await;

        let (phase, results) = {
            let mut state = self.inner.state.write().await;
            if !self.is_latest(ticket) {
                tracing::debug!(ticket, "Discarding stale search response");
                return SearchOutcome::Superseded;
            }

            state.loading = false;
            state.has_searched = true;

            match response {
                Ok(results) => {
                    state.phase = if results.is_empty() {
                        SearchPhase::Empty
                    } else {
                        SearchPhase::Results
                    };
                    state.results = results;
                    (state.phase, state.results.clone())
                }
                Err(e) => {
                    tracing::error!("Search error: {}", e);
                    state.results.clear();
                    state.phase = SearchPhase::Failed;
                    return SearchOutcome::Completed(SearchPhase::Failed);
                }
            }
        };

        tracing::info!("{} results for '{}'", results.len(), query);
        self.inner.favorites.reconcile(&results).await;

        SearchOutcome::Completed(phase)
    }

    /// Show one random entry.
    ///
    /// `explicit` wins; otherwise one active source is picked uniformly at
    /// random. With neither, nothing is sent.
    pub async fn random_entry(&self, explicit: Option<Source>) -> SearchOutcome {
        let (source, ticket) = {
            let mut state = self.inner.state.write().await;

            let source = match explicit {
                Some(source) => source,
                None => match pick_source(&state.filters.active()) {
                    Some(source) => source,
                    None => {
                        tracing::debug!("No active source, random entry not requested");
                        return SearchOutcome::Skipped(SkipReason::NoActiveSources);
                    }
                },
            };

            state.loading = true;
            state.phase = SearchPhase::Searching;
            (source, self.next_ticket())
        };

        tracing::debug!(session = %self.inner.id, ticket, "Requesting random entry from {}", source);
        let response = self.inner.gateway.random_entry(Some(source)).await;

        let entry = {
            let mut state = self.inner.state.write().await;
            if !self.is_latest(ticket) {
                tracing::debug!(ticket, "Discarding stale random entry");
                return SearchOutcome::Superseded;
            }

            state.loading = false;

            match response {
                Ok(entry) => {
                    state.search_term = entry.word.clone();
                    state.results = vec![entry.clone()];
                    state.has_searched = true;
                    state.phase = SearchPhase::Results;
                    entry
                }
                Err(e) => {
                    tracing::error!("Random entry error: {}", e);
                    state.phase = state.settled_phase();
                    return SearchOutcome::Completed(state.phase);
                }
            }
        };

        self.inner
            .favorites
            .reconcile(std::slice::from_ref(&entry))
            .await;

        SearchOutcome::Completed(SearchPhase::Results)
    }

    /// Back to the initial state. Responses still in flight are dropped when
    /// they arrive.
    pub async fn clear_search(&self) {
        let mut state = self.inner.state.write().await;
        self.next_ticket();
        state.reset();
    }

    pub async fn select_result(&self, result: SearchResult) {
        self.inner.state.write().await.selected_result = Some(result);
    }

    pub async fn close_detail_view(&self) {
        self.inner.state.write().await.selected_result = None;
    }

    pub async fn filters(&self) -> SourceFilterSet {
        self.inner.state.read().await.filters.clone()
    }

    pub async fn set_source_enabled(&self, source: Source, enabled: bool) {
        self.inner.state.write().await.filters.set(source, enabled);
    }

    pub async fn has_active_source(&self) -> bool {
        self.inner.state.read().await.filters.has_active()
    }

    /// Re-run the current search after a filter change, if there is a term
    pub async fn on_source_filter_change(&self) -> Option<SearchOutcome> {
        let term = self.inner.state.read().await.search_term.clone();
        if term.trim().is_empty() {
            return None;
        }
        Some(self.search(&term).await)
    }

    pub async fn toggle_favorite(&self, result: &SearchResult) -> crate::ToggleOutcome {
        self.inner.favorites.toggle(result).await
    }

    pub async fn is_favorited(&self, global_id: &str) -> bool {
        self.inner.favorites.is_favorited(global_id).await
    }

    /// React to an auth transition: logout forgets every favorite flag, login
    /// re-checks the current results.
    pub async fn on_auth_changed(&self, authenticated: bool) {
        if !authenticated {
            tracing::debug!(session = %self.inner.id, "Logged out, clearing favorites");
            self.inner.favorites.clear().await;
            return;
        }

        let results = self.results().await;
        if !results.is_empty() {
            tracing::debug!(session = %self.inner.id, "Logged in, reloading favorites");
            self.inner.favorites.reconcile(&results).await;
        }
    }

    pub async fn results_summary(&self) -> String {
        let state = self.inner.state.read().await;

        if !state.has_searched {
            return "Enter a search term to find entries across all dictionaries".to_string();
        }

        if state.loading {
            return "Searching...".to_string();
        }

        if state.results.is_empty() {
            return format!("No results found for \"{}\"", state.search_term);
        }

        let sources = state
            .filters
            .active()
            .iter()
            .map(Source::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{} results for \"{}\" in {}",
            state.results.len(),
            state.search_term,
            sources
        )
    }

    fn next_ticket(&self) -> u64 {
        self.inner.dispatch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.inner.dispatch.load(Ordering::SeqCst) == ticket
    }
}

fn pick_source(active: &[Source]) -> Option<Source> {
    active.choose(&mut rand::thread_rng()).copied()
}

/// Auth listener. Holds the session weakly so dropping the last handle ends it.
async fn watch_auth(
    session: Weak<SessionInner>,
    mut receiver: watch::Receiver<bool>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => break,
            changed = receiver.changed() => {
                if changed.is_err() {
                    tracing::debug!("Auth stream closed");
                    break;
                }

                let authenticated = *receiver.borrow_and_update();
                let Some(inner) = session.upgrade() else {
                    break;
                };
                let session = SearchSession { inner };

                if authenticated {
                    tokio::spawn(async move { session.on_auth_changed(true).await });
                } else {
                    session.on_auth_changed(false).await;
                }
            }
        }
    }

    tracing::debug!("Auth listener stopped");
}

use amawal_types::{SearchResult, SourceFilterSet};

/// Lifecycle of the current search.
///
/// `Failed` looks like `Empty` to a UI (`has_searched` set, no results) but
/// is kept apart so callers can tell them apart in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Results,
    Empty,
    Failed,
}

/// Snapshot of a search session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub search_term: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub has_searched: bool,
    pub selected_result: Option<SearchResult>,
    pub phase: SearchPhase,
    pub filters: SourceFilterSet,
}

impl SessionState {
    pub fn new(filters: SourceFilterSet) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    /// Phase implied by the settled fields, used when a request ends without
    /// replacing the results
    pub(crate) fn settled_phase(&self) -> SearchPhase {
        if !self.has_searched {
            SearchPhase::Idle
        } else if self.results.is_empty() {
            SearchPhase::Empty
        } else {
            SearchPhase::Results
        }
    }

    pub(crate) fn reset(&mut self) {
        self.search_term.clear();
        self.results.clear();
        self.loading = false;
        self.has_searched = false;
        self.selected_result = None;
        self.phase = SearchPhase::Idle;
    }
}

/// Why a request never reached the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BlankTerm,
    NoActiveSources,
    InvalidLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Rejected locally, no request sent
    Skipped(SkipReason),
    /// Response applied to the session
    Completed(SearchPhase),
    /// A newer request was issued (or the search cleared) before the
    /// response arrived; the response was dropped
    Superseded,
}

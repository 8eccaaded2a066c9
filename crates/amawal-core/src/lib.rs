pub mod auth;
pub mod favorites;
pub mod preprocess;
pub mod session;
pub mod state;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use auth::{AuthStatus, AuthStatusProvider};
pub use favorites::{FavoriteTracker, ToggleOutcome};
pub use session::SearchSession;
pub use state::{SearchOutcome, SearchPhase, SessionState, SkipReason};
pub use statistics::StatisticsCache;

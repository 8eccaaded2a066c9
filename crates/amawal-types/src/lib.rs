pub mod favorite;
pub mod result;
pub mod source;
pub mod statistics;
pub mod types;

pub use favorite::{FavoriteRecord, FavoriteRequest, FavoriteStatus, RemovalStatus};
pub use result::{MatchType, SearchResult};
pub use source::{Source, SourceFilterSet};
pub use statistics::{AvailableTypes, SourceCounts, Statistics};
pub use types::*;

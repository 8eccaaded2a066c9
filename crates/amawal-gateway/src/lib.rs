mod http;

pub use http::HttpGateway;

use amawal_types::{
    AvailableTypes, FavoriteRecord, FavoriteRequest, FavoriteStatus, RemovalStatus, SearchResult,
    Source, Statistics,
};

/// Remote unified dictionary service
#[async_trait::async_trait]
pub trait DictionaryGateway: Send + Sync {
    /// Ranked matches for `term` across the given sources
    async fn search_across_sources(
        &self,
        term: &str,
        sources: &[Source],
        limit: usize,
    ) -> Result<Vec<SearchResult>, GatewayError>;

    /// One random entry, from `source` when given
    async fn random_entry(&self, source: Option<Source>) -> Result<SearchResult, GatewayError>;

    async fn statistics(&self) -> Result<Statistics, GatewayError>;

    async fn available_types(&self) -> Result<AvailableTypes, GatewayError>;

    async fn add_to_favorites(
        &self,
        request: &FavoriteRequest,
    ) -> Result<FavoriteRecord, GatewayError>;

    async fn remove_from_favorites(
        &self,
        source: Source,
        id_or_word: &str,
    ) -> Result<RemovalStatus, GatewayError>;

    async fn is_entry_favorited(
        &self,
        collection: &str,
        id_or_word: &str,
    ) -> Result<FavoriteStatus, GatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Failed to parse response: {0}")]
    DecodeError(String),
}

use amawal_config::gateway::GatewayConfig;
use amawal_types::{
    AvailableTypes, FavoriteRecord, FavoriteRequest, FavoriteStatus, RemovalStatus, SearchResult,
    Source, Statistics,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{DictionaryGateway, GatewayError};

/// JSON client for the unified dictionary REST API
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    api_root: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            api_root: config.api_root().to_string(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.api_root, path));

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn search_request(&self, term: &str, sources: &[Source], limit: usize) -> RequestBuilder {
        let sources = sources
            .iter()
            .map(Source::as_str)
            .collect::<Vec<_>>()
            .join(",");

        self.request(Method::GET, "/api/unified/search").query(&[
            ("q", term.to_string()),
            ("sources", sources),
            ("limit", limit.to_string()),
        ])
    }

    fn random_request(&self, source: Option<Source>) -> RequestBuilder {
        let builder = self.request(Method::GET, "/api/unified/random");
        match source {
            Some(source) => builder.query(&[("source", source.as_str())]),
            None => builder,
        }
    }

    fn favorite_check_request(&self, collection: &str, id_or_word: &str) -> RequestBuilder {
        self.request(Method::GET, "/api/favorites/check")
            .query(&[("collection", collection), ("entryId", id_or_word)])
    }

    fn favorite_removal_request(&self, source: Source, id_or_word: &str) -> RequestBuilder {
        self.request(Method::DELETE, "/api/favorites")
            .query(&[("source", source.as_str()), ("entryId", id_or_word)])
    }

    async fn send<T>(&self, builder: RequestBuilder) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        decode_response(status, &body)
    }
}

/// Map a finished response to its payload or the matching error
fn decode_response<T>(status: StatusCode, body: &[u8]) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(GatewayError::AuthenticationError);
    }

    if !status.is_success() {
        return Err(GatewayError::Status {
            status: status.as_u16(),
            message: String::from_utf8_lossy(body).into_owned(),
        });
    }

    serde_json::from_slice(body).map_err(|e| GatewayError::DecodeError(e.to_string()))
}

/// The backend answers `null` when a source has no entries
fn require_entry(entry: Option<SearchResult>) -> Result<SearchResult, GatewayError> {
    let mut entry =
        entry.ok_or_else(|| GatewayError::ApiError("No random entry returned".to_string()))?;
    entry.ensure_global_id();
    Ok(entry)
}

#[async_trait]
impl DictionaryGateway for HttpGateway {
    async fn search_across_sources(
        &self,
        term: &str,
        sources: &[Source],
        limit: usize,
    ) -> Result<Vec<SearchResult>, GatewayError> {
        tracing::debug!(term, ?sources, limit, "searching across sources");

        let mut results: Vec<SearchResult> = self.send(self.search_request(term, sources, limit)).await?;
        results.iter_mut().for_each(SearchResult::ensure_global_id);

        tracing::debug!("backend returned {} results", results.len());
        Ok(results)
    }

    async fn random_entry(&self, source: Option<Source>) -> Result<SearchResult, GatewayError> {
        let entry: Option<SearchResult> = self.send(self.random_request(source)).await?;
        require_entry(entry)
    }

    async fn statistics(&self) -> Result<Statistics, GatewayError> {
        self.send(self.request(Method::GET, "/api/unified/statistics"))
            .await
    }

    async fn available_types(&self) -> Result<AvailableTypes, GatewayError> {
        self.send(self.request(Method::GET, "/api/unified/types"))
            .await
    }

    async fn add_to_favorites(
        &self,
        request: &FavoriteRequest,
    ) -> Result<FavoriteRecord, GatewayError> {
        self.send(self.request(Method::POST, "/api/favorites").json(request))
            .await
    }

    async fn remove_from_favorites(
        &self,
        source: Source,
        id_or_word: &str,
    ) -> Result<RemovalStatus, GatewayError> {
        self.send(self.favorite_removal_request(source, id_or_word))
            .await
    }

    async fn is_entry_favorited(
        &self,
        collection: &str,
        id_or_word: &str,
    ) -> Result<FavoriteStatus, GatewayError> {
        self.send(self.favorite_check_request(collection, id_or_word))
            .await
    }
}

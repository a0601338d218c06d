//! REST client for the VectorGo API.
//!
//! Plain single-request operations share one response contract: a 2xx
//! response parses the JSON body, anything else surfaces
//! `AppError::Api` carrying the body text (or the canonical status
//! reason when the body is empty). The streaming upload lives in
//! [`crate::upload`].

use reqwest::Response;
use serde::de::DeserializeOwned;
use vectorgo_core::{AppConfig, AppError, AppResult};

use crate::session::TokenStore;
use crate::types::{
    CollectionStats, DeleteOutcome, LoginRequest, LoginResponse, ResetOutcome, SearchResult,
    ServiceHealth,
};

/// Client for one VectorGo server.
///
/// Cheap to construct; holds a connection-pooling `reqwest::Client` and
/// the file-backed session token store.
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) tokens: TokenStore,
}

impl ApiClient {
    /// Build a client from configuration. The token store is bound to
    /// the configured data directory.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(config.api_root(), TokenStore::new(config.token_path()))
    }

    /// Build a client from an explicit API root URL and token store.
    pub fn with_parts(base_url: impl Into<String>, tokens: TokenStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    /// The session token store backing this client.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in and persist the returned session token.
    ///
    /// Sends credentials unauthenticated; a non-2xx response fails with
    /// `AppError::Auth` carrying the response body or status text.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        tracing::info!(username, "Logging in");

        let response = self
            .http
            .post(self.endpoint("/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| AppError::Http(format!("failed to send login request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(AppError::Auth {
                status: status.as_u16(),
                message,
            });
        }

        let LoginResponse { token } = response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("failed to parse login response: {}", e)))?;
        self.tokens.save(&token)?;

        tracing::info!("Login successful");
        Ok(())
    }

    /// Drop the persisted session token. Idempotent.
    pub fn logout(&self) -> AppResult<()> {
        self.tokens.clear()
    }

    /// Vector-search the collection.
    pub async fn search(&self, query: &str) -> AppResult<SearchResult> {
        tracing::info!(query, "Searching");

        let response = self
            .http
            .get(self.endpoint("/search"))
            .query(&[("q", query)])
            .headers(self.tokens.auth_headers())
            .send()
            .await
            .map_err(|e| AppError::Http(format!("search request failed: {}", e)))?;

        handle_response(response).await
    }

    /// Drop every indexed chunk and start over.
    pub async fn reset_collection(&self) -> AppResult<ResetOutcome> {
        tracing::info!("Resetting collection");

        let response = self
            .http
            .post(self.endpoint("/reset"))
            .headers(self.tokens.auth_headers())
            .send()
            .await
            .map_err(|e| AppError::Http(format!("reset request failed: {}", e)))?;

        handle_response(response).await
    }

    /// Fetch collection statistics.
    pub async fn stats(&self) -> AppResult<CollectionStats> {
        let response = self
            .http
            .get(self.endpoint("/stats"))
            .headers(self.tokens.auth_headers())
            .send()
            .await
            .map_err(|e| AppError::Http(format!("stats request failed: {}", e)))?;

        handle_response(response).await
    }

    /// Delete one indexed file and all of its chunks.
    pub async fn delete_file(&self, name: &str) -> AppResult<DeleteOutcome> {
        tracing::info!(file = name, "Deleting file");

        // Build through Url so the file name is percent-encoded as a
        // single path segment.
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("invalid server URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("server URL cannot be a base".to_string()))?
            .push("files")
            .push(name);

        let response = self
            .http
            .delete(url)
            .headers(self.tokens.auth_headers())
            .send()
            .await
            .map_err(|e| AppError::Http(format!("delete request failed: {}", e)))?;

        handle_response(response).await
    }

    /// Check service identity and liveness.
    pub async fn health(&self) -> AppResult<ServiceHealth> {
        let response = self
            .http
            .get(self.endpoint("/health"))
            .headers(self.tokens.auth_headers())
            .send()
            .await
            .map_err(|e| AppError::Http(format!("health request failed: {}", e)))?;

        handle_response(response).await
    }
}

/// Shared response contract for plain requests.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = error_message(response).await;
        return Err(AppError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Serialization(format!("failed to parse response body: {}", e)))
}

/// Body text of a failed response, falling back to the status reason
/// when the body is empty.
pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => status.canonical_reason().unwrap_or("unknown error").to_string(),
    }
}

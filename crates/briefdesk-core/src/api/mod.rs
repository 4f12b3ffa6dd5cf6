//! Authenticated HTTP client for the briefings API.
//!
//! Every request carries `Authorization: Bearer <access token>` when one is
//! stored. A 401 triggers exactly one call to the refresh endpoint followed by
//! exactly one retry of the original request. There is no backoff and no
//! coordination between concurrent refreshes.

mod error;

use std::sync::Arc;

use anyhow::Context;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use self::error::{ApiError, ApiErrorKind};
use crate::auth::TokenStore;
use crate::config::Config;

/// Prefix every relative path is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Endpoint exchanging the refresh token for a new access token.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Endpoint exchanging email/password for tokens.
pub const LOGIN_PATH: &str = "/auth/token";

/// Standard User-Agent header for briefdesk requests.
pub const USER_AGENT: &str = concat!("briefdesk/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// HTTP verbs the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Verb phrase used in the generic failure message.
    pub fn verb(self) -> &'static str {
        match self {
            Method::Get => "fetch",
            Method::Post => "post to",
            Method::Put => "put to",
            Method::Delete => "delete",
        }
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn failure(self, path: &str) -> String {
        format!("Failed to {} {path}", self.verb())
    }
}

/// Token payload returned by the login and refresh endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Client for the briefings API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Creates a client with default HTTP settings.
    ///
    /// `base_url` is the server root; [`API_PREFIX`] is appended per request.
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_http(base_url, reqwest::Client::new(), tokens)
    }

    pub fn with_http(
        base_url: impl Into<String>,
        http: reqwest::Client,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            tokens,
        }
    }

    /// Creates a client from config, applying the timeout and base URL precedence.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn from_config(
        config: &Config,
        api_url_override: Option<&str>,
        tokens: Arc<dyn TokenStore>,
    ) -> anyhow::Result<Self> {
        let base_url = config.resolve_api_url(api_url_override)?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;

        Ok(Self::with_http(base_url, http, tokens))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// GET `path` and parse the JSON body.
    ///
    /// # Errors
    /// Fails with a generic "Failed to fetch" error when the (possibly retried)
    /// response is not successful or the body is not the expected JSON.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Get, path, None).await?;
        decode(Method::Get, path, response).await
    }

    /// POST `body` as JSON to `path` and parse the JSON response.
    ///
    /// # Errors
    /// See [`ApiClient::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode(Method::Post, path, body)?;
        let response = self.send(Method::Post, path, Some(&payload)).await?;
        decode(Method::Post, path, response).await
    }

    /// PUT `body` as JSON to `path` and parse the JSON response.
    ///
    /// # Errors
    /// See [`ApiClient::get`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode(Method::Put, path, body)?;
        let response = self.send(Method::Put, path, Some(&payload)).await?;
        decode(Method::Put, path, response).await
    }

    /// DELETE `path`. The response body is never read as JSON.
    ///
    /// # Errors
    /// Fails with a generic "Failed to delete" error on a non-2xx response.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, path, None).await?;
        Ok(())
    }

    /// Exchanges the stored refresh token for a new access token and stores it.
    ///
    /// A rotated refresh token in the response replaces the stored one.
    ///
    /// # Errors
    /// Returns an [`ApiErrorKind::Refresh`] error when no refresh token is
    /// stored, the endpoint rejects it, or the new token cannot be saved.
    pub async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let Some(refresh_token) = self.tokens.refresh_token() else {
            tracing::warn!("no refresh token stored");
            return Err(ApiError::refresh("No refresh token found"));
        };

        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .header(CONTENT_TYPE, JSON)
            .bearer_auth(&refresh_token)
            .send()
            .await
            .map_err(|e| ApiError::refresh(format!("refresh request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token refresh rejected");
            return Err(ApiError::refresh(format!(
                "refresh endpoint returned HTTP {}",
                status.as_u16()
            ))
            .with_status(status.as_u16()));
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| ApiError::refresh(format!("invalid refresh response: {e}")))?;

        self.store_grant(&grant)
            .map_err(|e| ApiError::refresh(format!("{e:#}")))?;
        tracing::info!("access token refreshed");

        Ok(grant.access_token)
    }

    /// Logs in with email and password and stores the returned tokens.
    ///
    /// # Errors
    /// Returns an error when the credentials are rejected or the tokens
    /// cannot be stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError> {
        let failure = "Failed to log in";
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .map_err(|e| ApiError::transport(failure, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(failure, status.as_u16(), &body));
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| ApiError::parse(failure, e.to_string()))?;

        self.store_grant(&grant).map_err(|e| {
            ApiError::new(ApiErrorKind::Storage, "Failed to store tokens").with_details(format!("{e:#}"))
        })?;
        tracing::info!("logged in");

        Ok(grant)
    }

    fn store_grant(&self, grant: &TokenGrant) -> anyhow::Result<()> {
        self.tokens.set_access_token(&grant.access_token)?;
        if let Some(refresh) = grant.refresh_token.as_deref() {
            self.tokens.set_refresh_token(refresh)?;
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    /// Sends a request, refreshing and retrying once on 401.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut response = self.send_once(method, path, body).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!(path, "access token rejected, refreshing");
            self.refresh_access_token().await?;
            tracing::debug!(method = ?method, path, "retrying after refresh");
            response = self.send_once(method, path, body).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(method = ?method, path, status = status.as_u16(), "request failed");
            return Err(ApiError::http_status(
                method.failure(path),
                status.as_u16(),
                &text,
            ));
        }

        Ok(response)
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.http.request(method.as_reqwest(), self.url(path));

        if let Some(token) = self.tokens.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(bytes) = body {
            request = request.header(CONTENT_TYPE, JSON).body(bytes.to_vec());
        }

        tracing::debug!(method = ?method, path, "sending request");
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(method.failure(path), &e))?;
        tracing::debug!(method = ?method, path, status = response.status().as_u16(), "response");

        Ok(response)
    }
}

fn encode<B: Serialize + ?Sized>(method: Method, path: &str, body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body)
        .map_err(|e| ApiError::parse(method.failure(path), format!("invalid request body: {e}")))
}

async fn decode<T: DeserializeOwned>(
    method: Method,
    path: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::transport(method.failure(path), &e))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        ApiError::parse(method.failure(path), format!("invalid response body: {e}"))
            .with_status(status)
    })
}

use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthorizationUrl, ConnectionStatus, Meeting};

const AUTHORIZATION_URL: &str = "/integrations/google/authorization-url";
const CALLBACK: &str = "/integrations/google/callback";
const CONNECTION_STATUS: &str = "/integrations/google/connection-status";
const UPCOMING_MEETINGS: &str = "/integrations/google/upcoming-meetings";

/// Google Calendar integration endpoints.
pub struct Integrations<'a> {
    api: &'a ApiClient,
}

impl<'a> Integrations<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// URL the user visits to grant calendar access.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn authorization_url(&self) -> Result<AuthorizationUrl, ApiError> {
        self.api.get(AUTHORIZATION_URL).await
    }

    /// Completes the OAuth flow with the `code` and `state` from the redirect.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn complete_callback(&self, code: &str, state: &str) -> Result<Value, ApiError> {
        self.api.get(&callback_path(code, state)).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn connection_status(&self) -> Result<ConnectionStatus, ApiError> {
        self.api.get(CONNECTION_STATUS).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn upcoming_meetings(&self) -> Result<Vec<Meeting>, ApiError> {
        self.api.get(UPCOMING_MEETINGS).await
    }
}

fn callback_path(code: &str, state: &str) -> String {
    format!(
        "{CALLBACK}?code={}&state={}",
        urlencoding::encode(code),
        urlencoding::encode(state)
    )
}

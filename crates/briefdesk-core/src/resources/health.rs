use crate::api::{ApiClient, ApiError};
use crate::models::Health;

const HEALTH: &str = "/health";

impl ApiClient {
    /// Backend liveness check.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get(HEALTH).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::resources::test_support::client_for;

    #[tokio::test]
    async fn test_health_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let health = client_for(&server).health().await.unwrap();
        assert!(health.is_ok());
    }
}

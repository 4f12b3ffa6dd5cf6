use crate::api::{ApiClient, ApiError};
use crate::models::User;

const ME: &str = "/users/me";

/// User account endpoints.
pub struct Users<'a> {
    api: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// The account the stored token belongs to.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.api.get(ME).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::resources::test_support::client_for;

    #[tokio::test]
    async fn test_me() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .and(header("authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 12, "email": "ada@example.com", "name": "Ada"}),
            ))
            .mount(&server)
            .await;

        let user = client_for(&server).users().me().await.unwrap();
        assert_eq!(user.id, "12");
        assert_eq!(user.name.as_deref(), Some("Ada"));
    }
}

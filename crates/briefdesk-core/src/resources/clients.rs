use super::item_path;
use crate::api::{ApiClient, ApiError};
use crate::models::{Client, ClientUpdate, NewClient};

// The collection is mounted with a trailing slash; item paths are not.
const COLLECTION: &str = "/clients/";
const ITEM_PREFIX: &str = "/clients";

/// Client (customer) endpoints.
pub struct Clients<'a> {
    api: &'a ApiClient,
}

impl<'a> Clients<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self) -> Result<Vec<Client>, ApiError> {
        self.api.get(COLLECTION).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn get(&self, id: &str) -> Result<Client, ApiError> {
        self.api.get(&item_path(ITEM_PREFIX, id)).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn create(&self, client: &NewClient) -> Result<Client, ApiError> {
        self.api.post(COLLECTION, client).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn update(&self, id: &str, update: &ClientUpdate) -> Result<Client, ApiError> {
        self.api.put(&item_path(ITEM_PREFIX, id), update).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&item_path(ITEM_PREFIX, id)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::resources::test_support::client_for;

    #[tokio::test]
    async fn test_list_uses_trailing_slash_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/clients/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "c1", "name": "Acme", "description": "Widgets"},
                {"_id": "c2", "name": "Globex", "description": "Energy"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let clients = client_for(&server).clients().list().await.unwrap();
        let names: Vec<_> = clients.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Acme", "Globex"]);
        assert_eq!(clients[1].id, "c2");
    }

    #[tokio::test]
    async fn test_create_sends_meeting_notes_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/clients/"))
            .and(body_json(json!({
                "name": "Acme",
                "description": "Widgets",
                "meetingNotes": "Met in March"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"_id": "c1", "name": "Acme", "description": "Widgets"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server)
            .clients()
            .create(&NewClient {
                name: "Acme".to_string(),
                description: "Widgets".to_string(),
                meeting_notes: Some("Met in March".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(client.id, "c1");
    }

    #[tokio::test]
    async fn test_get_update_delete_use_item_path() {
        let server = MockServer::start().await;
        let body = json!({"_id": "c1", "name": "Acme Corp", "description": "Widgets"});
        Mock::given(method("GET"))
            .and(path("/api/v1/clients/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/clients/c1"))
            .and(body_json(json!({"name": "Acme Corp"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/clients/c1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server);
        assert_eq!(api.clients().get("c1").await.unwrap().name, "Acme Corp");
        let update = ClientUpdate {
            name: Some("Acme Corp".to_string()),
            ..Default::default()
        };
        api.clients().update("c1", &update).await.unwrap();
        api.clients().delete("c1").await.unwrap();
    }
}

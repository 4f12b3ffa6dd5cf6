use super::item_path;
use crate::api::{ApiClient, ApiError};
use crate::models::{NewNote, Note, NoteUpdate};

const COLLECTION: &str = "/notes";

/// Meeting notes endpoints.
pub struct Notes<'a> {
    api: &'a ApiClient,
}

impl<'a> Notes<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self) -> Result<Vec<Note>, ApiError> {
        self.api.get(COLLECTION).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn get(&self, id: &str) -> Result<Note, ApiError> {
        self.api.get(&item_path(COLLECTION, id)).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn create(&self, note: &NewNote) -> Result<Note, ApiError> {
        self.api.post(COLLECTION, note).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn update(&self, id: &str, update: &NoteUpdate) -> Result<Note, ApiError> {
        self.api.put(&item_path(COLLECTION, id), update).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&item_path(COLLECTION, id)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::resources::test_support::client_for;

    fn note_json(id: &str, content: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "user_id": "u1",
            "client_name": "Acme",
            "meeting_date": "2025-03-04T10:00:00",
            "content": content,
            "createdAt": "2025-03-01T08:00:00",
            "updatedAt": "2025-03-01T08:00:00"
        })
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([note_json("n1", "hi")])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/notes/n1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(note_json("n1", "hi")))
            .mount(&server)
            .await;

        let api = client_for(&server);
        let notes = api.notes().list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].client_name, "Acme");

        let note = api.notes().get("n1").await.unwrap();
        assert_eq!(note.id, "n1");
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/notes/n1"))
            .and(body_json(json!({"content": "revised"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(note_json("n1", "revised")))
            .expect(1)
            .mount(&server)
            .await;

        let update = NoteUpdate {
            content: Some("revised".to_string()),
            ..Default::default()
        };
        let note = client_for(&server)
            .notes()
            .update("n1", &update)
            .await
            .unwrap();
        assert_eq!(note.content, "revised");
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/notes"))
            .and(body_json(json!({
                "client_name": "Acme",
                "meeting_date": "2025-03-04",
                "content": "Kickoff"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(note_json("n2", "Kickoff")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/notes/n2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server);
        let created = api
            .notes()
            .create(&NewNote {
                client_name: "Acme".to_string(),
                meeting_date: "2025-03-04".to_string(),
                content: "Kickoff".to_string(),
            })
            .await
            .unwrap();
        api.notes().delete(&created.id).await.unwrap();
    }
}

use serde_json::{Value, json};

use super::item_path;
use crate::api::{ApiClient, ApiError};
use crate::models::{Briefing, BriefingFeedback, FeedbackRequest};

const COLLECTION: &str = "/briefings";
const REGENERATE: &str = "/briefings/update";

/// Research briefing endpoints.
pub struct Briefings<'a> {
    api: &'a ApiClient,
}

impl<'a> Briefings<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Lists briefings. A `null` body reads as an empty list.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self) -> Result<Vec<Briefing>, ApiError> {
        let briefings: Option<Vec<Briefing>> = self.api.get(COLLECTION).await?;
        Ok(briefings.unwrap_or_default())
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn get(&self, id: &str) -> Result<Briefing, ApiError> {
        self.api.get(&item_path(COLLECTION, id)).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&item_path(COLLECTION, id)).await
    }

    /// Records whether a briefing was helpful.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn feedback(&self, id: &str, feedback: BriefingFeedback) -> Result<Value, ApiError> {
        let path = format!("{}/feedback", item_path(COLLECTION, id));
        self.api.post(&path, &FeedbackRequest { feedback }).await
    }

    /// Asks the server to regenerate briefings for upcoming meetings.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn regenerate(&self) -> Result<Value, ApiError> {
        self.api.post(REGENERATE, &json!({})).await
    }
}

/// Keeps briefings whose client name contains `term`, ignoring case.
///
/// An empty or blank term keeps everything.
pub fn filter_by_client<'b>(briefings: &'b [Briefing], term: &str) -> Vec<&'b Briefing> {
    let needle = term.trim().to_lowercase();
    briefings
        .iter()
        .filter(|b| needle.is_empty() || b.client_name.to_lowercase().contains(&needle))
        .collect()
}

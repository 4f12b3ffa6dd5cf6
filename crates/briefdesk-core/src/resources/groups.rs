use super::item_path;
use crate::api::{ApiClient, ApiError};
use crate::models::{Group, NewGroup};

const COLLECTION: &str = "/groups/";
const ITEM_PREFIX: &str = "/groups";

/// Group endpoints.
pub struct Groups<'a> {
    api: &'a ApiClient,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self) -> Result<Vec<Group>, ApiError> {
        self.api.get(COLLECTION).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn get(&self, id: &str) -> Result<Group, ApiError> {
        self.api.get(&item_path(ITEM_PREFIX, id)).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn create(&self, group: &NewGroup) -> Result<Group, ApiError> {
        self.api.post(COLLECTION, group).await
    }
}

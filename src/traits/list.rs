//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::Result;

/// List the entities in a scope.
///
/// The scope is whatever the endpoint is nested under: `()` for top-level
/// collections, a project ID for media.
///
/// # Example
///
/// ```ignore
/// use mediaboard::{ApiClient, List, Media};
///
/// let client = ApiClient::from_env()?;
/// let media = Media::list_or_empty(&client, &42).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// What the collection is nested under.
    type Scope: Send + Sync;

    /// List entities in `scope`.
    ///
    /// Returns `Ok(None)` when the server sent no payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(client: &ApiClient, scope: &Self::Scope) -> Result<Option<Vec<Self>>>;

    /// List entities in `scope`, substituting an empty list for an absent payload.
    ///
    /// Request failures are still returned as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_or_empty(client: &ApiClient, scope: &Self::Scope) -> Result<Vec<Self>> {
        Ok(Self::list(client, scope).await?.unwrap_or_default())
    }
}

//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// `Ok(None)` means the server answered successfully without a payload;
/// failures are always reported through `Err`.
///
/// # Example
///
/// ```ignore
/// use mediaboard::{ApiClient, Get, Project};
///
/// let client = ApiClient::from_env()?;
/// let project = Project::get(&client, 42).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    async fn get(client: &ApiClient, id: Self::Id) -> Result<Option<Self>>;
}

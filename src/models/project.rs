//! Project model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::error::Result;
use crate::traits::{Get, List};

/// A gallery project.
///
/// Projects group the media shown in a gallery. The list endpoint and the
/// single-project endpoint return the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Numeric project ID.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the project was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the project was last modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Server fields this struct does not model, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Path of the single-project endpoint.
    pub fn path(id: u64) -> String {
        format!("api/v1/projects/{id}")
    }
}

/// Path of the project collection endpoint.
const PROJECTS_PATH: &str = "api/v1/projects";

#[async_trait]
impl Get for Project {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ApiClient, id: u64) -> Result<Option<Self>> {
        client.get_json(&Self::path(id)).await
    }
}

#[async_trait]
impl List for Project {
    type Scope = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &ApiClient, _scope: &()) -> Result<Option<Vec<Self>>> {
        client.get_json(PROJECTS_PATH).await
    }
}

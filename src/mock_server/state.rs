//! Mock server state management.
//!
//! Provides the in-memory data store for the mock gallery API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Media, Project};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects indexed by ID; listed in ID order.
    pub projects: BTreeMap<u64, Project>,

    /// Media lists indexed by project ID.
    /// A project without an entry answers its media request with `null`.
    pub media: HashMap<u64, Vec<Media>>,

    /// Request count per path.
    pub hits: HashMap<String, usize>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.id, project);
        self
    }

    /// Set the media list for a project.
    pub fn with_media(mut self, project_id: u64, media: Vec<Media>) -> Self {
        self.media.insert(project_id, media);
        self
    }

    /// Get a project by ID.
    pub fn get_project(&self, id: u64) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Get the media list of a project, if one was set.
    pub fn get_media(&self, project_id: u64) -> Option<&Vec<Media>> {
        self.media.get(&project_id)
    }

    /// List all projects in ID order.
    pub fn list_projects(&self) -> Vec<&Project> {
        self.projects.values().collect()
    }

    /// Rename a project, returning the updated version.
    pub fn rename_project(&mut self, id: u64, name: &str) -> Option<&Project> {
        let project = self.projects.get_mut(&id)?;
        project.name = name.to_string();
        Some(project)
    }

    /// Count a request to `path`.
    pub fn record_hit(&mut self, path: &str) {
        *self.hits.entry(path.to_string()).or_default() += 1;
    }

    /// Number of requests served for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.get(path).copied().unwrap_or(0)
    }
}

//! Mock gallery API server.
//!
//! Provides an axum-based HTTP server that simulates the gallery API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock gallery API server for testing.
///
/// The server runs in the background and can be used to test the loaders
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating an `ApiClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of requests served for `path`.
    pub async fn hits(&self, path: &str) -> usize {
        self.state.read().await.hits(path)
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for project in scenario.projects {
            state.projects.insert(project.id, project);
        }

        for (project_id, media) in scenario.media {
            state.media.insert(project_id, media);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Project routes
            .route("/api/v1/projects", get(handlers::list_projects))
            .route("/api/v1/projects/:pid", get(handlers::get_project))
            // Media routes
            .route("/api/v1/projects/:pid/media", get(handlers::list_media))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

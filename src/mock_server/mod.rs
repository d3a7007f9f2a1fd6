//! Mock gallery API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the gallery
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests and counts
//! hits per path, so reload workflows can be checked end to end.
//!
//! # Example
//!
//! ```ignore
//! use mediaboard::mock_server::MockServer;
//! use mediaboard::{default_app, ApiClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ApiClient::with_base_url(server.url()).unwrap();
//!     let mut app = default_app(client).unwrap();
//!
//!     // Server comes with default fixtures
//!     let nav = app.navigate("/projects/1/gallery").await.unwrap();
//!     assert_eq!(nav.data()["project"]["name"], "Harbour");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;

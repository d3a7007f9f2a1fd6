//! Typed route loaders for the mediaboard gallery API.
//!
//! Each route of the gallery frontend has a loader that reads its route
//! parameters, issues one read through a typed API client and hands
//! serializable page data to the view. Loaders declare dependency keys so
//! they can be re-run on demand without a full navigation.
//!
//! # Quick Start
//!
//! ```no_run
//! use mediaboard::{default_app, ApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mediaboard::LoadError> {
//!     // Base address from PUBLIC_API_BASE, or http://localhost:8000
//!     let client = ApiClient::from_env()?;
//!     let mut app = default_app(client)?;
//!
//!     // Runs the project list, project and gallery loaders
//!     let nav = app.navigate("/projects/42/gallery").await?;
//!     println!("{}", serde_json::Value::Object(nav.data()));
//!
//!     // Re-run only the loaders that declared `app:media`
//!     app.invalidate("app:media").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ApiClient`] - base address plus a pluggable [`Fetch`] transport
//! - [`Get`] / [`List`] - read operations implemented by [`Project`] and [`Media`]
//! - [`Loader`] - route-bound data loading against a [`LoadContext`]
//! - [`App`] - route table, navigation and [`DependencyTracker`]-driven invalidation
//!
//! # Configuration
//!
//! - `PUBLIC_API_BASE` (optional) - API base address (defaults to `http://localhost:8000`)

mod app;
mod client;
mod deps;
mod error;
mod loader;
mod models;
mod routes;
mod traits;

pub mod cli;
mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{
    resolve_base_url, ApiClient, ClientConfig, Fetch, FetchRequest, FetchResponse, ReqwestFetch,
    API_BASE_ENV, DEFAULT_API_BASE,
};
pub use error::{ApiError, LoadError, Result};

// Re-export traits
pub use traits::{Get, List};

// Re-export models
pub use models::{Media, Project};

// Re-export loaders
pub use loader::{
    GalleryData, GalleryLoader, LoadContext, Loader, ProjectData, ProjectListData,
    ProjectListLoader, ProjectLoader,
};

// Re-export routing and dependency tracking
pub use app::{default_app, App, AppBuilder, Navigation, NodeKind, NodeOutput, RouteInfo};
pub use deps::{DependencyKey, DependencyTracker, MEDIA_KEY, PROJECT_KEY, PROJECT_LIST_KEY};
pub use routes::{RouteParams, RoutePattern};

// Re-export output formatting
pub use output::PrettyPrint;

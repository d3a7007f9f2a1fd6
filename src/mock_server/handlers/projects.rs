//! Project endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// GET /api/v1/projects
pub async fn list_projects(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let mut state = state.write().await;
    state.record_hit("/api/v1/projects");

    let projects: Vec<_> = state.list_projects().into_iter().cloned().collect();
    (StatusCode::OK, Json(projects))
}

/// GET /api/v1/projects/{pid}
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(pid): Path<u64>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    state.record_hit(&format!("/api/v1/projects/{pid}"));

    match state.get_project(pid) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => not_found(pid),
    }
}

/// 404 body in the API's `{"detail": ...}` shape.
pub(super) fn not_found(pid: u64) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "detail": format!("Project {} not found", pid)
        })),
    )
        .into_response()
}

//! Media endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use super::projects::not_found;
use crate::mock_server::state::MockState;

/// GET /api/v1/projects/{pid}/media
///
/// Answers `null` for a project whose media list was never set.
pub async fn list_media(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(pid): Path<u64>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    state.record_hit(&format!("/api/v1/projects/{pid}/media"));

    if state.get_project(pid).is_none() {
        return not_found(pid);
    }

    let media = state.get_media(pid).cloned();
    (StatusCode::OK, Json(media)).into_response()
}

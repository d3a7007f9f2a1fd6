//! E2E tests using the mock gallery server.
//!
//! These tests exercise full navigation and reload workflows against the
//! mock server, rather than individual endpoints.

#![cfg(feature = "test-server")]

use mediaboard::mock_server::{Fixtures, MockServer, MockState};
use mediaboard::{
    default_app, ApiClient, App, GalleryData, LoadError, ProjectData, ProjectListData, MEDIA_KEY,
    PROJECT_KEY, PROJECT_LIST_KEY,
};

fn app_for(server: &MockServer) -> App {
    let client = ApiClient::with_base_url(server.url()).unwrap();
    default_app(client).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Navigation Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_gallery_navigation_workflow() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    let nav = app
        .navigate("/projects/1/gallery")
        .await
        .expect("Failed to load gallery");

    let list: ProjectListData = nav.get("projects").unwrap().unwrap();
    assert_eq!(list.projects.len(), 3);

    let project: ProjectData = nav.get("project").unwrap().unwrap();
    assert_eq!(project.project.name, "Harbour");

    // Server order is preserved
    let gallery: GalleryData = nav.get("gallery").unwrap().unwrap();
    let ids: Vec<u64> = gallery.media.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    assert_eq!(server.hits("/api/v1/projects").await, 1);
    assert_eq!(server.hits("/api/v1/projects/1").await, 1);
    assert_eq!(server.hits("/api/v1/projects/1/media").await, 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_null_and_empty_media_both_render_empty() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    // Project 2 has an empty list, project 3 has none at all
    for pid in [2, 3] {
        let nav = app
            .navigate(&format!("/projects/{pid}/gallery"))
            .await
            .expect("Failed to load gallery");
        assert_eq!(nav.data()["media"], serde_json::json!([]));
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_navigation_between_projects_replaces_data() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    app.navigate("/projects/1").await.unwrap();
    let nav = app.navigate("/projects/2").await.unwrap();

    assert_eq!(nav.data()["project"]["name"], "Orchard");
    assert!(nav.get::<GalleryData>("gallery").unwrap().is_none());

    server.shutdown().await;
}

#[tokio::test]
async fn test_project_not_found() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    let err = app.navigate("/projects/99/gallery").await.unwrap_err();

    match err {
        LoadError::Api(e) => {
            assert!(e.is_not_found());
            assert!(e.to_string().contains("Project 99 not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    server.shutdown().await;
}

// =============================================================================
// Reload Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_reload_project_after_rename() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.navigate("/projects/1/gallery").await.unwrap();

    // Step 1: Something renames the project behind the page's back
    server
        .state()
        .write()
        .await
        .rename_project(1, "Harbour at dusk");

    // Step 2: Invalidate the project key
    let rerun = app.invalidate(PROJECT_KEY).await.unwrap();
    assert_eq!(rerun, vec!["project"]);

    // Step 3: Only the project loader hit the server again
    let nav = app.current().unwrap();
    assert_eq!(nav.data()["project"]["name"], "Harbour at dusk");
    assert_eq!(server.hits("/api/v1/projects/1").await, 2);
    assert_eq!(server.hits("/api/v1/projects").await, 1);
    assert_eq!(server.hits("/api/v1/projects/1/media").await, 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_reload_each_key_independently() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.navigate("/projects/1/gallery").await.unwrap();

    assert_eq!(app.invalidate(PROJECT_LIST_KEY).await.unwrap(), vec!["projects"]);
    assert_eq!(app.invalidate(MEDIA_KEY).await.unwrap(), vec!["gallery"]);
    assert_eq!(app.invalidate(MEDIA_KEY).await.unwrap(), vec!["gallery"]);

    assert_eq!(server.hits("/api/v1/projects").await, 2);
    assert_eq!(server.hits("/api/v1/projects/1").await, 1);
    assert_eq!(server.hits("/api/v1/projects/1/media").await, 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_custom_state_with_media() {
    let state = MockState::new()
        .with_project(Fixtures::minimal_project(5, "Studio"))
        .with_media(5, vec![Fixtures::image(10, 5, "lamp.jpg", 800, 600)]);
    let server = MockServer::with_state(state).await;
    let mut app = app_for(&server);

    let nav = app.navigate("/projects/5/gallery").await.unwrap();

    let gallery: GalleryData = nav.get("gallery").unwrap().unwrap();
    assert_eq!(gallery.media.len(), 1);
    assert_eq!(gallery.media[0].filename, "lamp.jpg");
    assert!(gallery.media[0].is_image());

    server.shutdown().await;
}

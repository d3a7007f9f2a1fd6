//! Base address configuration tests.
//!
//! A recording transport captures the URLs each loader requests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mediaboard::{
    default_app, resolve_base_url, ApiClient, ClientConfig, Fetch, FetchRequest, FetchResponse,
};
use reqwest::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records request URLs and answers with a body chosen by path suffix.
#[derive(Clone, Default)]
struct RecordingFetch {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Fetch for RecordingFetch {
    async fn fetch(&self, request: FetchRequest) -> mediaboard::Result<FetchResponse> {
        let url = request.url.to_string();
        self.seen.lock().unwrap().push(url.clone());

        let body = if url.ends_with("/media") || url.ends_with("/projects") {
            "[]"
        } else {
            r#"{"id":42,"name":"Harbour"}"#
        };

        Ok(FetchResponse {
            status: StatusCode::OK,
            body: body.as_bytes().to_vec(),
        })
    }
}

#[tokio::test]
async fn test_all_loaders_target_configured_base() {
    let fetch = RecordingFetch::default();
    let config = ClientConfig::new("https://api.example.com")
        .unwrap()
        .with_fetch(fetch.clone());
    let mut app = default_app(ApiClient::new(config)).unwrap();

    app.navigate("/projects/42/gallery").await.unwrap();

    let mut seen = fetch.seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(
        seen,
        vec![
            "https://api.example.com/api/v1/projects",
            "https://api.example.com/api/v1/projects/42",
            "https://api.example.com/api/v1/projects/42/media",
        ]
    );
}

#[tokio::test]
async fn test_unset_base_targets_localhost() {
    let fetch = RecordingFetch::default();
    let config = ClientConfig::new(&resolve_base_url(None))
        .unwrap()
        .with_fetch(fetch.clone());
    let mut app = default_app(ApiClient::new(config)).unwrap();

    app.navigate("/projects/42").await.unwrap();

    let seen = fetch.seen.lock().unwrap().clone();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|u| u.starts_with("http://localhost:8000/api/v1/")));
}

#[tokio::test]
async fn test_base_path_prefix_is_kept() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gallery-api/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/gallery-api", mock_server.uri());
    let mut app = default_app(ApiClient::with_base_url(&base).unwrap()).unwrap();

    let nav = app.navigate("/").await.unwrap();
    assert_eq!(nav.data()["projects"], serde_json::json!([]));
}

//! Tests for CLI output formatting.
//!
//! - JSON output with --json flag
//! - Pretty-print output as default

use mediaboard::{GalleryData, Media, PrettyPrint, Project};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_is_valid_json() {
    let project = make_test_project();
    let json_output = serde_json::to_string_pretty(&project).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["name"], "Harbour");
}

#[test]
fn test_empty_gallery_serializes_as_empty_array() {
    let data = GalleryData { media: vec![] };
    let parsed = serde_json::to_value(&data).unwrap();

    assert_eq!(parsed, serde_json::json!({ "media": [] }));
}

#[test]
fn test_json_output_preserves_all_fields() {
    let media = make_test_media();
    let parsed = serde_json::to_value(&media).unwrap();

    for field in ["id", "project_id", "filename", "content_type", "width", "height"] {
        assert!(parsed.get(field).is_some(), "missing {field}");
    }
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let project = make_test_project();
    let pretty_output = project.pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&pretty_output);
    assert!(
        parse_result.is_err(),
        "Default output should NOT be valid JSON"
    );
}

#[test]
fn test_project_pretty_print_shows_key_fields() {
    let project = make_test_project();
    let output = project.pretty_print();

    assert!(output.contains("#42"), "Should show ID");
    assert!(output.contains("Harbour"), "Should show name");
    assert!(output.contains("Created"), "Should show creation time");
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_project() -> Project {
    serde_json::from_value(serde_json::json!({
        "id": 42,
        "name": "Harbour",
        "description": "Boats at dawn",
        "created_at": "2024-03-01T09:30:00Z"
    }))
    .unwrap()
}

fn make_test_media() -> Media {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "project_id": 42,
        "filename": "dawn.jpg",
        "content_type": "image/jpeg",
        "width": 1920,
        "height": 1080
    }))
    .unwrap()
}

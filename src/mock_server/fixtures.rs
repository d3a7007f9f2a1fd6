//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{Media, Project};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// Default scenario with projects and their media.
pub struct DefaultScenario {
    pub projects: Vec<Project>,
    pub media: Vec<(u64, Vec<Media>)>,
}

impl Fixtures {
    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a minimal project with required fields only.
    pub fn minimal_project(id: u64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            description: None,
            created_at: None,
            updated_at: None,
            extra: Default::default(),
        }
    }

    /// Create a project with a description and timestamps.
    pub fn described_project(id: u64, name: &str, description: &str) -> Project {
        let mut project = Self::minimal_project(id, name);
        project.description = Some(description.to_string());
        project.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single();
        project.updated_at = project.created_at;
        project
    }

    // =========================================================================
    // Media Fixtures
    // =========================================================================

    /// Create a minimal media record.
    pub fn minimal_media(id: u64, project_id: u64, filename: &str) -> Media {
        Media {
            id,
            project_id,
            filename: filename.to_string(),
            content_type: None,
            url: None,
            size: None,
            width: None,
            height: None,
            created_at: None,
            extra: Default::default(),
        }
    }

    /// Create a JPEG image record with dimensions and a download URL.
    pub fn image(id: u64, project_id: u64, filename: &str, width: u32, height: u32) -> Media {
        let mut media = Self::minimal_media(id, project_id, filename);
        media.content_type = Some("image/jpeg".to_string());
        media.url = Some(format!("/files/{project_id}/{filename}"));
        media.width = Some(width);
        media.height = Some(height);
        media.size = Some(u64::from(width) * u64::from(height) / 4);
        media
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create the default scenario used by `MockServer::start()`.
    ///
    /// - Project 1 "Harbour" with three images (server order 3, 1, 2)
    /// - Project 2 "Orchard" with an empty media list
    /// - Project 3 "Archive" with no media list at all (served as `null`)
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            projects: vec![
                Self::described_project(1, "Harbour", "Boats at dawn"),
                Self::minimal_project(2, "Orchard"),
                Self::minimal_project(3, "Archive"),
            ],
            media: vec![
                (
                    1,
                    vec![
                        Self::image(3, 1, "pier.jpg", 1600, 900),
                        Self::image(1, 1, "dawn.jpg", 1920, 1080),
                        Self::image(2, 1, "nets.jpg", 1024, 768),
                    ],
                ),
                (2, vec![]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_fixture_is_image() {
        let media = Fixtures::image(1, 1, "dawn.jpg", 1920, 1080);
        assert!(media.is_image());
        assert_eq!(media.dimensions().as_deref(), Some("1920x1080"));
    }

    #[test]
    fn test_default_scenario_shape() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.projects.len(), 3);
        assert!(scenario.media.iter().all(|(pid, _)| *pid != 3));
    }
}

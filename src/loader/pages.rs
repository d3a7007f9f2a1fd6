//! Loaders for the gallery's routes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::deps::{MEDIA_KEY, PROJECT_KEY, PROJECT_LIST_KEY};
use crate::error::LoadError;
use crate::models::{Media, Project};
use crate::traits::{Get, List};

use super::{LoadContext, Loader};

/// Data for the root layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListData {
    /// All projects; empty when the server sent no payload.
    pub projects: Vec<Project>,
}

/// Loads the project list for the root layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectListLoader;

#[async_trait]
impl Loader for ProjectListLoader {
    type Data = ProjectListData;

    fn name(&self) -> &'static str {
        "projects"
    }

    async fn load(&self, ctx: &LoadContext<'_>) -> Result<ProjectListData, LoadError> {
        ctx.depends(PROJECT_LIST_KEY)?;
        let projects = Project::list_or_empty(ctx.client(), &()).await?;
        Ok(ProjectListData { projects })
    }
}

/// Data for the `/projects/[pid]` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    /// The project named by the route.
    pub project: Project,
}

/// Loads the project named by the `pid` route parameter.
///
/// A successful response without a project body fails with
/// [`LoadError::NotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectLoader;

#[async_trait]
impl Loader for ProjectLoader {
    type Data = ProjectData;

    fn name(&self) -> &'static str {
        "project"
    }

    async fn load(&self, ctx: &LoadContext<'_>) -> Result<ProjectData, LoadError> {
        let pid = ctx.params().id("pid")?;
        ctx.depends(PROJECT_KEY)?;

        let project = Project::get(ctx.client(), pid)
            .await?
            .ok_or_else(|| LoadError::NotFound {
                resource: "project",
                id: pid.to_string(),
            })?;

        Ok(ProjectData { project })
    }
}

/// Data for the gallery page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryData {
    /// The project's media in server order; empty when the server sent no payload.
    pub media: Vec<Media>,
}

/// Loads the media list for `/projects/[pid]/gallery`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryLoader;

#[async_trait]
impl Loader for GalleryLoader {
    type Data = GalleryData;

    fn name(&self) -> &'static str {
        "gallery"
    }

    async fn load(&self, ctx: &LoadContext<'_>) -> Result<GalleryData, LoadError> {
        let pid = ctx.params().id("pid")?;
        ctx.depends(MEDIA_KEY)?;

        let media = Media::list_or_empty(ctx.client(), &pid).await?;
        Ok(GalleryData { media })
    }
}

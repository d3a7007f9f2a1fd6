//! Basic example demonstrating the gallery loaders.
//!
//! Run with:
//! ```
//! PUBLIC_API_BASE=http://localhost:8000 cargo run --example basic
//! ```

use mediaboard::{default_app, ApiClient, GalleryData, LoadError, ProjectListData, PROJECT_KEY};

#[tokio::main]
async fn main() -> Result<(), LoadError> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating API client...");
    let client = ApiClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    let mut app = default_app(client)?;

    // Load the root layout
    println!("\n--- Listing Projects ---");
    let nav = app.navigate("/").await?;
    let list: ProjectListData = nav
        .get("projects")
        .map_err(mediaboard::ApiError::from)?
        .unwrap_or(ProjectListData { projects: vec![] });
    for project in &list.projects {
        println!("  - {} (#{})", project.name, project.id);
    }

    // Open the first project's gallery
    if let Some(first) = list.projects.first() {
        println!("\n--- Gallery of {} ---", first.name);
        let nav = app.navigate(&format!("/projects/{}/gallery", first.id)).await?;
        let gallery: Option<GalleryData> = nav.get("gallery").map_err(mediaboard::ApiError::from)?;
        for media in gallery.map(|g| g.media).unwrap_or_default() {
            println!("  - {} {}", media.filename, media.dimensions().unwrap_or_default());
        }

        // Refresh only the project header
        let rerun = app.invalidate(PROJECT_KEY).await?;
        println!("\nReloaded: {}", rerun.join(", "));
    }

    Ok(())
}

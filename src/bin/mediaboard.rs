//! Mediaboard CLI binary.
//!
//! Runs the gallery's route loaders against the API and prints page data.

use clap::Parser;
use mediaboard::cli::{Cli, Command};
use mediaboard::{
    default_app, resolve_base_url, ApiClient, App, ClientConfig, GalleryData, LoadError, Media,
    Navigation, PrettyPrint, Project, ProjectData, ProjectListData,
};
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_url = resolve_base_url(cli.base_url.clone());
    let app = match ClientConfig::new(&base_url).map_err(LoadError::from) {
        Ok(config) => default_app(ApiClient::new(config)),
        Err(e) => Err(e),
    };

    let mut app = match app {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set --base-url or the PUBLIC_API_BASE environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut app, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(app: &mut App, cli: Cli) -> Result<(), LoadError> {
    match cli.command {
        Command::Load { path } => {
            let nav = app.navigate(&path).await?;
            output_navigation(nav, cli.json)
        }
        Command::Reload { path, key } => {
            app.navigate(&path).await?;
            let rerun = app.invalidate(&key).await?;
            if rerun.is_empty() {
                eprintln!("No loader on {path} depends on {key}");
            } else {
                eprintln!("Reloaded: {}", rerun.join(", "));
            }
            match app.current() {
                Some(nav) => output_navigation(nav, cli.json),
                None => Ok(()),
            }
        }
        Command::Routes => {
            let routes = app.routes();
            if cli.json {
                println!("{}", to_json(&routes)?);
            } else {
                let rows: Vec<RouteRow> = routes
                    .into_iter()
                    .map(|r| RouteRow {
                        pattern: r.pattern,
                        kind: r.kind.to_string(),
                        loader: r.loader.to_string(),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
            Ok(())
        }
    }
}

fn output_navigation(nav: &Navigation, json: bool) -> Result<(), LoadError> {
    if json {
        println!("{}", to_json(&nav.data())?);
        return Ok(());
    }

    for output in nav.outputs() {
        println!("{} ({})", output.name(), output.kind());
        match output.name() {
            "projects" => {
                if let Some(data) = decode::<ProjectListData>(nav, "projects")? {
                    let rows: Vec<ProjectRow> = data.projects.iter().map(ProjectRow::from).collect();
                    println!("{}", Table::new(rows));
                }
            }
            "project" => {
                if let Some(data) = decode::<ProjectData>(nav, "project")? {
                    println!("{}", data.project.pretty_print());
                }
            }
            "gallery" => {
                if let Some(data) = decode::<GalleryData>(nav, "gallery")? {
                    if data.media.is_empty() {
                        println!("(no media)");
                    } else {
                        let rows: Vec<MediaRow> = data.media.iter().map(MediaRow::from).collect();
                        println!("{}", Table::new(rows));
                    }
                }
            }
            _ => println!("{}", to_json(output.data())?),
        }
        println!();
    }
    Ok(())
}

fn decode<T: serde::de::DeserializeOwned>(
    nav: &Navigation,
    name: &str,
) -> Result<Option<T>, LoadError> {
    nav.get(name)
        .map_err(|e| LoadError::Api(mediaboard::ApiError::from(e)))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, LoadError> {
    serde_json::to_string_pretty(value).map_err(|e| LoadError::Api(mediaboard::ApiError::from(e)))
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct RouteRow {
    pattern: String,
    kind: String,
    loader: String,
}

#[derive(Tabled)]
struct ProjectRow {
    id: u64,
    name: String,
    description: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct MediaRow {
    id: u64,
    filename: String,
    #[tabled(rename = "type")]
    content_type: String,
    dimensions: String,
}

impl From<&Media> for MediaRow {
    fn from(m: &Media) -> Self {
        Self {
            id: m.id,
            filename: m.filename.clone(),
            content_type: m.content_type.clone().unwrap_or_default(),
            dimensions: m.dimensions().unwrap_or_default(),
        }
    }
}

//! Route table, navigation and invalidation.
//!
//! [`App`] plays the hosting framework's part: it matches a path against
//! the registered layouts and pages, runs their loaders, merges the results
//! into page data and re-runs loaders when a dependency key is invalidated.

use std::fmt;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::deps::{DependencyKey, DependencyTracker};
use crate::error::LoadError;
use crate::loader::{DynLoader, GalleryLoader, LoadContext, Loader, ProjectListLoader, ProjectLoader};
use crate::routes::{RouteParams, RoutePattern};

/// Whether a route node wraps nested routes or terminates a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Runs for every path under its pattern.
    Layout,
    /// Runs only when its pattern matches the whole path.
    Page,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout => f.write_str("layout"),
            Self::Page => f.write_str("page"),
        }
    }
}

struct Node {
    pattern: RoutePattern,
    kind: NodeKind,
    loader: Arc<dyn DynLoader>,
}

/// A registered route, as reported by [`App::routes`].
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    /// Pattern as written.
    pub pattern: String,
    /// Layout or page.
    pub kind: NodeKind,
    /// Name of the node's loader.
    pub loader: &'static str,
}

/// Output of one loader within a navigation.
#[derive(Debug, Clone)]
pub struct NodeOutput {
    node: usize,
    name: &'static str,
    kind: NodeKind,
    data: Value,
}

impl NodeOutput {
    /// Name of the loader that produced this output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kind of the route node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The loader's data, as JSON.
    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// The result of navigating to a path.
#[derive(Debug, Clone)]
pub struct Navigation {
    path: String,
    params: RouteParams,
    outputs: Vec<NodeOutput>,
}

impl Navigation {
    /// The path navigated to.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameters of the matched route.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Per-loader outputs, outermost layout first.
    pub fn outputs(&self) -> &[NodeOutput] {
        &self.outputs
    }

    /// Merged page data.
    ///
    /// Object fields are merged outermost first, so a page's fields shadow
    /// its layouts'. Non-object data is stored under the loader's name.
    pub fn data(&self) -> Map<String, Value> {
        let mut merged = Map::new();
        for output in &self.outputs {
            match &output.data {
                Value::Object(fields) => {
                    merged.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                other => {
                    merged.insert(output.name.to_string(), other.clone());
                }
            }
        }
        merged
    }

    /// Decode one loader's output.
    ///
    /// Returns `Ok(None)` if no loader named `name` ran for this path.
    ///
    /// # Errors
    ///
    /// Returns an error if the output does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> serde_json::Result<Option<T>> {
        self.outputs
            .iter()
            .find(|o| o.name == name)
            .map(|o| serde_json::from_value(o.data.clone()))
            .transpose()
    }
}

type LoadOutcome = Result<(Value, Vec<DependencyKey>), LoadError>;

/// Builder for [`App`].
pub struct AppBuilder {
    client: ApiClient,
    nodes: Vec<(String, NodeKind, Arc<dyn DynLoader>)>,
}

impl AppBuilder {
    /// Register a layout whose loader runs for every path under `pattern`.
    #[must_use]
    pub fn layout(mut self, pattern: &str, loader: impl Loader + 'static) -> Self {
        let loader: Arc<dyn DynLoader> = Arc::new(loader);
        self.nodes.push((pattern.to_string(), NodeKind::Layout, loader));
        self
    }

    /// Register a page whose loader runs when `pattern` matches the whole path.
    #[must_use]
    pub fn page(mut self, pattern: &str, loader: impl Loader + 'static) -> Self {
        let loader: Arc<dyn DynLoader> = Arc::new(loader);
        self.nodes.push((pattern.to_string(), NodeKind::Page, loader));
        self
    }

    /// Parse the patterns and build the app.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidRoutePattern`] for a malformed pattern.
    pub fn build(self) -> Result<App, LoadError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|(pattern, kind, loader)| {
                Ok(Node {
                    pattern: RoutePattern::parse(&pattern)?,
                    kind,
                    loader,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(App {
            client: self.client,
            nodes,
            tracker: DependencyTracker::new(),
            current: None,
        })
    }
}

/// Route table plus the state of the current navigation.
///
/// # Example
///
/// ```no_run
/// use mediaboard::{default_app, ApiClient, GalleryData};
///
/// # async fn example() -> Result<(), mediaboard::LoadError> {
/// let client = ApiClient::from_env()?;
/// let mut app = default_app(client)?;
///
/// let nav = app.navigate("/projects/42/gallery").await?;
/// let gallery: Option<GalleryData> = nav.get("gallery").map_err(mediaboard::ApiError::from)?;
///
/// // Something changed the project; refresh only what depends on it
/// let rerun = app.invalidate("app:project").await?;
/// assert_eq!(rerun, vec!["project"]);
/// # Ok(())
/// # }
/// ```
pub struct App {
    client: ApiClient,
    nodes: Vec<Node>,
    tracker: DependencyTracker,
    current: Option<Navigation>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("client", &self.client)
            .field("routes", &self.routes())
            .field("current", &self.current.as_ref().map(Navigation::path))
            .finish_non_exhaustive()
    }
}

/// The gallery's standard routes: the project list layout at `/`, the
/// project layout at `/projects/[pid]` and the gallery page below it.
///
/// # Errors
///
/// Never fails for the built-in patterns; the `Result` comes from [`AppBuilder::build`].
pub fn default_app(client: ApiClient) -> Result<App, LoadError> {
    App::builder(client)
        .layout("/", ProjectListLoader)
        .layout("/projects/[pid]", ProjectLoader)
        .page("/projects/[pid]/gallery", GalleryLoader)
        .build()
}

impl App {
    /// Start building an app around an injected client.
    pub fn builder(client: ApiClient) -> AppBuilder {
        AppBuilder {
            client,
            nodes: Vec::new(),
        }
    }

    /// The client shared by every loader.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.nodes
            .iter()
            .map(|n| RouteInfo {
                pattern: n.pattern.as_str().to_string(),
                kind: n.kind,
                loader: n.loader.name(),
            })
            .collect()
    }

    /// The current navigation, if any succeeded.
    pub fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Dependency keys declared by the named loader in the current navigation.
    pub fn dependencies_of(&self, loader: &str) -> Vec<&DependencyKey> {
        self.current
            .iter()
            .flat_map(|nav| nav.outputs.iter())
            .filter(|o| o.name == loader)
            .flat_map(|o| self.tracker.keys_of(o.node))
            .collect()
    }

    /// Navigate to `path`, running every loader on its route.
    ///
    /// Layout loaders whose pattern matches a prefix of the path run
    /// together with the page loader matching the whole path. On failure
    /// the previous navigation stays current.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoRoute`] if nothing matches the whole path, or
    /// the first loader error in route order.
    #[tracing::instrument(skip(self))]
    pub async fn navigate(&mut self, path: &str) -> Result<&Navigation, LoadError> {
        let (params, chain) = self.resolve(path)?;
        tracing::debug!(loaders = chain.len(), "running route loaders");

        let outcomes = self.run_nodes(&chain, &params).await;

        let mut outputs = Vec::with_capacity(chain.len());
        let mut registrations = Vec::with_capacity(chain.len());
        for (&node, outcome) in chain.iter().zip(outcomes) {
            let (data, keys) = outcome?;
            outputs.push(self.output(node, data));
            registrations.push((node, keys));
        }

        self.tracker.clear();
        for (node, keys) in registrations {
            self.tracker.register(node, keys);
        }

        Ok(&*self.current.insert(Navigation {
            path: path.to_string(),
            params,
            outputs,
        }))
    }

    /// Re-run the loaders of the current navigation that declared `key`.
    ///
    /// Loaders that did not declare the key are not re-run. Returns the
    /// names of the loaders that ran; nothing runs without a current
    /// navigation. If any re-run fails, no output is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidDependencyKey`] for a malformed key, or
    /// the first loader error.
    #[tracing::instrument(skip(self))]
    pub async fn invalidate(&mut self, key: &str) -> Result<Vec<&'static str>, LoadError> {
        let key = DependencyKey::parse(key)?;
        let targets = if self.current.is_some() {
            self.tracker.dependents(&key)
        } else {
            Vec::new()
        };

        if targets.is_empty() {
            tracing::debug!(%key, "no loaders depend on key");
            return Ok(Vec::new());
        }

        self.rerun(targets).await
    }

    /// Re-run every loader of the current navigation.
    ///
    /// # Errors
    ///
    /// Returns the first loader error; no output is replaced in that case.
    #[tracing::instrument(skip(self))]
    pub async fn invalidate_all(&mut self) -> Result<Vec<&'static str>, LoadError> {
        let targets: Vec<usize> = self
            .current
            .iter()
            .flat_map(|nav| nav.outputs.iter().map(|o| o.node))
            .collect();

        if targets.is_empty() {
            return Ok(Vec::new());
        }

        self.rerun(targets).await
    }

    async fn rerun(&mut self, targets: Vec<usize>) -> Result<Vec<&'static str>, LoadError> {
        let params = match &self.current {
            Some(nav) => nav.params.clone(),
            None => return Ok(Vec::new()),
        };

        let outcomes = self.run_nodes(&targets, &params).await;

        let mut refreshed = Vec::with_capacity(targets.len());
        for (&node, outcome) in targets.iter().zip(outcomes) {
            let (data, keys) = outcome?;
            refreshed.push((node, data, keys));
        }

        let mut names = Vec::with_capacity(refreshed.len());
        for (node, data, keys) in refreshed {
            let output = self.output(node, data);
            names.push(output.name);
            self.tracker.register(node, keys);
            if let Some(slot) = self
                .current
                .as_mut()
                .and_then(|nav| nav.outputs.iter_mut().find(|o| o.node == node))
            {
                *slot = output;
            }
        }

        tracing::debug!(loaders = ?names, "reloaded");
        Ok(names)
    }

    /// Find the route for `path`: its params and the node indices to run,
    /// outermost layout first.
    fn resolve(&self, path: &str) -> Result<(RouteParams, Vec<usize>), LoadError> {
        let exact = |kind: NodeKind| {
            self.nodes.iter().enumerate().find_map(|(i, n)| {
                (n.kind == kind)
                    .then(|| n.pattern.match_exact(path))
                    .flatten()
                    .map(|params| (i, params))
            })
        };

        let (page, params) = match exact(NodeKind::Page) {
            Some((i, params)) => (Some(i), params),
            None => match exact(NodeKind::Layout) {
                Some((_, params)) => (None, params),
                None => return Err(LoadError::NoRoute(path.to_string())),
            },
        };

        let mut chain: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Layout && n.pattern.match_prefix(path).is_some())
            .map(|(i, _)| i)
            .collect();
        chain.sort_by_key(|&i| self.nodes[i].pattern.depth());
        chain.extend(page);

        Ok((params, chain))
    }

    /// Run the given nodes' loaders concurrently; outcomes keep input order.
    async fn run_nodes(&self, nodes: &[usize], params: &RouteParams) -> Vec<LoadOutcome> {
        let client = &self.client;
        let loads = nodes.iter().map(|&i| {
            let loader = self.nodes[i].loader.clone();
            async move {
                let ctx = LoadContext::new(client, params);
                let result = loader.load_value(&ctx).await;
                if let Err(ref e) = result {
                    tracing::warn!(loader = loader.name(), error = %e, "loader failed");
                }
                Ok::<_, LoadError>((result?, ctx.into_dependencies()))
            }
        });
        join_all(loads).await
    }

    fn output(&self, node: usize, data: Value) -> NodeOutput {
        let n = &self.nodes[node];
        NodeOutput {
            node,
            name: n.loader.name(),
            kind: n.kind,
            data,
        }
    }
}

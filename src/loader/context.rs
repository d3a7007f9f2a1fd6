//! Per-invocation loader context.

use std::sync::{Mutex, PoisonError};

use crate::client::ApiClient;
use crate::deps::DependencyKey;
use crate::error::LoadError;
use crate::routes::RouteParams;

/// What a loader sees while it runs: the injected client, the route
/// parameters, and a handle for declaring dependency keys.
#[derive(Debug)]
pub struct LoadContext<'a> {
    client: &'a ApiClient,
    params: &'a RouteParams,
    declared: Mutex<Vec<DependencyKey>>,
}

impl<'a> LoadContext<'a> {
    /// Create a context for one loader invocation.
    pub fn new(client: &'a ApiClient, params: &'a RouteParams) -> Self {
        Self {
            client,
            params,
            declared: Mutex::new(Vec::new()),
        }
    }

    /// The typed API client.
    pub fn client(&self) -> &ApiClient {
        self.client
    }

    /// Parameters of the matched route.
    pub fn params(&self) -> &RouteParams {
        self.params
    }

    /// Declare that this load should be re-run when `key` is invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidDependencyKey`] if `key` is malformed.
    pub fn depends(&self, key: &str) -> Result<(), LoadError> {
        let key = DependencyKey::parse(key)?;
        let mut declared = self.declared.lock().unwrap_or_else(PoisonError::into_inner);
        if !declared.contains(&key) {
            declared.push(key);
        }
        Ok(())
    }

    /// The keys declared so far, in declaration order.
    pub fn into_dependencies(self) -> Vec<DependencyKey> {
        self.declared
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depends_deduplicates_keys() {
        let client = ApiClient::with_base_url("http://localhost:8000").unwrap();
        let params = RouteParams::new();
        let ctx = LoadContext::new(&client, &params);

        ctx.depends("app:project").unwrap();
        ctx.depends("app:media").unwrap();
        ctx.depends("app:project").unwrap();

        let keys: Vec<_> = ctx
            .into_dependencies()
            .into_iter()
            .map(|k| k.as_str().to_string())
            .collect();
        assert_eq!(keys, vec!["app:project", "app:media"]);
    }

    #[test]
    fn test_depends_rejects_bad_key() {
        let client = ApiClient::with_base_url("http://localhost:8000").unwrap();
        let params = RouteParams::new();
        let ctx = LoadContext::new(&client, &params);

        assert!(matches!(
            ctx.depends("project"),
            Err(LoadError::InvalidDependencyKey(_))
        ));
        assert!(ctx.into_dependencies().is_empty());
    }
}

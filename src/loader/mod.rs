//! The resource loader contract.
//!
//! A [`Loader`] reads route parameters from a [`LoadContext`], issues one
//! read through the typed client and returns serializable page data. It
//! declares the dependency keys it should be re-run for via
//! [`LoadContext::depends`].

mod context;
mod pages;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ApiError, LoadError};

pub use context::LoadContext;
pub use pages::{
    GalleryData, GalleryLoader, ProjectData, ProjectListData, ProjectListLoader, ProjectLoader,
};

/// Route-bound data loader.
///
/// # Example
///
/// ```ignore
/// use mediaboard::{LoadContext, LoadError, Loader};
///
/// struct Greeting;
///
/// #[async_trait::async_trait]
/// impl Loader for Greeting {
///     type Data = String;
///
///     fn name(&self) -> &'static str {
///         "greeting"
///     }
///
///     async fn load(&self, ctx: &LoadContext<'_>) -> Result<String, LoadError> {
///         ctx.depends("app:greeting")?;
///         Ok(format!("hello from {}", ctx.client().base_url()))
///     }
/// }
/// ```
#[async_trait]
pub trait Loader: Send + Sync {
    /// The page data this loader produces.
    type Data: Serialize + Send;

    /// Stable name, used to address the loader's output.
    fn name(&self) -> &'static str;

    /// Run the loader once.
    ///
    /// # Errors
    ///
    /// Returns an error for bad route parameters, failed requests, or a
    /// missing entity.
    async fn load(&self, ctx: &LoadContext<'_>) -> Result<Self::Data, LoadError>;
}

/// Object-safe view of a [`Loader`] whose data is erased to JSON.
#[async_trait]
pub(crate) trait DynLoader: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load_value(&self, ctx: &LoadContext<'_>) -> Result<serde_json::Value, LoadError>;
}

#[async_trait]
impl<L: Loader> DynLoader for L {
    fn name(&self) -> &'static str {
        Loader::name(self)
    }

    async fn load_value(&self, ctx: &LoadContext<'_>) -> Result<serde_json::Value, LoadError> {
        let data = self.load(ctx).await?;
        Ok(serde_json::to_value(data).map_err(ApiError::from)?)
    }
}

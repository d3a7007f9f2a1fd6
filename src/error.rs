//! Error types for API requests and route loading.

use thiserror::Error;

/// Errors that can occur while talking to the gallery API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A custom transport failed without a `reqwest` error.
    #[error("transport error: {0}")]
    Transport(String),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status code, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors produced by a loader or by navigation.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A route parameter the loader needs was not supplied.
    #[error("missing route parameter '{0}'")]
    MissingParam(String),

    /// A route parameter could not be parsed.
    #[error("invalid route parameter '{name}': '{value}' is not a valid identifier")]
    InvalidParam { name: String, value: String },

    /// The server answered successfully but returned no entity.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// A dependency key did not have the `scheme:name` shape.
    #[error("invalid dependency key '{0}': expected a key like 'app:project'")]
    InvalidDependencyKey(String),

    /// A route pattern could not be parsed.
    #[error("invalid route pattern '{0}'")]
    InvalidRoutePattern(String),

    /// No registered route matches the path.
    #[error("no route matches '{0}'")]
    NoRoute(String),

    /// The underlying request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type alias for client operations.
pub type Result<T> = core::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_reports_not_found() {
        let err = ApiError::Status {
            status: 404,
            message: "Project not found".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error (404): Project not found");
    }

    #[test]
    fn test_load_error_wraps_api_error_transparently() {
        let err: LoadError = ApiError::Transport("connection reset".to_string()).into();
        assert_eq!(err.to_string(), "transport error: connection reset");
    }
}

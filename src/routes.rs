//! Route patterns and route parameters.
//!
//! Patterns use bracketed parameters: `/projects/[pid]/gallery` matches
//! `/projects/42/gallery` with `pid = "42"`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::LoadError;

/// Parameters extracted from a matched path, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Set a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Parse a parameter as a numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingParam`] if the parameter is absent and
    /// [`LoadError::InvalidParam`] if it is not a non-negative integer.
    pub fn id(&self, name: &str) -> Result<u64, LoadError> {
        let value = self
            .get(name)
            .ok_or_else(|| LoadError::MissingParam(name.to_string()))?;

        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LoadError::InvalidParam {
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        value.parse().map_err(|_| LoadError::InvalidParam {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/projects/[pid]`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidRoutePattern`] for a missing leading `/`,
    /// an empty or unbalanced `[...]` parameter, or a parameter name used twice.
    pub fn parse(pattern: &str) -> Result<Self, LoadError> {
        let invalid = || LoadError::InvalidRoutePattern(pattern.to_string());

        if !pattern.starts_with('/') {
            return Err(invalid());
        }

        let mut segments = Vec::new();
        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            let segment = match part.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
                Some(name) => {
                    let well_formed = !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                    if !well_formed {
                        return Err(invalid());
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(n) if n == name))
                    {
                        return Err(invalid());
                    }
                    Segment::Param(name.to_string())
                }
                None if part.contains('[') || part.contains(']') => return Err(invalid()),
                None => Segment::Static(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Names of the parameters in this pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match the whole path.
    pub fn match_exact(&self, path: &str) -> Option<RouteParams> {
        let parts = split_path(path);
        if parts.len() != self.segments.len() {
            return None;
        }
        self.match_segments(&parts)
    }

    /// Match the leading segments of the path.
    pub fn match_prefix(&self, path: &str) -> Option<RouteParams> {
        let parts = split_path(path);
        if parts.len() < self.segments.len() {
            return None;
        }
        self.match_segments(&parts[..self.segments.len()])
    }

    fn match_segments(&self, parts: &[&str]) -> Option<RouteParams> {
        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => params.insert(name.as_str(), *part),
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a path into its non-empty segments, ignoring any query or fragment.
fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_exact_extracts_params() {
        let pattern = RoutePattern::parse("/projects/[pid]/gallery").unwrap();
        let params = pattern.match_exact("/projects/42/gallery").unwrap();
        assert_eq!(params.get("pid"), Some("42"));
        assert_eq!(params.len(), 1);

        assert!(pattern.match_exact("/projects/42").is_none());
        assert!(pattern.match_exact("/projects/42/files").is_none());
    }

    #[test]
    fn test_match_prefix() {
        let root = RoutePattern::parse("/").unwrap();
        assert!(root.match_prefix("/projects/42/gallery").unwrap().is_empty());
        assert!(root.match_exact("/").is_some());
        assert!(root.match_exact("/projects").is_none());

        let project = RoutePattern::parse("/projects/[pid]").unwrap();
        let params = project.match_prefix("/projects/7/gallery").unwrap();
        assert_eq!(params.get("pid"), Some("7"));
        assert!(project.match_prefix("/settings/7").is_none());
    }

    #[test]
    fn test_query_and_trailing_slash_are_ignored() {
        let pattern = RoutePattern::parse("/projects/[pid]").unwrap();
        let params = pattern.match_exact("/projects/9/?tab=info#top").unwrap();
        assert_eq!(params.get("pid"), Some("9"));
    }

    #[test]
    fn test_parse_rejects_malformed_patterns() {
        for bad in ["projects", "/projects/[]", "/projects/[pid", "/a/[x]/[x]", "/p[id]"] {
            assert!(
                matches!(
                    RoutePattern::parse(bad),
                    Err(LoadError::InvalidRoutePattern(_))
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_param_names() {
        let pattern = RoutePattern::parse("/projects/[pid]/media/[mid]").unwrap();
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["pid", "mid"]);
    }

    #[test]
    fn test_id_parsing() {
        let params: RouteParams = [("pid", "42"), ("bad", "abc"), ("neg", "-1"), ("empty", "")]
            .into_iter()
            .collect();

        assert_eq!(params.id("pid").unwrap(), 42);
        assert!(matches!(params.id("bad"), Err(LoadError::InvalidParam { .. })));
        assert!(matches!(params.id("neg"), Err(LoadError::InvalidParam { .. })));
        assert!(matches!(params.id("empty"), Err(LoadError::InvalidParam { .. })));
        assert!(matches!(params.id("missing"), Err(LoadError::MissingParam(_))));
    }

    #[test]
    fn test_id_overflow_is_invalid() {
        let params: RouteParams = [("pid", "99999999999999999999999")].into_iter().collect();
        assert!(matches!(params.id("pid"), Err(LoadError::InvalidParam { .. })));
    }
}

//! Path normalization and locations.
//!
//! Every path the navigator stores or dispatches goes through
//! [`normalize_path`] first, so `/rooms/`, `rooms` and `/rooms` all mean the
//! same page. A [`Location`] is a normalized path plus the query string that
//! travelled with it.

use crate::params::QueryParams;
use std::borrow::Cow;
use std::fmt;

/// Normalize a path for storage and dispatch.
///
/// - trailing slashes are stripped, except for the root itself
/// - an empty path (or one made only of slashes) becomes `/`
/// - a missing leading slash is added
///
/// Interior segments are not touched. Already-normalized input is returned
/// borrowed.
///
/// ```
/// use suite_navigator::normalize_path;
///
/// assert_eq!(normalize_path("/rooms/"), "/rooms");
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("about"), "/about");
/// assert_eq!(normalize_path("/rooms/a/b"), "/rooms/a/b");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path == "/" {
            Cow::Borrowed(path)
        } else {
            Cow::Borrowed("/")
        };
    }
    if trimmed.starts_with('/') {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("/{}", trimmed))
    }
}

/// A normalized path together with its query parameters.
///
/// # Example
///
/// ```
/// use suite_navigator::Location;
///
/// let location = Location::parse("/booking/?room=17#top");
/// assert_eq!(location.path(), "/booking");
/// assert_eq!(location.query().get("room"), Some("17"));
/// assert_eq!(location.to_url(), "/booking?room=17");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: QueryParams,
}

impl Location {
    /// Location of the site root (`/`).
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: QueryParams::new(),
        }
    }

    /// Parse a raw URL path such as `/rooms/17?from=search#photos`.
    ///
    /// The fragment is dropped and the path is normalized.
    pub fn parse(raw: &str) -> Self {
        let without_fragment = raw.split_once('#').map_or(raw, |(before, _)| before);
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, QueryParams::from_query_string(query)),
            None => (without_fragment, QueryParams::new()),
        };
        Self {
            path: normalize_path(path).into_owned(),
            query,
        }
    }

    /// The normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters carried with the path.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Full URL as recorded in history: path plus `?query` when non-empty.
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

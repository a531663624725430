//! Query string parameters.
//!
//! [`QueryParams`] holds the `?key=value&...` part of a location. Pages read
//! it for hand-off values such as the room preselected by the "Book" action
//! (`/booking?room=17`). Dispatch never looks at it.
//!
//! Parsing and serialization use `application/x-www-form-urlencoded` rules
//! via [`url::form_urlencoded`]. Pair order is preserved, so a location
//! written back to history reads the same as it was pushed.
//!
//! # Example
//!
//! ```
//! use suite_navigator::QueryParams;
//!
//! let query = QueryParams::from_query_string("room=17&term=fall%202025");
//! assert_eq!(query.get("room"), Some("17"));
//! assert_eq!(query.get_as::<u32>("room"), Some(17));
//! assert_eq!(query.get("term"), Some("fall 2025"));
//! ```

use url::form_urlencoded;

/// Ordered, multi-valued query string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string. A leading `?` is ignored.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order of appearance.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// First value for `key`, parsed as `T`.
    ///
    /// Returns `None` if the key is missing or the value does not parse.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value. Existing values for the key are kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Return `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Serialize back into a query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_question_mark() {
        let query = QueryParams::from_query_string("?room=17");
        assert_eq!(query.get("room"), Some("17"));
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn test_multi_valued_keys_keep_order() {
        let query = QueryParams::from_query_string("tag=quiet&tag=ensuite&sort=price");
        assert_eq!(query.get("tag"), Some("quiet"));
        assert_eq!(query.get_all("tag"), vec!["quiet", "ensuite"]);
        assert!(query.get_all("missing").is_empty());
    }

    #[test]
    fn test_decoding() {
        let query = QueryParams::from_query_string("name=Ama+Owusu&note=a%26b");
        assert_eq!(query.get("name"), Some("Ama Owusu"));
        assert_eq!(query.get("note"), Some("a&b"));
    }

    #[test]
    fn test_get_as_rejects_unparseable() {
        let query = QueryParams::from_query_string("room=suite-a");
        assert_eq!(query.get_as::<u32>("room"), None);
        assert_eq!(query.get_as::<u32>("absent"), None);
    }

    #[test]
    fn test_serialization_preserves_order_and_encodes() {
        let mut query = QueryParams::new();
        query.insert("room", "17");
        query.insert("note", "late check-in & parking");
        assert_eq!(
            query.to_query_string(),
            "room=17&note=late+check-in+%26+parking"
        );
    }

    #[test]
    fn test_empty() {
        let query = QueryParams::from_query_string("");
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
        assert!(!query.contains("room"));
    }
}

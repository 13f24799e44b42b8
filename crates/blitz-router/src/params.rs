// File: src/params.rs
// Purpose: Parameter values extracted from routes and query strings

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

/// A single parameter value
///
/// Dynamic segments produce [`ParamValue::Single`]; catch-all segments and
/// repeated query keys produce [`ParamValue::List`]. Serialises untagged,
/// so JSON reads `"abc"` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    pub(crate) fn from_segments(segments: &[&str]) -> Self {
        ParamValue::List(segments.iter().map(|s| s.to_string()).collect())
    }

    /// Returns the value if this is a single value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::List(_) => None,
        }
    }

    /// Returns the values if this is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::List(values) => Some(values),
        }
    }

    /// First value, for handlers that only care about one
    pub fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::List(values) => values.first().map(String::as_str),
        }
    }

    /// All values, a single value becoming a one-element list
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            ParamValue::Single(value) => vec![value.clone()],
            ParamValue::List(values) => values.clone(),
        }
    }

    /// Appends another value in place, promoting a single value to a list
    pub fn push(&mut self, value: String) {
        match self {
            ParamValue::List(values) => values.push(value),
            ParamValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = ParamValue::List(vec![first, value]);
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::from_segments(&values)
    }
}

/// Parameter name → value mapping
///
/// Ordered by name so equal inputs always compare, print and serialise the
/// same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Shorthand for single-valued parameters
    ///
    /// ```
    /// use blitz_router::Params;
    ///
    /// let mut params = Params::new();
    /// params.insert("pid", "abc");
    /// assert_eq!(params.get_str("pid"), Some("abc"));
    /// assert_eq!(params.get_str("missing"), None);
    /// ```
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Inserts or replaces a value, returning the previous one
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Adds a value, turning repeated names into lists
    ///
    /// ```
    /// use blitz_router::{ParamValue, Params};
    ///
    /// let mut params = Params::new();
    /// params.append("tag", "a".to_string());
    /// params.append("tag", "b".to_string());
    /// assert_eq!(params.get("tag"), Some(&ParamValue::from(vec!["a", "b"])));
    /// ```
    pub fn append(&mut self, name: impl Into<String>, value: String) {
        match self.0.entry(name.into()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(ParamValue::Single(value));
            }
            btree_map::Entry::Occupied(mut entry) => entry.get_mut().push(value),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, ParamValue)> for Params {
    fn extend<I: IntoIterator<Item = (String, ParamValue)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Merges route parameters over query-string parameters
///
/// Route parameters are written last, so a route parameter always wins
/// over a query parameter of the same name.
///
/// # Examples
///
/// ```
/// use blitz_router::{merge_params, Params};
///
/// let mut query = Params::new();
/// query.insert("pid", "123");
/// query.insert("ref", "home");
///
/// let mut route = Params::new();
/// route.insert("pid", "abc");
///
/// let merged = merge_params(query, route);
/// assert_eq!(merged.get_str("pid"), Some("abc"));
/// assert_eq!(merged.get_str("ref"), Some("home"));
/// ```
pub fn merge_params(query: Params, route: Params) -> Params {
    let mut merged = query;
    merged.extend(route);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_param_value_accessors() {
        let single = ParamValue::from("abc");
        assert_eq!(single.as_str(), Some("abc"));
        assert_eq!(single.as_list(), None);
        assert_eq!(single.first(), Some("abc"));
        assert_eq!(single.to_vec(), vec!["abc".to_string()]);

        let list = ParamValue::from(vec!["a", "b"]);
        assert_eq!(list.as_str(), None);
        assert_eq!(list.as_list(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(list.first(), Some("a"));
    }

    #[test]
    fn test_param_value_push_promotes() {
        let mut value = ParamValue::from("a");
        value.push("b".to_string());
        value.push("c".to_string());
        assert_eq!(value, ParamValue::from(vec!["a", "b", "c"]));
    }

    #[test]
    fn test_append_grows_list_in_place() {
        let mut params = Params::new();
        for i in 0..10_000 {
            params.append("id", i.to_string());
        }

        let values = params.get("id").and_then(ParamValue::as_list).unwrap();
        assert_eq!(values.len(), 10_000);
        assert_eq!(values.first().map(String::as_str), Some("0"));
        assert_eq!(values.last().map(String::as_str), Some("9999"));
    }

    #[test]
    fn test_merge_route_overrides_query() {
        let mut query = Params::new();
        query.insert("slug", "from-query");
        let mut route = Params::new();
        route.insert("slug", vec!["a".to_string(), "b".to_string()]);

        let merged = merge_params(query, route);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("slug"), Some(&ParamValue::from(vec!["a", "b"])));
    }

    #[test]
    fn test_merge_keeps_query_only_keys() {
        let mut query = Params::new();
        query.insert("page", "2");
        let merged = merge_params(query, Params::new());
        assert_eq!(merged.get_str("page"), Some("2"));
    }

    #[test]
    fn test_serialize_untagged() {
        let mut params = Params::new();
        params.insert("pid", "abc");
        params.insert("slug", vec!["a".to_string(), "b".to_string()]);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({ "pid": "abc", "slug": ["a", "b"] }));
    }
}

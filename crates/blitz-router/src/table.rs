// File: src/table.rs
// Purpose: Immutable route table with tiered precedence resolution

use std::collections::HashMap;

use tracing::{debug, info};

use crate::path::{decode_segments, normalize_path, split_path_and_query};
use crate::route::{fold_case, shape_of, RoutePattern, Tier};
use crate::{merge_params, parse_query, ConfigError, Params};

/// Result of resolving a request path
///
/// Borrows the matched pattern from the table; the parameters are owned
/// and discarded with the request.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'t> {
    /// The matched route
    pub route: &'t RoutePattern,
    /// Parameters extracted from the path (merged with the query string
    /// when produced by [`RouteTable::resolve_with_query`])
    pub params: Params,
}

impl MatchResult<'_> {
    /// Merges these route parameters over query-string parameters
    pub fn with_query(mut self, query: Params) -> Self {
        self.params = merge_params(query, self.params);
        self
    }
}

/// Collects route definitions and validates them into a [`RouteTable`]
///
/// # Examples
///
/// ```
/// use blitz_router::RouteTableBuilder;
///
/// let table = RouteTableBuilder::new()
///     .file("pages/post/create.tsx")?
///     .file("pages/post/[pid].tsx")?
///     .file("pages/post/[...slug].tsx")?
///     .build()?;
///
/// assert_eq!(table.len(), 3);
/// # Ok::<(), blitz_router::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    patterns: Vec<RoutePattern>,
    case_insensitive: bool,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare static segments ignoring ASCII case
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn route(mut self, route: RoutePattern) -> Self {
        self.patterns.push(route);
        self
    }

    pub fn routes<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = RoutePattern>,
    {
        self.patterns.extend(routes);
        self
    }

    /// Adds the route served by a project-relative file, if any
    ///
    /// Files that do not serve a route are ignored.
    pub fn file(self, path: &str) -> Result<Self, ConfigError> {
        match RoutePattern::from_file(path) {
            Ok(Some(route)) => Ok(self.route(route)),
            Ok(None) => {
                debug!(file = path, "not a route source, skipped");
                Ok(self)
            }
            Err(source) => Err(ConfigError::Pattern {
                file: path.to_string(),
                source,
            }),
        }
    }

    pub fn files<I, S>(self, paths: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .try_fold(self, |builder, path| builder.file(path.as_ref()))
    }

    /// Validates the collected routes and freezes them into a table
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Conflict`] when two routes share a shape
    /// - [`ConfigError::ParamNameMismatch`] when sibling dynamic segments
    ///   use different names
    pub fn build(self) -> Result<RouteTable, ConfigError> {
        let case_insensitive = self.case_insensitive;
        validate_shapes(&self.patterns, case_insensitive)?;
        validate_param_names(&self.patterns, case_insensitive)?;

        // Precedence order: tier first, then segment specificity. Stable, so
        // registration order is kept where neither applies.
        let mut patterns = self.patterns;
        patterns.sort_by_cached_key(|p| (p.tier(), p.specificity()));

        let mut statics = HashMap::new();
        let mut dynamics: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut catch_alls = Vec::new();

        for (idx, pattern) in patterns.iter().enumerate() {
            match pattern.tier() {
                Tier::Static => {
                    let key: Vec<String> = pattern
                        .segments()
                        .iter()
                        .map(|s| fold_case(&s.to_string(), case_insensitive))
                        .collect();
                    statics.insert(key, idx);
                }
                Tier::Dynamic => dynamics
                    .entry(pattern.segments().len())
                    .or_default()
                    .push(idx),
                Tier::CatchAll => catch_alls.push(idx),
            }
        }

        info!(
            routes = patterns.len(),
            static_routes = statics.len(),
            dynamic_routes = dynamics.values().map(Vec::len).sum::<usize>(),
            catch_all_routes = catch_alls.len(),
            "route table built"
        );

        Ok(RouteTable {
            patterns,
            statics,
            dynamics,
            catch_alls,
            case_insensitive,
        })
    }
}

/// Immutable, shareable route table
///
/// Built once at startup, then only read. Lookups are organised by tier:
/// - static routes: hash map keyed by segments
/// - dynamic routes: buckets keyed by segment count, most specific first
/// - catch-all routes: a single list, most specific first
///
/// `RouteTable` is `Send + Sync`; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    patterns: Vec<RoutePattern>,
    statics: HashMap<Vec<String>, usize>,
    dynamics: HashMap<usize, Vec<usize>>,
    catch_alls: Vec<usize>,
    case_insensitive: bool,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Builds a case-sensitive table from already parsed patterns
    pub fn new<I>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = RoutePattern>,
    {
        RouteTableBuilder::new().routes(patterns).build()
    }

    /// Builds a case-sensitive table from project-relative file paths
    ///
    /// # Examples
    ///
    /// ```
    /// use blitz_router::RouteTable;
    ///
    /// let table = RouteTable::from_files(["pages/index.tsx", "pages/_app.tsx"]).unwrap();
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_files<I, S>(paths: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RouteTableBuilder::new().files(paths)?.build()
    }

    /// Resolves a request path to its route
    ///
    /// Tiers are tried in order: static, dynamic, catch-all. Any query
    /// string or fragment on `path` is ignored. Returns `None` when nothing
    /// matches; resolution itself never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use blitz_router::{ParamValue, RouteTable};
    ///
    /// let table = RouteTable::from_files([
    ///     "pages/post/create.tsx",
    ///     "pages/post/[pid].tsx",
    ///     "pages/post/[...slug].tsx",
    /// ])
    /// .unwrap();
    ///
    /// let m = table.resolve("/post/create").unwrap();
    /// assert_eq!(m.route.to_string(), "/post/create");
    ///
    /// let m = table.resolve("/post/abc").unwrap();
    /// assert_eq!(m.params.get_str("pid"), Some("abc"));
    ///
    /// let m = table.resolve("/post/a/b").unwrap();
    /// assert_eq!(m.params.get("slug"), Some(&ParamValue::from(vec!["a", "b"])));
    ///
    /// assert!(table.resolve("/nonexistent/x/y").is_none());
    /// ```
    pub fn resolve(&self, path: &str) -> Option<MatchResult<'_>> {
        let (path, _) = split_path_and_query(path);
        let normalized = normalize_path(path);
        let decoded = decode_segments(&normalized);
        let segments: Vec<&str> = decoded.iter().map(|s| s.as_ref()).collect();

        let found = self
            .match_static(&segments)
            .or_else(|| self.match_dynamic(&segments))
            .or_else(|| self.match_catch_all(&segments));

        match &found {
            Some(m) => debug!(path = %normalized, route = %m.route, "route resolved"),
            None => debug!(path = %normalized, "no route matched"),
        }

        found
    }

    /// Resolves `path` and merges the route parameters over `query`
    pub fn resolve_with_query(&self, path: &str, query: Params) -> Option<MatchResult<'_>> {
        self.resolve(path).map(|m| m.with_query(query))
    }

    /// Resolves a request target such as `/post/abc?pid=123`
    ///
    /// The query string is parsed and merged, route parameters winning.
    ///
    /// ```
    /// use blitz_router::RouteTable;
    ///
    /// let table = RouteTable::from_files(["pages/post/[pid].tsx"]).unwrap();
    /// let m = table.resolve_url("/post/abc?pid=123&ref=home").unwrap();
    /// assert_eq!(m.params.get_str("pid"), Some("abc"));
    /// assert_eq!(m.params.get_str("ref"), Some("home"));
    /// ```
    pub fn resolve_url(&self, target: &str) -> Option<MatchResult<'_>> {
        let (path, query) = split_path_and_query(target);
        let query = query.map(parse_query).unwrap_or_default();
        self.resolve_with_query(path, query)
    }

    /// Routes in precedence order
    pub fn routes(&self) -> impl Iterator<Item = &RoutePattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn match_static(&self, segments: &[&str]) -> Option<MatchResult<'_>> {
        let key: Vec<String> = segments
            .iter()
            .map(|s| fold_case(s, self.case_insensitive))
            .collect();

        self.statics.get(key.as_slice()).map(|&idx| MatchResult {
            route: &self.patterns[idx],
            params: Params::new(),
        })
    }

    fn match_dynamic(&self, segments: &[&str]) -> Option<MatchResult<'_>> {
        self.dynamics
            .get(&segments.len())?
            .iter()
            .find_map(|&idx| self.try_match(idx, segments))
    }

    fn match_catch_all(&self, segments: &[&str]) -> Option<MatchResult<'_>> {
        self.catch_alls
            .iter()
            .find_map(|&idx| self.try_match(idx, segments))
    }

    fn try_match(&self, idx: usize, segments: &[&str]) -> Option<MatchResult<'_>> {
        let route = &self.patterns[idx];
        route
            .match_segments(segments, self.case_insensitive)
            .map(|params| MatchResult { route, params })
    }
}

/// Rejects two routes with the same shape
fn validate_shapes(patterns: &[RoutePattern], case_insensitive: bool) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &RoutePattern> = HashMap::new();

    for pattern in patterns {
        let shape = pattern.shape(case_insensitive);
        if let Some(existing) = seen.get(&shape) {
            return Err(ConfigError::Conflict {
                route: pattern.to_string(),
                existing: existing.source().to_string(),
                conflicting: pattern.source().to_string(),
            });
        }
        seen.insert(shape, pattern);
    }

    Ok(())
}

/// Rejects sibling dynamic segments that disagree on the parameter name
///
/// `post/[pid]` and `post/[id]/edit` both put a dynamic segment right
/// after `post`; they must call it the same thing.
fn validate_param_names(
    patterns: &[RoutePattern],
    case_insensitive: bool,
) -> Result<(), ConfigError> {
    // (shape of the prefix, is catch-all) -> parameter name
    let mut names: HashMap<(String, bool), &str> = HashMap::new();

    for pattern in patterns {
        for (idx, segment) in pattern.segments().iter().enumerate() {
            let Some(name) = segment.param_name() else {
                continue;
            };
            let key = (
                shape_of(&pattern.segments()[..idx], case_insensitive),
                segment.is_catch_all(),
            );

            match names.get(&key) {
                Some(existing) if *existing != name => {
                    return Err(ConfigError::ParamNameMismatch {
                        route: pattern.to_string(),
                        existing: existing.to_string(),
                        conflicting: name.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    names.insert(key, name);
                }
            }
        }
    }

    Ok(())
}

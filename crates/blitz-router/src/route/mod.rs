/// Route module for file-based routing
///
/// Contains the parsed [`RoutePattern`] and the pure components it is
/// built from:
/// - [`pattern`] - classification of a single segment
/// - [`parser`] - validation of a whole route string
/// - [`file`] - file path conventions (pages, API routes, RPC resolvers)

pub mod file;
pub mod parser;
pub mod pattern;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ParamValue, Params, PatternError};
pub use pattern::Segment;

/// What a route serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// A rendered page
    Page,
    /// An API route handler under `/api`
    Api,
    /// A query or mutation resolver exposed under `/api/rpc`
    Rpc,
}

impl RouteKind {
    /// Kind of a page-style route given its first segment
    ///
    /// Anything under a leading `api` segment is an API route, `/api`
    /// itself included.
    pub(crate) fn for_route(first_segment: Option<&str>) -> Self {
        match first_segment {
            Some("api") => RouteKind::Api,
            _ => RouteKind::Page,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteKind::Page => "page",
            RouteKind::Api => "api",
            RouteKind::Rpc => "rpc",
        })
    }
}

/// Precedence tier, ordered from highest to lowest priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Static,
    Dynamic,
    CatchAll,
}

/// A parsed, validated route definition
///
/// Immutable once constructed. Two patterns are equal when they have the
/// same segments, kind and source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
    kind: RouteKind,
    source: String,
}

impl RoutePattern {
    /// Parses a route string such as `post/[pid]` or `/docs/[...slug]`
    ///
    /// The kind is [`RouteKind::Api`] when the first segment is a literal
    /// `api`, [`RouteKind::Page`] otherwise, the same rule
    /// [`RoutePattern::from_file`] applies to page directories. The route
    /// string itself is recorded as the source.
    ///
    /// # Examples
    ///
    /// ```
    /// use blitz_router::{RoutePattern, RouteKind};
    ///
    /// let route = RoutePattern::parse("post/[pid]").unwrap();
    /// assert_eq!(route.to_string(), "/post/[pid]");
    /// assert_eq!(route.kind(), RouteKind::Page);
    /// assert_eq!(route.params().collect::<Vec<_>>(), vec!["pid"]);
    /// ```
    pub fn parse(route: &str) -> Result<Self, PatternError> {
        let segments = parser::parse_route(route)?;
        let kind = RouteKind::for_route(match segments.first() {
            Some(Segment::Static(first)) => Some(first.as_str()),
            _ => None,
        });

        Ok(Self {
            segments,
            kind,
            source: route.to_string(),
        })
    }

    /// Creates a route from a project-relative file path
    ///
    /// Returns `Ok(None)` for files that do not serve a route (see
    /// [`file::route_for_file`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use blitz_router::{RoutePattern, RouteKind};
    ///
    /// let route = RoutePattern::from_file("app/products/pages/products/[id].tsx")
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(route.to_string(), "/products/[id]");
    /// assert_eq!(route.source(), "app/products/pages/products/[id].tsx");
    ///
    /// assert!(RoutePattern::from_file("pages/_app.tsx").unwrap().is_none());
    /// assert!(RoutePattern::from_file("pages/[id.tsx").is_err());
    /// ```
    pub fn from_file(path: &str) -> Result<Option<Self>, PatternError> {
        file::route_for_file(path)
            .map(|(kind, route)| {
                parser::parse_route(&route).map(|segments| Self {
                    segments,
                    kind,
                    source: path.replace('\\', "/"),
                })
            })
            .transpose()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// The file (or route string) this pattern was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parameter names in path order
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    pub fn tier(&self) -> Tier {
        match self.segments.last() {
            Some(last) if last.is_catch_all() => Tier::CatchAll,
            _ if self.segments.iter().any(|s| s.param_name().is_some()) => Tier::Dynamic,
            _ => Tier::Static,
        }
    }

    /// Segment ranks used to order patterns inside a tier
    pub(crate) fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::rank).collect()
    }

    /// Canonical shape with parameter names erased
    ///
    /// Both catch-all flavours share a shape: `docs/[...a]` and
    /// `docs/[[...b]]` cannot coexist.
    pub(crate) fn shape(&self, case_insensitive: bool) -> String {
        shape_of(&self.segments, case_insensitive)
    }

    /// Matches already split and decoded request segments
    ///
    /// Walks pattern and request segments together. Static segments must
    /// compare equal, dynamic segments capture one value, and a trailing
    /// catch-all captures the rest.
    pub(crate) fn match_segments(&self, path: &[&str], case_insensitive: bool) -> Option<Params> {
        let mut params = Params::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(literal) => {
                    let value = path.get(idx)?;
                    if !segment_eq(literal, value, case_insensitive) {
                        return None;
                    }
                }
                Segment::Dynamic(name) => {
                    let value = path.get(idx)?;
                    params.insert(name.clone(), ParamValue::Single(value.to_string()));
                }
                Segment::CatchAll(name) => {
                    let rest = path.get(idx..).filter(|rest| !rest.is_empty())?;
                    params.insert(name.clone(), ParamValue::from_segments(rest));
                    return Some(params);
                }
                Segment::OptionalCatchAll(name) => {
                    let rest = path.get(idx..)?;
                    // Zero segments: the key stays absent
                    if !rest.is_empty() {
                        params.insert(name.clone(), ParamValue::from_segments(rest));
                    }
                    return Some(params);
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Shape key for a segment slice
pub(crate) fn shape_of(segments: &[Segment], case_insensitive: bool) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|segment| match segment {
            Segment::Static(literal) => fold_case(literal, case_insensitive),
            Segment::Dynamic(_) => "[]".to_string(),
            Segment::CatchAll(_) | Segment::OptionalCatchAll(_) => "[...]".to_string(),
        })
        .collect();
    format!("/{}", parts.join("/"))
}

pub(crate) fn fold_case(value: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        value.to_ascii_lowercase()
    } else {
        value.to_string()
    }
}

fn segment_eq(literal: &str, value: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        literal.eq_ignore_ascii_case(value)
    } else {
        literal == value
    }
}

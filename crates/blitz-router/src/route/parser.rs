/// Route string parsing and validation
///
/// Pure functional parser that turns a `/`-delimited route (as derived
/// from a file path) into validated [`Segment`]s.

use std::collections::HashSet;

use super::pattern::{classify_segment, Segment};
use crate::PatternError;

/// Internal state accumulator for fold-based parsing
///
/// All mutations are local to the fold accumulator. Each builder method
/// consumes and returns `Self`.
#[derive(Default)]
struct ParseState {
    segments: Vec<Segment>,
    seen_params: HashSet<String>,
}

impl ParseState {
    /// Appends a classified segment, enforcing per-pattern invariants
    fn with_segment(mut self, segment: Segment, route: &str) -> Result<Self, PatternError> {
        // Nothing may follow a catch-all
        if let Some(last) = self.segments.last().filter(|s| s.is_catch_all()) {
            return Err(PatternError::CatchAllNotLast {
                route: display_route(route),
                segment: last.to_string(),
            });
        }

        if let Some(name) = segment.param_name() {
            if !self.seen_params.insert(name.to_string()) {
                return Err(PatternError::DuplicateParam {
                    route: display_route(route),
                    name: name.to_string(),
                });
            }
        }

        self.segments.push(segment);
        Ok(self)
    }

    fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Checks if a component contributes nothing to the URL
///
/// Pure predicate: empty components from leading, trailing or doubled `/`.
fn should_skip_segment(segment: &str) -> bool {
    segment.is_empty()
}

fn display_route(route: &str) -> String {
    format!("/{}", route.trim_matches('/'))
}

/// Parses a route string into validated segments (pure function)
///
/// Uses functional composition:
/// - `split('/')` - break the route into components
/// - `filter` - drop empty components
/// - `try_fold` - classify and accumulate, stopping on the first error
///
/// # Errors
///
/// - Malformed segments (see [`classify_segment`])
/// - [`PatternError::CatchAllNotLast`]
/// - [`PatternError::DuplicateParam`]
///
/// # Examples
///
/// ```
/// use blitz_router::route::parser::parse_route;
/// use blitz_router::route::pattern::Segment;
///
/// let segments = parse_route("post/[pid]").unwrap();
/// assert_eq!(
///     segments,
///     vec![Segment::Static("post".into()), Segment::Dynamic("pid".into())]
/// );
///
/// // Root
/// assert!(parse_route("/").unwrap().is_empty());
///
/// // Catch-all must be last
/// assert!(parse_route("docs/[...slug]/edit").is_err());
/// ```
pub fn parse_route(route: &str) -> Result<Vec<Segment>, PatternError> {
    route
        .split('/')
        .filter(|segment| !should_skip_segment(segment))
        .try_fold(ParseState::default(), |state, segment| {
            state.with_segment(classify_segment(segment)?, route)
        })
        .map(ParseState::into_segments)
}

/// Segment classification for file-based route patterns
///
/// Pure functional parsing of a single file name component into a typed
/// [`Segment`]. All functions are **pure**: same input → same output.

use std::fmt;

use crate::PatternError;

/// One parsed component of a route pattern
///
/// Functional sum type used throughout matching. Each parameter variant
/// carries its parameter name.
///
/// # Examples
///
/// ```
/// use blitz_router::route::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("about").unwrap(), Segment::Static("about".into()));
/// assert_eq!(classify_segment("[pid]").unwrap(), Segment::Dynamic("pid".into()));
/// assert_eq!(classify_segment("[...slug]").unwrap(), Segment::CatchAll("slug".into()));
/// assert_eq!(
///     classify_segment("[[...slug]]").unwrap(),
///     Segment::OptionalCatchAll("slug".into())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text, compared against the request segment
    Static(String),
    /// `[name]` - exactly one request segment
    Dynamic(String),
    /// `[...name]` - one or more trailing request segments
    CatchAll(String),
    /// `[[...name]]` - zero or more trailing request segments
    OptionalCatchAll(String),
}

impl Segment {
    /// Parameter bound by this segment, `None` for static text
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Dynamic(name) | Segment::CatchAll(name) | Segment::OptionalCatchAll(name) => {
                Some(name)
            }
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Segment::CatchAll(_) | Segment::OptionalCatchAll(_))
    }

    /// Specificity rank, lower is more specific
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 0,
            Segment::Dynamic(_) => 1,
            Segment::CatchAll(_) => 2,
            Segment::OptionalCatchAll(_) => 3,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(literal) => f.write_str(literal),
            Segment::Dynamic(name) => write!(f, "[{}]", name),
            Segment::CatchAll(name) => write!(f, "[...{}]", name),
            Segment::OptionalCatchAll(name) => write!(f, "[[...{}]]", name),
        }
    }
}

/// Classifies a file name component into a [`Segment`] (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]`
/// 2. **Catch-all**: `[...name]`
/// 3. **Dynamic**: `[name]`
/// 4. **Static**: any text without brackets
///
/// Anything else (stray brackets, `[[name]]`, empty names) is rejected so
/// that a typo in a file name fails at startup instead of silently
/// becoming a literal route.
///
/// # Examples
///
/// ```
/// use blitz_router::route::pattern::classify_segment;
/// use blitz_router::PatternError;
///
/// assert!(classify_segment("[id]").is_ok());
/// assert_eq!(
///     classify_segment("[id"),
///     Err(PatternError::UnbalancedBrackets("[id".to_string()))
/// );
/// assert_eq!(
///     classify_segment("[[id]]"),
///     Err(PatternError::OptionalParam("[[id]]".to_string()))
/// );
/// ```
pub fn classify_segment(segment: &str) -> Result<Segment, PatternError> {
    // Optional catch-all: [[...name]] (double brackets)
    if let Some(rest) = segment.strip_prefix("[[") {
        let inner = rest
            .strip_suffix("]]")
            .ok_or_else(|| PatternError::UnbalancedBrackets(segment.to_string()))?;

        return match inner.strip_prefix("...") {
            Some(name) => parse_param_name(name, segment).map(Segment::OptionalCatchAll),
            None => Err(PatternError::OptionalParam(segment.to_string())),
        };
    }

    match segment.strip_prefix('[') {
        Some(rest) => {
            let inner = rest
                .strip_suffix(']')
                .ok_or_else(|| PatternError::UnbalancedBrackets(segment.to_string()))?;

            match inner.strip_prefix("...") {
                Some(name) => parse_param_name(name, segment).map(Segment::CatchAll),
                None => parse_param_name(inner, segment).map(Segment::Dynamic),
            }
        }
        None if segment.contains(['[', ']']) => {
            Err(PatternError::UnbalancedBrackets(segment.to_string()))
        }
        None => Ok(Segment::Static(segment.to_string())),
    }
}

/// Validates the name between the brackets of `segment`
fn parse_param_name(name: &str, segment: &str) -> Result<String, PatternError> {
    if name.is_empty() {
        return Err(PatternError::EmptyParamName(segment.to_string()));
    }
    if name.contains(['[', ']']) {
        return Err(PatternError::UnbalancedBrackets(segment.to_string()));
    }
    if name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(PatternError::InvalidParamName(segment.to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_static() {
        assert_eq!(
            classify_segment("about"),
            Ok(Segment::Static("about".to_string()))
        );
    }

    #[test]
    fn test_classify_dynamic() {
        assert_eq!(
            classify_segment("[pid]"),
            Ok(Segment::Dynamic("pid".to_string()))
        );
    }

    #[test]
    fn test_classify_catch_all() {
        assert_eq!(
            classify_segment("[...slug]"),
            Ok(Segment::CatchAll("slug".to_string()))
        );
    }

    #[test]
    fn test_classify_optional_catch_all() {
        assert_eq!(
            classify_segment("[[...slug]]"),
            Ok(Segment::OptionalCatchAll("slug".to_string()))
        );
    }

    #[test]
    fn test_classify_rejects_unbalanced() {
        for segment in ["[id", "id]", "[[...slug]", "[...slug]]", "a[b"] {
            assert!(
                matches!(classify_segment(segment), Err(PatternError::UnbalancedBrackets(_))),
                "{segment} should be rejected"
            );
        }
    }

    #[test]
    fn test_classify_rejects_empty_names() {
        for segment in ["[]", "[...]", "[[...]]"] {
            assert_eq!(
                classify_segment(segment),
                Err(PatternError::EmptyParamName(segment.to_string()))
            );
        }
    }

    #[test]
    fn test_classify_rejects_optional_dynamic() {
        assert_eq!(
            classify_segment("[[id]]"),
            Err(PatternError::OptionalParam("[[id]]".to_string()))
        );
    }

    #[test]
    fn test_classify_rejects_dotted_name() {
        assert_eq!(
            classify_segment("[....slug]"),
            Err(PatternError::InvalidParamName("[....slug]".to_string()))
        );
    }

    #[test]
    fn test_segment_display_round_trips() {
        for segment in ["about", "[pid]", "[...slug]", "[[...slug]]"] {
            assert_eq!(classify_segment(segment).unwrap().to_string(), segment);
        }
    }

    #[test]
    fn test_rank_order() {
        let ranks: Vec<u8> = ["a", "[a]", "[...a]", "[[...a]]"]
            .iter()
            .map(|s| classify_segment(s).unwrap().rank())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }
}

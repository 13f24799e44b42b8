// File: src/error.rs
// Purpose: Startup-time errors raised while building the route table

/// A single route definition could not be parsed.
///
/// Raised while turning a file path (or a route string) into a
/// [`RoutePattern`](crate::RoutePattern). Never raised at request time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unbalanced brackets in segment `{0}`")]
    UnbalancedBrackets(String),

    #[error("empty parameter name in segment `{0}`")]
    EmptyParamName(String),

    #[error("invalid parameter name in segment `{0}`")]
    InvalidParamName(String),

    /// `[[id]]` style segments. Only catch-alls may be optional.
    #[error("optional segments must be catch-all (`[[...name]]`), found `{0}`")]
    OptionalParam(String),

    #[error("catch-all segment `{segment}` must be the last segment of `{route}`")]
    CatchAllNotLast { route: String, segment: String },

    #[error("parameter `{name}` is used more than once in `{route}`")]
    DuplicateParam { route: String, name: String },
}

/// The set of routes as a whole is invalid.
///
/// Fatal: a server must refuse to start when building its
/// [`RouteTable`](crate::RouteTable) returns one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid route file `{file}`: {source}")]
    Pattern {
        file: String,
        #[source]
        source: PatternError,
    },

    /// Two definitions resolve to the same route shape.
    #[error("route `{route}` is defined by both `{existing}` and `{conflicting}`")]
    Conflict {
        route: String,
        existing: String,
        conflicting: String,
    },

    /// Sibling dynamic segments must agree on the parameter name.
    #[error(
        "different parameter names for the same dynamic path in `{route}` (`{existing}` != `{conflicting}`)"
    )]
    ParamNameMismatch {
        route: String,
        existing: String,
        conflicting: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pattern_error_display() {
        let err = PatternError::CatchAllNotLast {
            route: "/docs/[...slug]/edit".to_string(),
            segment: "[...slug]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "catch-all segment `[...slug]` must be the last segment of `/docs/[...slug]/edit`"
        );
    }

    #[test]
    fn test_config_error_keeps_source() {
        let err = ConfigError::Pattern {
            file: "pages/[id.tsx".to_string(),
            source: PatternError::UnbalancedBrackets("[id".to_string()),
        };
        assert!(err.to_string().contains("pages/[id.tsx"));
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("unbalanced brackets in segment `[id`".to_string())
        );
    }
}

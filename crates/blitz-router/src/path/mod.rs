/// Request path utilities for validation, normalization and splitting
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use blitz_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/post/abc"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("post")); // Missing leading /
/// assert!(!is_valid_path("/post/")); // Trailing /
/// assert!(!is_valid_path("/post//abc")); // Double //
/// assert!(!is_valid_path("/post\\abc")); // Backslash
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations)
/// and `Cow::Owned` when normalization was needed.
///
/// - Trailing slashes: `/path/` → `/path`
/// - Repeated slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
/// - Missing leading slash: `path` → `/path`
///
/// # Examples
///
/// ```
/// use blitz_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("\\users\\123"), "/users/123");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Splits a request target into its path and raw query string
///
/// Any `#fragment` is dropped first.
///
/// ```
/// use blitz_router::path::split_path_and_query;
///
/// assert_eq!(split_path_and_query("/post/abc?pid=123#top"), ("/post/abc", Some("pid=123")));
/// assert_eq!(split_path_and_query("/post/abc"), ("/post/abc", None));
/// ```
pub fn split_path_and_query(target: &str) -> (&str, Option<&str>) {
    let without_fragment = target.split_once('#').map_or(target, |(before, _)| before);
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    }
}

/// Splits a canonical path into percent-decoded segments
///
/// Segments that do not decode to valid UTF-8 are kept as-is.
pub fn decode_segments(path: &str) -> Vec<Cow<'_, str>> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/about"));
        assert!(is_valid_path("/users/123"));

        assert!(!is_valid_path(""));
        assert!(!is_valid_path("about"));
        assert!(!is_valid_path("/about/"));
        assert!(!is_valid_path("/about//page"));
        assert!(!is_valid_path("/about\\page"));
    }

    #[test]
    fn test_normalize_path_valid() {
        assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
        assert!(matches!(normalize_path("/"), Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_path_trailing_slash() {
        assert_eq!(normalize_path("/about/"), "/about");
        assert_eq!(normalize_path("/users/123/"), "/users/123");
    }

    #[test]
    fn test_normalize_path_double_slash() {
        assert_eq!(normalize_path("/about//page"), "/about/page");
        assert_eq!(normalize_path("/path///to////page"), "/path/to/page");
    }

    #[test]
    fn test_normalize_path_backslash() {
        assert_eq!(normalize_path("\\about"), "/about");
        assert_eq!(normalize_path("/about\\page"), "/about/page");
    }

    #[test]
    fn test_normalize_path_empty() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("//"), "/");
    }

    #[test]
    fn test_split_path_and_query() {
        assert_eq!(split_path_and_query("/a?b=1&c=2"), ("/a", Some("b=1&c=2")));
        assert_eq!(split_path_and_query("/a#x?y"), ("/a", None));
        assert_eq!(split_path_and_query("/a?"), ("/a", Some("")));
    }

    #[test]
    fn test_decode_segments() {
        let segments = decode_segments("/post/hello%20world/a%2Fb");
        assert_eq!(segments, vec!["post", "hello world", "a/b"]);
    }

    #[test]
    fn test_decode_segments_invalid_utf8() {
        assert_eq!(decode_segments("/x/%FF"), vec!["x", "%FF"]);
    }

    #[test]
    fn test_decode_segments_root() {
        assert!(decode_segments("/").is_empty());
    }
}

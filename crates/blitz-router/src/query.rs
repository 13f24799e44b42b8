// File: src/query.rs
// Purpose: Query-string parsing into Params

use std::borrow::Cow;

use crate::Params;

/// Parses an `application/x-www-form-urlencoded` query string
///
/// - a leading `?` is ignored
/// - `+` decodes to a space, percent escapes are decoded
/// - a repeated key becomes a list, in order of appearance
/// - a key without `=` gets an empty value
/// - empty pairs (`a=1&&b=2`) are skipped
///
/// # Examples
///
/// ```
/// use blitz_router::{parse_query, ParamValue};
///
/// let params = parse_query("?pid=123&tag=a&tag=b&q=hello+world");
/// assert_eq!(params.get_str("pid"), Some("123"));
/// assert_eq!(params.get("tag"), Some(&ParamValue::from(vec!["a", "b"])));
/// assert_eq!(params.get_str("q"), Some("hello world"));
/// ```
pub fn parse_query(raw: &str) -> Params {
    raw.strip_prefix('?')
        .unwrap_or(raw)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .fold(Params::new(), |mut params, (key, value)| {
            params.append(decode_component(key), decode_component(value));
            params
        })
}

/// Decodes one query component, keeping the raw text if it is not UTF-8
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map(Cow::into_owned).ok();
    decoded.unwrap_or(spaced)
}

//! Query-string construction.
//!
//! The joined `key=value&key=value` string is escaped as one unit, so the
//! separators themselves come out as `%26` and `%3D`. Peers built against this
//! format expect exactly that, so values are never escaped individually.

use std::collections::HashMap;
use std::hash::BuildHasher;

/// Escapes `input` as a query component.
///
/// Unreserved bytes (`A-Z a-z 0-9 - _ . ~`) are kept, a space becomes `+`, and
/// every other byte becomes `%XX` with upper-case hex digits.
#[must_use]
pub fn query_escape(input: &str) -> String {
    // A literal '%' is escaped to "%25", so "%20" can only come from a space.
    urlencoding::encode(input).replace("%20", "+")
}

/// Joins `params` as `key=value` pairs separated by `&` and escapes the result.
///
/// Returns `None` for an empty map. Pair order follows the map's iteration
/// order and is not stable across calls.
#[must_use]
pub fn encode_params<S: BuildHasher>(params: &HashMap<String, String, S>) -> Option<String> {
    if params.is_empty() {
        return None;
    }
    let joined = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    Some(query_escape(&joined))
}

/// Appends the escaped query to `url` after a literal `?`.
///
/// The URL is not inspected; an existing query is not merged.
#[must_use]
pub fn append_query<S: BuildHasher>(url: &str, params: &HashMap<String, String, S>) -> String {
    match encode_params(params) {
        Some(query) => format!("{url}?{query}"),
        None => url.to_string(),
    }
}

// Safe lookups over raw submission payloads.
//
// Raw records keep the collection tool's flattened layout: one map whose keys
// are full slash-delimited question paths. No field is guaranteed to be
// present; absence always resolves to None, never to an error.

use serde_json::Value as JSValue;

/// The string form of a scalar answer, or None when the field is missing,
/// empty or not a scalar. Empty strings count as absent so that candidate
/// paths holding `""` do not shadow later conventions.
pub(crate) fn get_string(data: &JSValue, path: &str) -> Option<String> {
    match data.get(path) {
        Some(JSValue::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(JSValue::Number(n)) => Some(n.to_string()),
        Some(JSValue::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// The first present value among candidate paths, in priority order. The
/// same logical field was asked under different path names across form
/// revisions; the caller lists the conventions from newest to oldest.
pub(crate) fn first_string(data: &JSValue, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|p| get_string(data, p))
}

pub(crate) fn get_array<'a>(data: &'a JSValue, path: &str) -> Option<&'a Vec<JSValue>> {
    match data.get(path) {
        Some(JSValue::Array(arr)) => Some(arr),
        _ => None,
    }
}

/// Joins a group prefix and a field name into a full question path.
pub(crate) fn key(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}/{}", prefix, field)
    }
}

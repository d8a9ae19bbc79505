use serde_json::Value;

/// Determine whether a string is parseable as a structured JSON value.
///
/// Structured means an object or an array. Bare primitives do not count:
/// `"5"`, `"true"`, `"null"` and `"\"text\""` all parse, but none of them
/// is structured, so all of them yield false. Unparseable input yields
/// false as well; this predicate never fails.
pub fn is_json_string(s: &str) -> bool {
    parse_structured(s).is_some()
}

/// Parse `s` and hand back the value only when it is an object or an array,
/// so callers that need the parsed result do not parse twice.
pub(crate) fn parse_structured(s: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(s) {
        Ok(value @ Value::Object(_)) | Ok(value @ Value::Array(_)) => Some(value),
        _ => None,
    }
}

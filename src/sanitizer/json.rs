use serde_json::Value;

const FORBIDDEN_KEYS: &[&str] = &["__proto__", "constructor", "prototype"];

/// Parses JSON text, returning `None` instead of an error.
///
/// Documents containing a `__proto__`, `constructor` or `prototype` key at
/// any depth are also rejected; they are a prototype-pollution vector for
/// JavaScript consumers the value may be forwarded to.
///
/// ```
/// use request_guard::sanitizer::safe_json_parse;
///
/// assert!(safe_json_parse(r#"{"name": "port-1"}"#).is_some());
/// assert!(safe_json_parse("{not json").is_none());
/// assert!(safe_json_parse(r#"{"__proto__": {"admin": true}}"#).is_none());
/// ```
pub fn safe_json_parse(text: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(text).ok()?;
    if has_forbidden_key(&value) {
        tracing::debug!("rejected JSON document with prototype key");
        return None;
    }
    Some(value)
}

fn has_forbidden_key(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| FORBIDDEN_KEYS.contains(&k.as_str()) || has_forbidden_key(v)),
        Value::Array(items) => items.iter().any(has_forbidden_key),
        _ => false,
    }
}

//! Missing-Field Validator
//!
//! Generic dot-path presence checker over arbitrary serialized records. The
//! validator knows nothing about business meaning: it only reports which of
//! the requested paths resolve to nothing. Callers decide which gaps matter.
//!
//! Path syntax: top-level keys (`"isin"`) or dot-separated nested paths
//! (`"liquidity.turnover"`). When traversal hits an array mid-path, it
//! descends into the first element (one level of array-like traversal); an
//! empty array anywhere on the path counts as missing.

use serde_json::Value;

/// The subset of `paths` that resolve to `null`, an empty string, an empty
/// list, or nothing at all in `record`.
pub fn missing_fields(record: &Value, paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter(|path| match resolve(record, path) {
            Some(value) => is_empty(value),
            None => true,
        })
        .cloned()
        .collect()
}

/// Resolve a dot path inside a value. `None` means the path does not exist.
fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;

    for segment in path.split('.') {
        // Descend through an intervening array before applying the key.
        if let Value::Array(items) = current {
            current = items.first()?;
        }
        current = current.get(segment)?;
    }

    Some(current)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

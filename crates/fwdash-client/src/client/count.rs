use serde_json::Value;

/// Reads the collection total from a count response.
///
/// Accepts the JSON-LD envelope (`hydra:totalItems`), the plain
/// `totalItems` key, or a bare integer body.
pub(super) fn extract_total(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => map
            .get("hydra:totalItems")
            .or_else(|| map.get("totalItems"))
            .and_then(Value::as_u64),
        _ => None,
    }
}

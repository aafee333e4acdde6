use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::Asset;

/// Decode a realtime-database snapshot of the assets node.
///
/// The node is a JSON object `{ key: record, ... }`; `null` means no
/// assets. Records that fail to decode are skipped with a warning so one
/// bad entry cannot hide the rest of the portfolio. Output is sorted by key,
/// which for push-generated keys is creation order.
pub fn records_from_snapshot(snapshot: &Value) -> Result<Vec<Asset>, CoreError> {
    let entries = match snapshot {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(CoreError::Store(format!(
                "expected an object of asset records, got {}",
                json_kind(other)
            )))
        }
    };

    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();

    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        match serde_json::from_value::<Asset>(entries[key].clone()) {
            Ok(asset) => records.push(asset.with_id(id_for_key(key))),
            Err(e) => warn!(%key, error = %e, "skipping malformed asset record"),
        }
    }
    Ok(records)
}

/// Stable id for a store key.
///
/// UUID keys are used as-is; any other key (e.g. a push id) maps to the
/// same name-based UUID on every snapshot, so price maps stay keyed
/// consistently across updates.
pub fn id_for_key(key: &str) -> Uuid {
    Uuid::parse_str(key).unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

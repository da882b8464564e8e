// Provider adapters and the small JSON helpers they share.
//
// Each provider is a stateless unit struct implementing ProviderAdapter:
// fixed endpoints and scope, plus the field-by-field mapping from its REST
// payload into Profile/Contact.

pub mod gmail;
pub mod instagram;

pub use gmail::Gmail;
pub use instagram::Instagram;

use serde_json::Value;

/// Iterate the elements of an optional JSON array. Anything that is not an
/// array yields nothing.
pub(crate) fn entries(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value.and_then(Value::as_array).into_iter().flatten()
}

/// Find the entry whose `metadata.primary` flag is set.
pub(crate) fn primary_entry(value: Option<&Value>) -> Option<&Value> {
    entries(value).find(|entry| {
        entry
            .pointer("/metadata/primary")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    })
}

/// String field of a JSON object.
pub(crate) fn str_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Like [`str_field`] but treats an empty string as absent.
pub(crate) fn non_empty_field(entry: &Value, key: &str) -> Option<String> {
    str_field(entry, key).filter(|s| !s.is_empty())
}

/// Field rendered as a string: strings pass through, numbers and booleans
/// are stringified (some providers return numeric identifiers).
pub(crate) fn field_to_string(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

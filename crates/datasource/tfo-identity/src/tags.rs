//! Tag flattening.

use serde_json::Value;
use std::collections::BTreeMap;
use tfo_types::DefinedTags;

/// Flatten namespaced defined tags into `"namespace.key" -> value`.
pub fn defined_tags_to_map(defined_tags: &DefinedTags) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    for (namespace, keys) in defined_tags {
        for (key, value) in keys {
            tags.insert(format!("{namespace}.{key}"), render_tag_value(value));
        }
    }
    tags
}

/// Strings are kept verbatim; any other JSON value becomes its JSON text.
fn render_tag_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

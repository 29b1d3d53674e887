use serde_json::{Map, Value as JsonValue};

/// Property keys province datasets use for the display name, in lookup order
const LABEL_KEYS: [&str; 4] = ["Name", "name", "Name_VI", "Name_EN"];

/// Popup label for a province boundary feature
pub fn province_label(properties: Option<&Map<String, JsonValue>>) -> &str {
    properties
        .and_then(|props| {
            LABEL_KEYS
                .iter()
                .filter_map(|key| props.get(*key).and_then(JsonValue::as_str))
                .find(|label| !label.is_empty())
        })
        .unwrap_or("Unknown")
}

//! Structural validation of item documents before they are written.

use serde_json::Value;

use crate::core::types::{Document, ItemType};

/// Every rule an item document violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid registry item: {}", .reasons.join("; "))]
pub struct SchemaError {
    pub reasons: Vec<String>,
}

const DEPENDENCY_FIELDS: [&str; 3] = ["dependencies", "devDependencies", "registryDependencies"];

fn require_string(doc: &Document, key: &str, reasons: &mut Vec<String>) {
    if !doc.get(key).is_some_and(Value::is_string) {
        reasons.push(format!("`{}` must be a string", key));
    }
}

fn check_file(index: usize, entry: &Value, reasons: &mut Vec<String>) {
    let Some(entry) = entry.as_object() else {
        reasons.push(format!("files[{}] must be an object", index));
        return;
    };

    if !entry.get("path").and_then(Value::as_str).is_some_and(|p| !p.is_empty()) {
        reasons.push(format!("files[{}].path is required", index));
    }

    let file_type = entry
        .get("type")
        .and_then(Value::as_str)
        .and_then(ItemType::from_type_str);
    match file_type {
        None => reasons.push(format!("files[{}].type is not a recognized type", index)),
        Some(file_type) if file_type.target_required() => {
            if !entry.get("target").and_then(Value::as_str).is_some_and(|t| !t.is_empty()) {
                reasons.push(format!(
                    "files[{}].target is required for {}",
                    index,
                    file_type.as_str()
                ));
            }
        }
        Some(_) => {}
    }

    if entry.get("target").is_some_and(|t| !t.is_string()) {
        reasons.push(format!("files[{}].target must be a string", index));
    }
}

/// Validate an item document against the registry item schema.
pub fn validate_item(doc: &Document) -> Result<(), SchemaError> {
    let mut reasons = Vec::new();

    match doc.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => {
            if name.contains('/') || name.contains('\\') || name.contains("..") {
                reasons.push("`name` must not contain path separators or `..`".to_string());
            }
        }
        _ => reasons.push("`name` must be a non-empty string".to_string()),
    }

    let item_type = doc
        .get("type")
        .and_then(Value::as_str)
        .and_then(ItemType::from_type_str);
    if item_type.is_none() {
        reasons.push("`type` is not a recognized registry type".to_string());
    }

    require_string(doc, "title", &mut reasons);
    require_string(doc, "description", &mut reasons);

    let json_only = item_type.is_some_and(ItemType::is_json_only);
    match doc.get("files") {
        None if json_only => {}
        Some(Value::Array(files)) => {
            if files.is_empty() && !json_only {
                reasons.push("`files` must not be empty".to_string());
            }
            for (index, entry) in files.iter().enumerate() {
                check_file(index, entry, &mut reasons);
            }
        }
        None => reasons.push("`files` is required".to_string()),
        Some(_) => reasons.push("`files` must be an array".to_string()),
    }

    for field in DEPENDENCY_FIELDS {
        if let Some(value) = doc.get(field) {
            let valid = value
                .as_array()
                .is_some_and(|entries| entries.iter().all(Value::is_string));
            if !valid {
                reasons.push(format!("`{}` must be an array of strings", field));
            }
        }
    }

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { reasons })
    }
}

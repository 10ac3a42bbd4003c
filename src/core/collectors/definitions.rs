//! Pre-authored style and theme definitions.
//!
//! Each top-level `*.json` file is a complete item document. Missing `name`,
//! `type` and `$schema` are filled in; everything else passes through.

use std::fs;

use serde_json::Value;
use tracing::{debug, warn};

use super::Collect;
use crate::core::context::CollectorContext;
use crate::core::file_scanner::{ScanOptions, scan_files};
use crate::core::types::{
    AssetFile, CollectorResult, Document, ITEM_SCHEMA_URL, ItemFile, ItemType, RegistryItem,
};
use crate::issues::BuildIssue;
use crate::utils::strip_extension;

fn parse_definition(content: &str) -> Result<Document, String> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

fn fill_defaults(doc: &mut Document, file_stem: &str, item_type: ItemType) {
    let has_name = doc
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty());
    if !has_name {
        doc.insert("name".to_string(), Value::from(file_stem));
    }
    if !doc.get("type").is_some_and(|t| t.as_str().is_some_and(|t| !t.is_empty())) {
        doc.insert("type".to_string(), Value::from(item_type.as_str()));
    }
    if !doc.contains_key("$schema") {
        doc.insert("$schema".to_string(), Value::from(ITEM_SCHEMA_URL));
    }
}

/// Index summary of a pass-through document. Fields the schema gate rejects
/// later are summarized leniently here.
fn summarize(doc: &Document, item_type: ItemType) -> RegistryItem {
    let text = |key: &str| {
        doc.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    RegistryItem {
        name: text("name"),
        item_type: doc
            .get("type")
            .and_then(Value::as_str)
            .and_then(ItemType::from_type_str)
            .unwrap_or(item_type),
        title: text("title"),
        description: text("description"),
        files: doc
            .get("files")
            .and_then(|files| serde_json::from_value::<Vec<ItemFile>>(files.clone()).ok())
            .unwrap_or_default(),
    }
}

fn load_definitions(
    item_type: ItemType,
    ctx: &CollectorContext,
    issues: &mut Vec<BuildIssue>,
) -> CollectorResult {
    let mut result = CollectorResult::empty(item_type);
    let dir = ctx.layout.source_dir(item_type);

    let scanned = scan_files(&dir, ScanOptions::top_level(&["json"]), &ctx.ignores);
    issues.extend(scanned.issues);

    for file in scanned.files {
        let path = file.absolute.display().to_string();
        let parsed = fs::read_to_string(&file.absolute)
            .map_err(|err| err.to_string())
            .and_then(|content| parse_definition(&content));

        let mut doc = match parsed {
            Ok(doc) => doc,
            Err(message) => {
                warn!(path = %path, error = %message, "skipping {} definition", item_type);
                issues.push(BuildIssue::MalformedDefinition {
                    path,
                    item_type,
                    message,
                });
                continue;
            }
        };

        fill_defaults(&mut doc, strip_extension(&file.relative), item_type);
        let item = summarize(&doc, item_type);
        debug!(name = %item.name, item_type = %item_type, "loaded definition");

        result.outputs.insert(item.name.clone(), doc);
        result.items.retain(|existing| existing.name != item.name);
        result.items.push(item);
    }

    result
}

pub struct StyleCollector;

impl Collect for StyleCollector {
    fn item_type(&self) -> ItemType {
        ItemType::Style
    }

    fn collect(&self, _ctx: &CollectorContext, _issues: &mut Vec<BuildIssue>) -> Vec<AssetFile> {
        Vec::new()
    }

    fn build_items(
        &self,
        _files: Vec<AssetFile>,
        _ctx: &CollectorContext,
        _issues: &mut Vec<BuildIssue>,
    ) -> CollectorResult {
        CollectorResult::empty(self.item_type())
    }

    fn collect_and_build(
        &self,
        ctx: &CollectorContext,
        issues: &mut Vec<BuildIssue>,
    ) -> Option<CollectorResult> {
        Some(load_definitions(self.item_type(), ctx, issues))
    }
}

pub struct ThemeCollector;

impl Collect for ThemeCollector {
    fn item_type(&self) -> ItemType {
        ItemType::Theme
    }

    fn collect(&self, _ctx: &CollectorContext, _issues: &mut Vec<BuildIssue>) -> Vec<AssetFile> {
        Vec::new()
    }

    fn build_items(
        &self,
        _files: Vec<AssetFile>,
        _ctx: &CollectorContext,
        _issues: &mut Vec<BuildIssue>,
    ) -> CollectorResult {
        CollectorResult::empty(self.item_type())
    }

    fn collect_and_build(
        &self,
        ctx: &CollectorContext,
        issues: &mut Vec<BuildIssue>,
    ) -> Option<CollectorResult> {
        Some(load_definitions(self.item_type(), ctx, issues))
    }
}

//! Behavior shared by the scanned collectors.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::core::context::CollectorContext;
use crate::core::deps::{ClassifyOptions, DependencyClassifier};
use crate::core::file_scanner::{ScanOptions, read_files, scan_files};
use crate::core::parsers::{extract_source, parse_imports};
use crate::core::types::{
    AssetFile, CollectorResult, DependencySets, Document, ITEM_SCHEMA_URL, ItemFile, ItemType,
    RegistryItem,
};
use crate::issues::BuildIssue;
use crate::utils::{strip_extension, to_title};

/// Scan, read, rewrite and target the files of `item_type`.
///
/// `fallback` receives the path relative to the scanned directory and returns
/// the default target for target-required types.
pub fn collect_scanned(
    ctx: &CollectorContext,
    item_type: ItemType,
    options: ScanOptions<'_>,
    fallback: impl Fn(&str) -> Option<String>,
    issues: &mut Vec<BuildIssue>,
) -> Vec<AssetFile> {
    let dir = ctx.layout.source_dir(item_type);
    let scanned = scan_files(&dir, options, &ctx.ignores);
    let (contents, read_issues) = read_files(&scanned.files);
    issues.extend(scanned.issues);
    issues.extend(read_issues);

    let prefix = ctx.path_prefix(item_type);
    let files: Vec<AssetFile> = contents
        .into_iter()
        .map(|(file, raw)| {
            let path = format!("{}{}", prefix, file.relative);
            let target = ctx.resolve_target(&path, item_type, fallback(&file.relative));
            AssetFile {
                content: ctx.rewriter.rewrite(&raw, item_type),
                path,
                file_type: item_type,
                target,
            }
        })
        .collect();

    debug!(item_type = %item_type, dir = %dir.display(), count = files.len(), "collected files");
    files
}

/// Partition files into groups keyed by group name.
///
/// After stripping `prefix`, a nested path is grouped by its first segment
/// and a lone file by its name without extension.
pub fn group_files(files: Vec<AssetFile>, prefix: &str) -> BTreeMap<String, Vec<AssetFile>> {
    let mut groups: BTreeMap<String, Vec<AssetFile>> = BTreeMap::new();
    for file in files {
        let rel = file.path.strip_prefix(prefix).unwrap_or(&file.path);
        let group = match rel.split_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => strip_extension(rel).to_string(),
        };
        groups.entry(group).or_default().push(file);
    }
    groups
}

/// Run source extraction, import parsing and classification over `files`
/// and merge the results.
pub fn collect_dependencies(
    files: &[AssetFile],
    classifier: &DependencyClassifier<'_>,
    current_group: Option<&str>,
    skip_internal_deps: bool,
    issues: &mut Vec<BuildIssue>,
) -> DependencySets {
    let mut deps = DependencySets::default();

    for file in files {
        let source = extract_source(file);
        if source.is_empty() {
            continue;
        }

        let imports = match parse_imports(&source, &file.path) {
            Ok(imports) => imports,
            Err(err) => {
                warn!(path = %file.path, error = %err, "failed to parse imports");
                issues.push(BuildIssue::ParseFailure {
                    path: file.path.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        let options = ClassifyOptions {
            file_path: Some(&file.path),
            current_group,
            skip_internal_deps,
        };
        deps.merge(classifier.classify(&imports, &options));
    }

    deps
}

fn sorted(set: &BTreeSet<String>) -> Value {
    Value::from(set.iter().cloned().collect::<Vec<_>>())
}

/// Assemble the persisted document for an item.
pub fn item_document(item: &RegistryItem, files: &[AssetFile], deps: &DependencySets) -> Document {
    let files: Vec<Value> = files
        .iter()
        .map(|file| {
            let mut entry = json!({
                "path": file.path,
                "content": file.content,
                "type": file.file_type.as_str(),
            });
            if let (Some(target), Value::Object(map)) = (&file.target, &mut entry) {
                map.insert("target".to_string(), Value::from(target.as_str()));
            }
            entry
        })
        .collect();

    let mut doc = Document::new();
    doc.insert("$schema".to_string(), Value::from(ITEM_SCHEMA_URL));
    doc.insert("name".to_string(), Value::from(item.name.as_str()));
    doc.insert("type".to_string(), Value::from(item.item_type.as_str()));
    doc.insert("title".to_string(), Value::from(item.title.as_str()));
    doc.insert("description".to_string(), Value::from(item.description.as_str()));
    doc.insert("files".to_string(), Value::Array(files));
    doc.insert("dependencies".to_string(), sorted(&deps.runtime));
    doc.insert("devDependencies".to_string(), sorted(&deps.dev));
    doc.insert("registryDependencies".to_string(), sorted(&deps.internal));
    doc
}

/// Group, classify and describe the files of one scanned type.
///
/// `describe` maps the title-cased group name to `(title, description)`.
pub fn build_grouped(
    item_type: ItemType,
    files: Vec<AssetFile>,
    ctx: &CollectorContext,
    issues: &mut Vec<BuildIssue>,
    describe: impl Fn(&str) -> (String, String),
) -> CollectorResult {
    let mut result = CollectorResult::empty(item_type);
    let classifier = ctx.classifier();
    let prefix = ctx.path_prefix(item_type);

    for (group, group_files) in group_files(files.clone(), &prefix) {
        let deps = collect_dependencies(&group_files, &classifier, Some(&group), false, issues);
        let (title, description) = describe(&to_title(&group));

        let item = RegistryItem {
            name: group.clone(),
            item_type,
            title,
            description,
            files: group_files.iter().map(ItemFile::from).collect(),
        };

        result
            .outputs
            .insert(group, item_document(&item, &group_files, &deps));
        result.items.push(item);
    }

    result.files = files;
    result
}

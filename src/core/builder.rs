//! Registry assembly: runs every collector and writes the output store.
//!
//! ## Build phases
//!
//! 1. Load allow-lists and target overrides ([`CollectorContext::load`])
//! 2. Erase and recreate the output directory
//! 3. Run each collector in [`ItemType::BUILD_ORDER`], dropping untargeted
//!    files of target-required types
//! 4. Drop every document that fails [`validate_item`]
//! 5. Write item documents, then `registry.json`, then `all.json`
//!
//! Only errors while preparing or writing the store are fatal; everything
//! else is recorded as a [`BuildIssue`] and the build continues.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::core::collectors::{Collect, collect_dependencies, default_collectors, item_document};
use crate::core::context::CollectorContext;
use crate::core::output::OutputWriter;
use crate::core::schema::validate_item;
use crate::core::types::{
    AssetFile, CollectorResult, DependencySets, Document, ItemType, RegistryIndex, RegistryItem,
};
use crate::issues::BuildIssue;

pub const INDEX_FILE: &str = "registry.json";
pub const BUNDLE_FILE: &str = "all.json";
pub const BUNDLE_NAME: &str = "all";

/// What the bundle ended up containing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    pub files: usize,
    pub dependencies: usize,
    pub dev_dependencies: usize,
}

/// Outcome of one build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Documents written per type. Types with no items are absent.
    pub written: BTreeMap<ItemType, usize>,
    pub index_items: usize,
    /// `None` when there was nothing to bundle.
    pub bundle: Option<BundleSummary>,
    pub issues: Vec<BuildIssue>,
}

impl BuildReport {
    pub fn total_written(&self) -> usize {
        self.written.values().sum()
    }
}

/// Drop files of target-required types that have no target.
pub fn retain_targeted(files: Vec<AssetFile>, issues: &mut Vec<BuildIssue>) -> Vec<AssetFile> {
    files
        .into_iter()
        .filter(|file| {
            if file.file_type.target_required() && file.target.is_none() {
                error!(
                    path = %file.path,
                    item_type = %file.file_type,
                    "file requires a target but none was provided, skipping"
                );
                issues.push(BuildIssue::MissingTarget {
                    path: file.path.clone(),
                    item_type: file.file_type,
                });
                return false;
            }
            true
        })
        .collect()
}

/// Remove every item whose document fails the schema gate.
pub fn retain_valid(result: &mut CollectorResult, issues: &mut Vec<BuildIssue>) {
    let invalid: Vec<(String, Vec<String>)> = result
        .outputs
        .iter()
        .filter_map(|(name, doc)| {
            validate_item(doc)
                .err()
                .map(|err| (name.clone(), err.reasons))
        })
        .collect();

    for (name, reasons) in invalid {
        error!(
            item = %name,
            item_type = %result.item_type,
            reasons = %reasons.join("; "),
            "skipping invalid item"
        );
        result.remove_item(&name);
        issues.push(BuildIssue::InvalidItem {
            item_type: result.item_type,
            name,
            reasons,
        });
    }
}

fn run_collectors(ctx: &CollectorContext, issues: &mut Vec<BuildIssue>) -> Vec<CollectorResult> {
    let mut results = Vec::new();

    for collector in default_collectors() {
        let mut result = match collector.collect_and_build(ctx, issues) {
            Some(result) => result,
            None => {
                let files = collector.collect(ctx, issues);
                let files = retain_targeted(files, issues);
                if files.is_empty() {
                    debug!(item_type = %collector.item_type(), "no files collected");
                    continue;
                }
                collector.build_items(files, ctx, issues)
            }
        };

        retain_valid(&mut result, issues);
        results.push(result);
    }

    results
}

/// Files of bundled types that belong to an item that survived validation.
fn bundle_files(results: &[CollectorResult]) -> Vec<AssetFile> {
    results
        .iter()
        .filter(|result| result.item_type.is_bundled())
        .flat_map(|result| {
            let surviving: HashSet<&str> = result
                .items
                .iter()
                .flat_map(|item| item.files.iter().map(|f| f.path.as_str()))
                .collect();
            result
                .files
                .iter()
                .filter(move |file| surviving.contains(file.path.as_str()))
                .cloned()
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Build the `all` bundle. Internal references are never kept.
///
/// Parse failures were already reported by the item that owns the file.
fn bundle_document(files: &[AssetFile], ctx: &CollectorContext) -> (Document, DependencySets) {
    let classifier = ctx.classifier();
    let deps = collect_dependencies(files, &classifier, None, true, &mut Vec::new());

    let item = RegistryItem {
        name: BUNDLE_NAME.to_string(),
        item_type: ItemType::Component,
        title: ctx.config.registry_title.clone(),
        description: ctx.config.registry_description.clone(),
        files: Vec::new(),
    };
    (item_document(&item, files, &deps), deps)
}

/// Run the full pipeline for the project at `root`.
pub fn build_registry(root: &Path, config: &Config) -> Result<BuildReport> {
    let ctx = CollectorContext::load(root, config.clone())?;
    let writer = OutputWriter::reset(
        &root.join(&config.output_dir),
        &[
            root,
            ctx.layout.elements_root.as_path(),
            ctx.layout.examples_root.as_path(),
        ],
    )?;

    let mut report = BuildReport {
        output_dir: writer.root().to_path_buf(),
        ..Default::default()
    };

    let results = run_collectors(&ctx, &mut report.issues);

    for result in &results {
        for (name, doc) in &result.outputs {
            writer.write_item(result.item_type, name, doc)?;
        }
        if !result.outputs.is_empty() {
            report.written.insert(result.item_type, result.outputs.len());
        }
    }

    let index = RegistryIndex {
        name: config.base_name.clone(),
        homepage: config.homepage.clone(),
        items: results
            .iter()
            .flat_map(|result| result.items.iter().cloned())
            .collect(),
    };
    writer.write_root(INDEX_FILE, &index)?;
    report.index_items = index.items.len();

    let files = bundle_files(&results);
    if files.is_empty() {
        debug!("nothing to bundle");
    } else {
        let (doc, deps) = bundle_document(&files, &ctx);
        match validate_item(&doc) {
            Ok(()) => {
                writer.write_root(BUNDLE_FILE, &Value::Object(doc))?;
                report.bundle = Some(BundleSummary {
                    files: files.len(),
                    dependencies: deps.runtime.len(),
                    dev_dependencies: deps.dev.len(),
                });
            }
            Err(err) => {
                error!(error = %err, "skipping invalid bundle");
                report.issues.push(BuildIssue::InvalidItem {
                    item_type: ItemType::Component,
                    name: BUNDLE_NAME.to_string(),
                    reasons: err.reasons,
                });
            }
        }
    }

    info!(
        output = %report.output_dir.display(),
        items = report.total_written(),
        issues = report.issues.len(),
        "registry assets generated"
    );

    Ok(report)
}

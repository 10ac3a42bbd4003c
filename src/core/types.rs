//! Core data types shared by every stage of the pipeline.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `$schema` written into every item document.
pub const ITEM_SCHEMA_URL: &str = "https://shadcn-vue.com/schema/registry-item.json";

/// A loosely-typed JSON document as written to the output store.
pub type Document = Map<String, Value>;

// ============================================================
// Item types
// ============================================================

/// The closed set of registry item types, one per collector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ItemType {
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:block", alias = "registry:example")]
    Example,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:file")]
    File,
    #[serde(rename = "registry:style")]
    Style,
    #[serde(rename = "registry:theme")]
    Theme,
}

impl ItemType {
    /// Collector order used by the builder. Only affects write sequencing.
    pub const BUILD_ORDER: [ItemType; 9] = [
        ItemType::Component,
        ItemType::Hook,
        ItemType::Example,
        ItemType::Lib,
        ItemType::Ui,
        ItemType::Page,
        ItemType::File,
        ItemType::Style,
        ItemType::Theme,
    ];

    /// Subfolder lookup priority for readers of the store. First match wins.
    pub const SEARCH_ORDER: [ItemType; 9] = [
        ItemType::Component,
        ItemType::Hook,
        ItemType::Lib,
        ItemType::Ui,
        ItemType::Example,
        ItemType::Page,
        ItemType::File,
        ItemType::Theme,
        ItemType::Style,
    ];

    /// The `type` value written into item documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Component => "registry:component",
            ItemType::Hook => "registry:hook",
            ItemType::Example => "registry:block",
            ItemType::Lib => "registry:lib",
            ItemType::Ui => "registry:ui",
            ItemType::Page => "registry:page",
            ItemType::File => "registry:file",
            ItemType::Style => "registry:style",
            ItemType::Theme => "registry:theme",
        }
    }

    /// Parse a document `type` value. Accepts `registry:example` as a synonym
    /// of the example type.
    pub fn from_type_str(value: &str) -> Option<Self> {
        match value {
            "registry:component" => Some(ItemType::Component),
            "registry:hook" => Some(ItemType::Hook),
            "registry:block" | "registry:example" => Some(ItemType::Example),
            "registry:lib" => Some(ItemType::Lib),
            "registry:ui" => Some(ItemType::Ui),
            "registry:page" => Some(ItemType::Page),
            "registry:file" => Some(ItemType::File),
            "registry:style" => Some(ItemType::Style),
            "registry:theme" => Some(ItemType::Theme),
            _ => None,
        }
    }

    /// Subfolder of the output store holding this type's documents.
    pub fn output_dir(self) -> &'static str {
        match self {
            ItemType::Component => "components",
            ItemType::Hook => "hooks",
            ItemType::Example => "examples",
            ItemType::Lib => "lib",
            ItemType::Ui => "ui",
            ItemType::Page => "pages",
            ItemType::File => "files",
            ItemType::Style => "styles",
            ItemType::Theme => "themes",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ItemType::Component => "component",
            ItemType::Hook => "hook",
            ItemType::Example => "example",
            ItemType::Lib => "lib",
            ItemType::Ui => "ui",
            ItemType::Page => "page",
            ItemType::File => "file",
            ItemType::Style => "style",
            ItemType::Theme => "theme",
        }
    }

    /// Whether every file entry of this type must carry a `target`.
    pub fn target_required(self) -> bool {
        matches!(self, ItemType::File | ItemType::Page)
    }

    /// JSON-only types are pre-authored documents with no scanned files.
    pub fn is_json_only(self) -> bool {
        matches!(self, ItemType::Style | ItemType::Theme)
    }

    /// Whether files of this type are aggregated into `all.json`.
    pub fn is_bundled(self) -> bool {
        !matches!(self, ItemType::Example | ItemType::Style | ItemType::Theme)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================
// Files and items
// ============================================================

/// A file collected for publication, with aliases already rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFile {
    /// Canonical forward-slash path inside the published item.
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: ItemType,
    /// Install destination on the consumer side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// File entry of an index item (no content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFile {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl From<&AssetFile> for ItemFile {
    fn from(file: &AssetFile) -> Self {
        Self {
            path: file.path.clone(),
            file_type: file.file_type,
            target: file.target.clone(),
        }
    }
}

/// Summary metadata of one item, as listed in `registry.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ItemFile>,
}

/// The index document (`registry.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryIndex {
    pub name: String,
    pub homepage: String,
    #[serde(default)]
    pub items: Vec<RegistryItem>,
}

// ============================================================
// Dependencies
// ============================================================

/// The three disjoint dependency sets attached to an item.
///
/// A package listed as a runtime dependency is never also listed as a
/// dev-only dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySets {
    pub runtime: BTreeSet<String>,
    pub dev: BTreeSet<String>,
    pub internal: BTreeSet<String>,
}

impl DependencySets {
    pub fn add_runtime(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.dev.remove(&name);
        self.runtime.insert(name);
    }

    pub fn add_dev(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.runtime.contains(&name) {
            self.dev.insert(name);
        }
    }

    pub fn add_internal(&mut self, reference: impl Into<String>) {
        self.internal.insert(reference.into());
    }

    pub fn merge(&mut self, other: DependencySets) {
        for name in other.runtime {
            self.add_runtime(name);
        }
        for name in other.dev {
            self.add_dev(name);
        }
        self.internal.extend(other.internal);
    }

    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.dev.is_empty() && self.internal.is_empty()
    }
}

// ============================================================
// Inputs
// ============================================================

/// Explicit install targets keyed by canonical path (`meta.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetMeta {
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl TargetMeta {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.targets
            .get(path)
            .map(String::as_str)
            .filter(|target| !target.is_empty())
    }
}

/// The parts of a `package.json` the builder reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

// ============================================================
// Collector output
// ============================================================

/// Everything one collector produced for its type.
#[derive(Debug, Clone)]
pub struct CollectorResult {
    pub item_type: ItemType,
    /// Files fed into `build_items` (empty for JSON-only types).
    pub files: Vec<AssetFile>,
    /// Index summaries, in output order.
    pub items: Vec<RegistryItem>,
    /// Item name -> full document ready for persistence.
    pub outputs: BTreeMap<String, Document>,
}

impl CollectorResult {
    pub fn empty(item_type: ItemType) -> Self {
        Self {
            item_type,
            files: Vec::new(),
            items: Vec::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Drop an item from both the index summaries and the outputs.
    pub fn remove_item(&mut self, name: &str) {
        self.items.retain(|item| item.name != name);
        self.outputs.remove(name);
    }
}

//! Read access to a built output store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::builder::{BUNDLE_FILE, BUNDLE_NAME, INDEX_FILE};
use crate::core::types::{Document, ItemType, RegistryIndex, RegistryItem};

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z-]+$").expect("valid slug regex"));

/// A document found in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEntry {
    Index(RegistryIndex),
    Item {
        /// `None` for the bundle.
        item_type: Option<ItemType>,
        document: Document,
    },
}

pub struct RegistryStore {
    root: PathBuf,
    name: String,
    homepage: String,
}

impl RegistryStore {
    pub fn open(root: &Path, config: &Config) -> Self {
        Self {
            root: root.to_path_buf(),
            name: config.base_name.clone(),
            homepage: config.homepage.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_document(&self, path: &Path) -> Result<Option<Document>> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
        match value {
            Value::Object(doc) => Ok(Some(doc)),
            _ => bail!("Root of JSON file must be an object: {}", path.display()),
        }
    }

    /// The index. A store without one is an empty registry.
    pub fn index(&self) -> Result<RegistryIndex> {
        let path = self.root.join(INDEX_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no index, serving an empty registry");
            return Ok(RegistryIndex {
                name: self.name.clone(),
                homepage: self.homepage.clone(),
                items: Vec::new(),
            });
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))
    }

    /// Look up `name` (an optional `.json` suffix is ignored).
    ///
    /// `registry` is the index and `all` the bundle; anything else is searched
    /// in [`ItemType::SEARCH_ORDER`] and the first match wins.
    pub fn get(&self, name: &str) -> Result<Option<StoreEntry>> {
        let name = name.strip_suffix(".json").unwrap_or(name);

        if name == "registry" {
            return self.index().map(|index| Some(StoreEntry::Index(index)));
        }

        if name == BUNDLE_NAME {
            return Ok(self
                .read_document(&self.root.join(BUNDLE_FILE))?
                .map(|document| StoreEntry::Item {
                    item_type: None,
                    document,
                }));
        }

        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Ok(None);
        }

        for item_type in ItemType::SEARCH_ORDER {
            let path = self
                .root
                .join(item_type.output_dir())
                .join(format!("{}.json", name));
            match self.read_document(&path) {
                Ok(Some(document)) => {
                    return Ok(Some(StoreEntry::Item {
                        item_type: Some(item_type),
                        document,
                    }));
                }
                Ok(None) => {}
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable item"),
            }
        }

        Ok(None)
    }

    /// Index entries sorted by name, optionally of one type.
    pub fn list(&self, filter: Option<ItemType>) -> Result<Vec<RegistryItem>> {
        let mut items: Vec<RegistryItem> = self
            .index()?
            .items
            .into_iter()
            .filter(|item| filter.is_none_or(|t| item.item_type == t))
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

fn join_url(registry_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        registry_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn one `registryDependencies` entry into what a consumer can fetch.
pub fn resolve_dependency(entry: &str, registry_url: &str) -> String {
    if entry.starts_with('/') {
        return join_url(registry_url, entry);
    }
    if entry.contains(".json") {
        if entry.starts_with("http") {
            return entry.to_string();
        }
        return join_url(registry_url, entry);
    }
    if SLUG.is_match(entry) {
        return entry.to_string();
    }
    join_url(registry_url, &format!("{}.json", entry))
}

/// Rewrite the `registryDependencies` of an item document against `registry_url`.
pub fn resolve_registry_dependencies(doc: &mut Document, registry_url: &str) {
    if let Some(Value::Array(entries)) = doc.get_mut("registryDependencies") {
        for entry in entries.iter_mut() {
            if let Value::String(dep) = entry {
                *dep = resolve_dependency(dep, registry_url);
            }
        }
    }
}

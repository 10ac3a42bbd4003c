use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::core::types::{Document, ItemType};

/// Writer for the output store directory.
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Erase and recreate `root`, so nothing from a previous build survives.
    ///
    /// Fails without touching anything when `root` is, or contains, one of
    /// the `protected` directories.
    pub fn reset(root: &Path, protected: &[&Path]) -> Result<Self> {
        if root.exists() {
            let target = root
                .canonicalize()
                .with_context(|| format!("Failed to resolve output directory: {}", root.display()))?;
            for path in protected {
                let Ok(path) = path.canonicalize() else {
                    continue;
                };
                if path.starts_with(&target) {
                    bail!(
                        "Refusing to clear output directory {}: it contains {}",
                        root.display(),
                        path.display()
                    );
                }
            }
            fs::remove_dir_all(root)
                .with_context(|| format!("Failed to clear output directory: {}", root.display()))?;
        }
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create directory: {}", root.display()))?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an item document to `<root>/<type dir>/<name>.json`.
    pub fn write_item(&self, item_type: ItemType, name: &str, doc: &Document) -> Result<PathBuf> {
        let path = self
            .root
            .join(item_type.output_dir())
            .join(format!("{}.json", name));
        self.write_json(&path, doc)?;
        Ok(path)
    }

    /// Write a top-level document such as `registry.json`.
    pub fn write_root(&self, file_name: &str, value: &impl Serialize) -> Result<PathBuf> {
        let path = self.root.join(file_name);
        self.write_json(&path, value)?;
        Ok(path)
    }

    /// Save pretty JSON with 2-space indentation and a trailing newline.
    fn write_json(&self, path: &Path, value: &impl Serialize) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

        fs::write(path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        Ok(())
    }
}

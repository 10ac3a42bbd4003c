//! Per-build state shared read-only by every collector.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::deps::{AllowLists, DependencyClassifier, load_package_json};
use crate::core::file_scanner::IgnoreRules;
use crate::core::rewrite::AliasRewriter;
use crate::core::types::{ItemType, TargetMeta};

/// Where each collector finds its sources.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    pub elements_root: PathBuf,
    pub examples_root: PathBuf,
}

impl SourceLayout {
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            elements_root: root.join(&config.elements_root),
            examples_root: root.join(&config.examples_root),
        }
    }

    pub fn elements_src(&self) -> PathBuf {
        self.elements_root.join("src")
    }

    pub fn examples_src(&self) -> PathBuf {
        self.examples_root.join("src")
    }

    pub fn meta_file(&self) -> PathBuf {
        self.elements_root.join("meta.json")
    }

    pub fn package_files(&self) -> [PathBuf; 2] {
        [
            self.elements_root.join("package.json"),
            self.examples_root.join("package.json"),
        ]
    }

    /// Source subtree owned by the collector of `item_type`.
    pub fn source_dir(&self, item_type: ItemType) -> PathBuf {
        let src = self.elements_src();
        match item_type {
            ItemType::Component => src.join("components"),
            ItemType::Hook => src.join("composables"),
            ItemType::Example => self.examples_src(),
            ItemType::Lib => src.join("lib"),
            ItemType::Ui => src.join("ui"),
            ItemType::Page => src.join("pages"),
            ItemType::File => src.join("files"),
            ItemType::Style => src.join("styles"),
            ItemType::Theme => src.join("themes"),
        }
    }
}

/// Load the target override table. Absent means no overrides.
pub fn load_target_meta(path: &Path) -> TargetMeta {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no target overrides");
            return TargetMeta::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ignoring malformed target overrides");
        TargetMeta::default()
    })
}

pub struct CollectorContext {
    pub config: Config,
    pub layout: SourceLayout,
    pub allow: AllowLists,
    pub target_meta: TargetMeta,
    pub rewriter: AliasRewriter,
    pub ignores: IgnoreRules,
}

impl CollectorContext {
    /// Load allow-lists and target overrides for the project at `root`.
    pub fn load(root: &Path, config: Config) -> Result<Self> {
        let layout = SourceLayout::new(root, &config);

        let packages: Vec<_> = layout
            .package_files()
            .iter()
            .map(|path| load_package_json(path))
            .collect();
        let allow = AllowLists::from_packages(&packages, &config);
        debug!(
            runtime = allow.runtime.len(),
            dev = allow.dev.len(),
            "loaded dependency allow-lists"
        );

        let target_meta = load_target_meta(&layout.meta_file());
        let rewriter = AliasRewriter::new(&config)?;
        let ignores = IgnoreRules::new(root, &config.ignores);

        Ok(Self {
            config,
            layout,
            allow,
            target_meta,
            rewriter,
            ignores,
        })
    }

    pub fn classifier(&self) -> DependencyClassifier<'_> {
        DependencyClassifier::new(&self.allow, &self.config)
    }

    /// Canonical path prefix of `item_type` (empty for JSON-only types).
    pub fn path_prefix(&self, item_type: ItemType) -> String {
        let base = &self.config.base_name;
        match item_type {
            ItemType::Component => format!("components/{}/", base),
            ItemType::Hook => "composables/".to_string(),
            ItemType::Example => format!("components/{}/examples/", base),
            ItemType::Lib => "lib/".to_string(),
            ItemType::Ui => "components/ui/".to_string(),
            ItemType::Page => "pages/".to_string(),
            ItemType::File => "files/".to_string(),
            ItemType::Style | ItemType::Theme => String::new(),
        }
    }

    /// Install target for a file, in priority order: explicit override,
    /// `fallback` for target-required types, nothing.
    pub fn resolve_target(
        &self,
        path: &str,
        item_type: ItemType,
        fallback: Option<String>,
    ) -> Option<String> {
        if let Some(target) = self.target_meta.get(path) {
            return Some(target.to_string());
        }
        if item_type.target_required() && self.config.infer_targets {
            return fallback;
        }
        None
    }
}

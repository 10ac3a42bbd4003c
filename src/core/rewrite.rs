//! Alias rewriting applied to raw file content before anything else reads it.
//!
//! Monorepo package imports are turned into the `@/` aliases a consumer
//! project resolves after installation.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};

use crate::config::Config;
use crate::core::types::ItemType;

struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(package: &str, replacement: String) -> Result<Option<Self>> {
        let package = package.trim_end_matches('/');
        if package.is_empty() {
            return Ok(None);
        }
        let pattern = Regex::new(&regex::escape(&format!("{}/", package)))
            .with_context(|| format!("Invalid alias package: \"{}\"", package))?;
        Ok(Some(Self {
            pattern,
            replacement,
        }))
    }

    fn apply(&self, content: &str) -> String {
        self.pattern
            .replace_all(content, NoExpand(&self.replacement))
            .into_owned()
    }
}

pub struct AliasRewriter {
    ui: Option<Rule>,
    elements: Option<Rule>,
}

impl AliasRewriter {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            ui: Rule::new(&config.ui_package, "@/".to_string())?,
            elements: Rule::new(
                &config.elements_package,
                format!("@/components/{}/", config.base_name),
            )?,
        })
    }

    /// Rewrite `content` for a file of `item_type`.
    ///
    /// Hooks and examples only see the elements rule; JSON-only types are untouched.
    pub fn rewrite(&self, content: &str, item_type: ItemType) -> String {
        let mut out = content.to_string();
        let rules = match item_type {
            ItemType::Style | ItemType::Theme => vec![],
            ItemType::Hook | ItemType::Example => vec![&self.elements],
            _ => vec![&self.ui, &self.elements],
        };
        for rule in rules.into_iter().flatten() {
            out = rule.apply(&out);
        }
        out
    }
}

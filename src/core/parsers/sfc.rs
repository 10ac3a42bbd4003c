//! Analyzable source extraction.
//!
//! Vue single-file components only contribute their `<script>` and
//! `<script setup>` blocks; plain script files are used verbatim; anything
//! else has no importable code.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::AssetFile;

/// Extensions whose content is a script module as-is.
pub const SCRIPT_EXTENSIONS: &[&str] = &["ts", "js", "tsx", "jsx", "mjs", "mts"];

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("valid script block regex")
});

static SETUP_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)setup(?:\s|=|/|$)").expect("valid setup regex"));

/// The two script regions of a single-file component.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SfcScripts<'a> {
    pub script: Option<&'a str>,
    pub script_setup: Option<&'a str>,
}

/// Split a single-file component into its plain and setup script regions.
///
/// Only the first block of each kind counts, matching how the Vue compiler
/// treats duplicates.
pub fn parse_sfc_scripts(content: &str) -> SfcScripts<'_> {
    let mut scripts = SfcScripts::default();

    for caps in SCRIPT_BLOCK.captures_iter(content) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        if SETUP_ATTR.is_match(attrs) {
            scripts.script_setup.get_or_insert(body);
        } else {
            scripts.script.get_or_insert(body);
        }
    }

    scripts
}

/// Return the source text to analyze for imports.
///
/// An empty string means "no importable code" and is not an error.
pub fn extract_source(file: &AssetFile) -> String {
    let extension = file.path.rsplit_once('.').map(|(_, ext)| ext);

    match extension {
        Some("vue") => {
            let scripts = parse_sfc_scripts(&file.content);
            if scripts.script.is_none() && scripts.script_setup.is_none() {
                return String::new();
            }
            format!(
                "{}\n{}",
                scripts.script.unwrap_or_default(),
                scripts.script_setup.unwrap_or_default()
            )
        }
        Some(ext) if SCRIPT_EXTENSIONS.contains(&ext) => file.content.clone(),
        _ => String::new(),
    }
}

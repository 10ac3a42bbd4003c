use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".vregrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_base_name")]
    pub base_name: String,
    #[serde(default = "default_homepage")]
    pub homepage: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_registry_title")]
    pub registry_title: String,
    #[serde(default = "default_registry_description")]
    pub registry_description: String,
    #[serde(default = "default_elements_root")]
    pub elements_root: String,
    #[serde(default = "default_examples_root")]
    pub examples_root: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_ui_package")]
    pub ui_package: String,
    #[serde(default = "default_elements_package")]
    pub elements_package: String,
    #[serde(default = "default_internal_scope")]
    pub internal_scope: String,
    #[serde(default = "default_framework_package")]
    pub framework_package: String,
    #[serde(default = "default_excluded_dev_dependencies")]
    pub excluded_dev_dependencies: Vec<String>,
    #[serde(default = "default_infer_targets")]
    pub infer_targets: bool,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_base_name() -> String {
    "self".to_string()
}

fn default_homepage() -> String {
    "https://example.com".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_registry_title() -> String {
    "All Elements".to_string()
}

fn default_registry_description() -> String {
    "A collection of all elements.".to_string()
}

fn default_elements_root() -> String {
    "packages/elements".to_string()
}

fn default_examples_root() -> String {
    "packages/examples".to_string()
}

fn default_output_dir() -> String {
    "packages/registry/server/assets/registry".to_string()
}

fn default_ui_package() -> String {
    "@repo/shadcn-vue".to_string()
}

fn default_elements_package() -> String {
    "@repo/elements".to_string()
}

fn default_internal_scope() -> String {
    "@repo".to_string()
}

fn default_framework_package() -> String {
    "vue".to_string()
}

fn default_excluded_dev_dependencies() -> Vec<String> {
    vec!["typescript".to_string()]
}

fn default_infer_targets() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_name: default_base_name(),
            homepage: default_homepage(),
            base_url: default_base_url(),
            registry_title: default_registry_title(),
            registry_description: default_registry_description(),
            elements_root: default_elements_root(),
            examples_root: default_examples_root(),
            output_dir: default_output_dir(),
            ui_package: default_ui_package(),
            elements_package: default_elements_package(),
            internal_scope: default_internal_scope(),
            framework_package: default_framework_package(),
            excluded_dev_dependencies: default_excluded_dev_dependencies(),
            infer_targets: default_infer_targets(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid `ignores` globs, an unusable `baseName`,
    /// an empty `baseUrl`, or an `outputDir` with no directory name of its own.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.base_name.trim().is_empty() {
            bail!("'baseName' must not be empty");
        }
        if self.base_name.contains('/') || self.base_name.contains('\\') {
            bail!("'baseName' must be a single path segment: \"{}\"", self.base_name);
        }
        if self.base_url.trim().is_empty() {
            bail!("'baseUrl' must not be empty");
        }
        let names_a_directory = Path::new(self.output_dir.trim())
            .components()
            .any(|c| matches!(c, Component::Normal(_)));
        if !names_a_directory {
            bail!(
                "'outputDir' must name a dedicated directory: \"{}\"",
                self.output_dir
            );
        }

        Ok(())
    }

    /// Base URL without a trailing slash, used to build item references.
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

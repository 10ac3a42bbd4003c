pub mod build;
pub mod get;
pub mod init;
pub mod list;

use std::path::PathBuf;

use anyhow::Result;

use super::args::CommonArgs;
use crate::config::{CONFIG_FILE_NAME, Config, load_config};

/// Load the project config and apply the common overrides.
pub(crate) fn load_project_config(common: &CommonArgs) -> Result<Config> {
    let result = load_config(&common.root)?;
    if common.verbose && !result.from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    let mut config = result.config;
    if let Some(output) = &common.output {
        config.output_dir = output.to_string_lossy().to_string();
        config.validate()?;
    }
    Ok(config)
}

/// Output store directory for `config`, relative to the project root.
pub(crate) fn output_dir(common: &CommonArgs, config: &Config) -> PathBuf {
    common.root.join(&config.output_dir)
}

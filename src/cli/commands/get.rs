use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use super::{load_project_config, output_dir};
use crate::cli::args::GetCommand;
use crate::cli::exit_status::ExitStatus;
use crate::core::store::{RegistryStore, StoreEntry, resolve_registry_dependencies};

pub fn get(cmd: GetCommand) -> Result<ExitStatus> {
    let config = load_project_config(&cmd.common)?;
    let store = RegistryStore::open(&output_dir(&cmd.common, &config), &config);

    let json = match store.get(&cmd.name)? {
        Some(StoreEntry::Index(index)) => serde_json::to_string_pretty(&index),
        Some(StoreEntry::Item { mut document, .. }) => {
            let registry_url = cmd
                .registry_url
                .as_deref()
                .unwrap_or_else(|| config.base_url_trimmed());
            resolve_registry_dependencies(&mut document, registry_url);
            serde_json::to_string_pretty(&Value::Object(document))
        }
        None => {
            eprintln!(
                "{} Item \"{}\" not found in {}",
                "error:".bold().red(),
                cmd.name,
                store.root().display()
            );
            return Ok(ExitStatus::Failure);
        }
    }
    .context("Failed to serialize JSON")?;

    println!("{}", json);
    Ok(ExitStatus::Success)
}

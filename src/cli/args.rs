//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Generate the registry output store
//! - `list`: List the items of a built registry
//! - `get`: Print one item document from a built registry
//! - `init`: Initialize a `.vregrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::Config;
use crate::core::types::ItemType;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.common.verbose,
            Some(Command::List(cmd)) => cmd.common.verbose,
            Some(Command::Get(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; `.vregrc.json` is searched from here upwards
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output store directory (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Registry identity overrides, also read from the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct RegistryArgs {
    /// Registry name, also the components namespace
    #[arg(long, env = "BASE_NAME")]
    pub base_name: Option<String>,

    /// Base URL used in cross-item references
    #[arg(long, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// Homepage written into registry.json
    #[arg(long, env = "HOMEPAGE")]
    pub homepage: Option<String>,

    /// Title of the all.json bundle
    #[arg(long, env = "REGISTRY_TITLE")]
    pub title: Option<String>,

    /// Description of the all.json bundle
    #[arg(long, env = "REGISTRY_DESCRIPTION")]
    pub description: Option<String>,
}

impl RegistryArgs {
    /// Apply overrides (CLI/env > config file > defaults).
    pub fn apply(&self, config: &mut Config) {
        let overrides = [
            (&self.base_name, &mut config.base_name),
            (&self.base_url, &mut config.base_url),
            (&self.homepage, &mut config.homepage),
            (&self.title, &mut config.registry_title),
            (&self.description, &mut config.registry_description),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Exit with status 1 when any file or item was skipped
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only list items of this type
    #[arg(long = "type", value_enum)]
    pub item_type: Option<ItemType>,
}

#[derive(Debug, Args)]
pub struct GetCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Item name, `all` for the bundle or `registry` for the index
    pub name: String,

    /// Resolve registry dependencies against this URL (defaults to baseUrl)
    #[arg(long)]
    pub registry_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect sources and write the registry output store
    Build(BuildCommand),
    /// List the items of a built registry
    List(ListCommand),
    /// Print one item document from a built registry
    Get(GetCommand),
    /// Initialize a new .vregrc.json configuration file
    Init,
}

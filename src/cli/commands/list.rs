use anyhow::Result;

use super::{load_project_config, output_dir};
use crate::cli::args::ListCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report::print_item_list;
use crate::core::store::RegistryStore;

pub fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let config = load_project_config(&cmd.common)?;
    let store = RegistryStore::open(&output_dir(&cmd.common, &config), &config);

    print_item_list(&store.list(cmd.item_type)?);
    Ok(ExitStatus::Success)
}

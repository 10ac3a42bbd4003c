use anyhow::Result;

use super::load_project_config;
use crate::cli::args::BuildCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report::print_build_report;
use crate::core::builder::build_registry;

pub fn build(cmd: BuildCommand) -> Result<ExitStatus> {
    let mut config = load_project_config(&cmd.common)?;
    cmd.registry.apply(&mut config);
    config.validate()?;

    let report = build_registry(&cmd.common.root, &config)?;
    print_build_report(&report);

    if cmd.strict && !report.issues.is_empty() {
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}

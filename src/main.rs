mod cli;
mod settings;
mod workflow;

use std::sync::Arc;

use anyhow::Result;
use cder::{Cder, CderConfig, ShellWorkspace, logging};
use cli::parse_cli;

fn main() -> Result<()> {
    let cli = parse_cli();
    logging::initialize()?;

    let workspace = Arc::new(ShellWorkspace::new());
    let overrides = settings::load(&cli, workspace.clone())?;
    let cder = Cder::new(CderConfig::new(workspace.clone())).setup(overrides);

    if cli.print_config {
        eprint!("{}", cder.config().summary());
    }

    workflow::run(&cder, &workspace, cli.output)
}

use std::sync::Arc;

use anyhow::{Result, anyhow};
use cder::{Overrides, Workspace};

use super::raw::RawSettings;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load overrides by combining config files, environment variables and CLI
/// arguments, in increasing order of precedence.
pub(crate) fn load(cli: &CliArgs, workspace: Arc<dyn Workspace>) -> Result<Overrides> {
    let builder = build_config(cli)?;
    let mut raw: RawSettings = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    Ok(raw.into_overrides(workspace)?)
}

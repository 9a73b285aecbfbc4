use std::sync::Arc;

use cder::handlers::{BUILTIN_HANDLERS, handler_by_name};
use cder::{Overrides, Trigger, Workspace};
use serde::Deserialize;

use super::errors::SettingsError;
use crate::cli::CliArgs;

/// Mirror of the configuration file before CLI overrides and validation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(super) struct RawSettings {
    pub(super) prompt_title: Option<String>,
    pub(super) dir_command: Option<Vec<String>>,
    #[serde(alias = "command_executer")]
    pub(super) command_executor: Option<Vec<String>>,
    pub(super) previewer_command: Option<String>,
    pub(super) pager_command: Option<String>,
    pub(super) mappings: Vec<RawMapping>,
}

/// `[[mappings]]` table: a trigger (`default` or key notation) and the name of
/// a built-in handler.
///
/// Kept as a list rather than a table keyed by trigger because configuration
/// keys are case-folded, which would merge `a` and `A`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub(super) struct RawMapping {
    pub(super) trigger: String,
    pub(super) handler: String,
}

impl RawSettings {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(title) = &cli.title {
            self.prompt_title = Some(title.clone());
        }
        if let Some(command) = &cli.dir_command {
            self.dir_command = Some(command.split_whitespace().map(str::to_string).collect());
        }
        if let Some(command) = &cli.previewer_command {
            self.previewer_command = Some(command.clone());
        }
        if let Some(command) = &cli.pager_command {
            self.pager_command = Some(command.clone());
        }
    }

    pub(super) fn into_overrides(
        self,
        workspace: Arc<dyn Workspace>,
    ) -> Result<Overrides, SettingsError> {
        let mut overrides = Overrides::default();

        if let Some(title) = self.prompt_title {
            overrides = overrides.with_title(title);
        }
        if let Some(argv) = self.dir_command {
            overrides = overrides.with_dir_command(non_empty("dir_command", argv)?);
        }
        if let Some(argv) = self.command_executor {
            overrides = overrides.with_command_executor(non_empty("command_executor", argv)?);
        }
        if let Some(command) = self.previewer_command {
            overrides = overrides.with_previewer_command(command);
        }
        if let Some(command) = self.pager_command {
            overrides = overrides.with_pager_command(command);
        }

        for RawMapping { trigger, handler } in self.mappings {
            let parsed: Trigger = trigger
                .parse()
                .map_err(|source| SettingsError::InvalidTrigger {
                    trigger: trigger.clone(),
                    source,
                })?;
            let resolved = handler_by_name(&handler, Arc::clone(&workspace)).ok_or_else(|| {
                SettingsError::UnknownHandler {
                    trigger: trigger.clone(),
                    name: handler.clone(),
                    expected: BUILTIN_HANDLERS.join(", "),
                }
            })?;
            overrides = overrides.with_mapping(parsed, resolved);
        }

        Ok(overrides)
    }
}

fn non_empty(key: &'static str, argv: Vec<String>) -> Result<Vec<String>, SettingsError> {
    if argv.iter().all(|word| word.trim().is_empty()) {
        return Err(SettingsError::EmptyCommand { key });
    }
    Ok(argv)
}

#[cfg(test)]
mod tests;

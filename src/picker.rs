//! Assembles the picker from a configuration and hands it to a host.

use std::sync::Arc;

use cder_picker_api::{Finder, HostError, PickerHost, PickerSpec, Previewer, Sorter};
use thiserror::Error;

use crate::actions::attach_mappings;
use crate::command::PreviewCommand;
use crate::config::{CderConfig, Overrides};

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("failed to resolve the prompt title: {0:#}")]
    Title(anyhow::Error),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// The directory picker extension.
///
/// Holds the current defaults. [`setup`](Self::setup) returns a new extension
/// with overrides baked in; [`run`](Self::run) applies overrides for a single
/// launch only.
#[derive(Clone, Debug)]
pub struct Cder {
    config: CderConfig,
}

impl Cder {
    pub fn new(config: CderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CderConfig {
        &self.config
    }

    #[must_use]
    pub fn setup(self, overrides: Overrides) -> Self {
        Self {
            config: self.config.merged(overrides),
        }
    }

    /// Open the picker on `host` with `overrides` layered over the current
    /// defaults, blocking until the host closes it.
    pub fn run<H>(&self, host: &mut H, overrides: Overrides) -> Result<(), PickerError>
    where
        H: PickerHost + ?Sized,
    {
        let config = self.config.merged(overrides);
        launch(&config, host)
    }
}

fn launch<H>(config: &CderConfig, host: &mut H) -> Result<(), PickerError>
where
    H: PickerHost + ?Sized,
{
    let title = config.prompt_title.resolve().map_err(PickerError::Title)?;

    log::debug!("listing directories with {:?}", config.dir_command);
    let lines = host.spawn_process(&config.dir_command)?;
    let finder = Finder::new(lines, Arc::clone(&config.entry_maker));

    let preview = PreviewCommand::from_config(config);
    let previewer = Previewer::command(move |entry| Ok(preview.build(entry)?));

    attach_mappings(host, &config.mappings);

    host.show_list(PickerSpec {
        title,
        finder,
        previewer,
        sorter: Sorter::FuzzyFile,
    })?;
    Ok(())
}

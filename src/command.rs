//! Builds the shell command that pipes a directory listing into a pager.

use std::sync::Arc;

use cder_picker_api::DirEntry;
use thiserror::Error;

use crate::config::CderConfig;
use crate::platform::Platform;

/// Turns an entry value into the shell-ready path argument.
pub type EntryValueFn = dyn Fn(&str) -> String + Send + Sync;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The path holds a character the platform shell still interprets inside
    /// double quotes.
    #[error("path {path:?} contains {ch:?}, which the shell would expand; not previewing it")]
    UnsafePath { path: String, ch: char },

    #[error("command executor is empty")]
    EmptyExecutor,
}

/// Characters that stay live inside a double-quoted shell word.
fn shell_specials(platform: Platform) -> &'static [char] {
    match platform {
        Platform::Unix => &['"', '$', '`'],
        Platform::Windows => &['"', '%'],
    }
}

/// Refuse paths the quoting in [`quote_entry_value`] cannot contain.
///
/// A trailing `\` is refused on Unix as well, since it would escape the
/// closing quote; Windows drops it while quoting.
pub fn check_entry_value(platform: Platform, value: &str) -> Result<(), CommandError> {
    let unsafe_char = value
        .chars()
        .find(|ch| shell_specials(platform).contains(ch))
        .or_else(|| (platform == Platform::Unix && value.ends_with('\\')).then_some('\\'));
    match unsafe_char {
        Some(ch) => Err(CommandError::UnsafePath {
            path: value.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

/// Quote `value` for the platform shell.
///
/// On Windows a single trailing backslash is dropped first, since `\"` would
/// escape the closing quote under `cmd.exe`.
pub fn quote_entry_value(platform: Platform, value: &str) -> String {
    let value = match platform {
        Platform::Windows => value.strip_suffix('\\').unwrap_or(value),
        Platform::Unix => value,
    };
    format!("\"{value}\"")
}

pub fn entry_value_fn(platform: Platform) -> Arc<EntryValueFn> {
    Arc::new(move |value: &str| quote_entry_value(platform, value))
}

/// The subset of [`CderConfig`] needed to build preview commands, cheap to
/// move into a previewer closure.
#[derive(Clone)]
pub struct PreviewCommand {
    platform: Platform,
    executor: Vec<String>,
    previewer_command: String,
    pager_command: String,
    entry_value_fn: Arc<EntryValueFn>,
}

impl PreviewCommand {
    pub fn from_config(config: &CderConfig) -> Self {
        Self {
            platform: config.platform,
            executor: config.command_executor.clone(),
            previewer_command: config.previewer_command.clone(),
            pager_command: config.pager_command.clone(),
            entry_value_fn: Arc::clone(&config.entry_value_fn),
        }
    }

    /// The `preview "<path>" | pager` string handed to the shell.
    pub fn pipeline(&self, entry: &DirEntry) -> Result<String, CommandError> {
        check_entry_value(self.platform, &entry.value)?;

        let path = (self.entry_value_fn)(&entry.value);
        Ok(format!(
            "{} {} | {}",
            self.previewer_command, path, self.pager_command
        ))
    }

    /// Executor argv followed by the pipeline as a single argument.
    pub fn build(&self, entry: &DirEntry) -> Result<Vec<String>, CommandError> {
        if self.executor.is_empty() {
            return Err(CommandError::EmptyExecutor);
        }

        let mut argv = self.executor.clone();
        argv.push(self.pipeline(entry)?);
        Ok(argv)
    }
}

pub fn build_preview_command(
    entry: &DirEntry,
    config: &CderConfig,
) -> Result<Vec<String>, CommandError> {
    PreviewCommand::from_config(config).build(entry)
}

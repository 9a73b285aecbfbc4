use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use cder::{Cder, CwdScope, Overrides, ShellWorkspace};
use cder_tui::TerminalHost;

use crate::cli::{OutputFormat, print_json, print_plain};

/// Run the picker in the terminal and act on the recorded directory change.
pub(crate) fn run(cder: &Cder, workspace: &ShellWorkspace, format: OutputFormat) -> Result<()> {
    let mut host = TerminalHost::new();
    cder.run(&mut host, Overrides::default())?;

    let Some(change) = workspace.take() else {
        log::debug!("picker closed without a directory change");
        return Ok(());
    };

    match (format, change.scope) {
        (OutputFormat::Json, _) => print_json(&change)?,
        (OutputFormat::Plain, CwdScope::Global) => print_plain(&change),
        (OutputFormat::Plain, CwdScope::Window) => enter_subshell(&change.path)?,
    }
    Ok(())
}

fn interactive_shell() -> OsString {
    let (var, fallback) = if cfg!(windows) {
        ("COMSPEC", "cmd.exe")
    } else {
        ("SHELL", "sh")
    };
    env::var_os(var)
        .filter(|shell| !shell.is_empty())
        .unwrap_or_else(|| fallback.into())
}

/// A child process cannot move its parent shell, so a window-scoped change
/// opens a nested shell inside the directory instead.
fn enter_subshell(path: &Path) -> Result<()> {
    let shell = interactive_shell();
    log::info!("opening {} in {}", shell.to_string_lossy(), path.display());
    let status = Command::new(&shell)
        .current_dir(path)
        .status()
        .with_context(|| format!("failed to start {}", shell.to_string_lossy()))?;
    if !status.success() {
        log::warn!("{} exited with {status}", shell.to_string_lossy());
    }
    Ok(())
}

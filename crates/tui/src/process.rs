//! Child process helpers shared by the finder and the previewer.

use std::io::{self, BufRead, BufReader, Lines};
use std::process::{Child, ChildStdout, Command, Stdio};

use cder_picker_api::{HostError, LineStream};

fn command_for(argv: &[String]) -> Result<Command, HostError> {
    let (program, args) = argv.split_first().ok_or(HostError::EmptyCommand)?;
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    Ok(command)
}

/// Output lines of a running child. Dropping the stream kills the child.
struct ChildLines {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl Iterator for ChildLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

impl Drop for ChildLines {
    fn drop(&mut self) {
        // Already exited children report an error here; nothing to do then.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawn `argv` with stdout piped and stderr discarded.
pub(crate) fn spawn_lines(argv: &[String]) -> Result<LineStream, HostError> {
    let mut command = command_for(argv)?;
    command.stdout(Stdio::piped()).stderr(Stdio::null());

    let mut child = command.spawn().map_err(|source| HostError::Spawn {
        program: argv[0].clone(),
        source,
    })?;
    log::debug!("spawned {argv:?} as pid {}", child.id());

    let stdout = child.stdout.take().ok_or_else(|| HostError::Spawn {
        program: argv[0].clone(),
        source: io::Error::other("stdout was not captured"),
    })?;

    Ok(Box::new(ChildLines {
        child,
        lines: BufReader::new(stdout).lines(),
    }))
}

/// Run `argv` to completion and return what it printed.
///
/// Stderr is only used when the command failed without printing anything on
/// stdout, so error messages from the preview pipeline still reach the user.
pub(crate) fn capture(argv: &[String]) -> Result<String, HostError> {
    let output = command_for(argv)?
        .output()
        .map_err(|source| HostError::Spawn {
            program: argv[0].clone(),
            source,
        })?;

    if output.stdout.is_empty() && !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Ok(format!("{} ({})", stderr.trim_end(), output.status));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

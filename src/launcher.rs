//! Fire-and-forget launching of external programs from the dock.

use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::error::{Result, ShellError};

/// Split a shell-style command line into program and arguments.
pub fn parse_command(command: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(command).map_err(|source| ShellError::ParseCommand {
        command: command.to_string(),
        source,
    })?;
    if argv.is_empty() {
        return Err(ShellError::EmptyCommand);
    }
    Ok(argv)
}

/// Spawn `command` detached from the terminal.
///
/// A background thread waits on the child so it never lingers as a zombie.
/// Dropping the returned handle detaches that thread; joining it yields the
/// exit status, or `None` if waiting failed.
pub fn launch(command: &str) -> Result<JoinHandle<Option<ExitStatus>>> {
    let argv = parse_command(command)?;
    let (program, args) = argv.split_first().ok_or(ShellError::EmptyCommand)?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ShellError::Launch {
            command: command.to_string(),
            source,
        })?;
    let pid = child.id();
    tracing::info!(command, pid, "launched external program");
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            tracing::debug!(pid, %status, "external program exited");
            Some(status)
        }
        Err(err) => {
            tracing::warn!(pid, error = %err, "failed to reap external program");
            None
        }
    }))
}

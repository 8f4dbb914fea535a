//! Process launching
//!
//! Takes the argv produced by template expansion and starts it detached
//! from the core. No shell is involved at any point.

use std::process::{Child, Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("empty command")]
    EmptyCommand,
    #[error("failed to start process: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Owned handle to a launched process
pub struct ProcessHandle {
    child: Child,
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Block until the process exits, consuming the handle
    pub fn wait(mut self) -> std::io::Result<ExitStatus> {
        self.child.wait()
    }
}

/// Start an argv with null stdio; element 0 is the program
pub fn launch(argv: &[String]) -> Result<ProcessHandle, LaunchError> {
    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    tracing::debug!("launched pid {}: {}", child.id(), program);
    Ok(ProcessHandle { child })
}

/// Launch and observe termination on a background task.
///
/// The handle moves into the waiter; `on_exit` fires exactly once when the
/// process terminates and the handle is released there. The caller gets the
/// pid back and never blocks on completion. Must be called within a tokio
/// runtime.
pub fn launch_observed(
    argv: &[String],
    on_exit: impl FnOnce(std::io::Result<ExitStatus>) + Send + 'static,
) -> Result<u32, LaunchError> {
    let mut handle = launch(argv)?;
    let pid = handle.pid();
    tokio::task::spawn_blocking(move || on_exit(handle.child.wait()));
    Ok(pid)
}

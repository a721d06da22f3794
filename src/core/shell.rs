/*
 * The command runner port: fire-and-forget "open this path in the system file
 * manager". The caller never learns whether the opener ran; spawn failures
 * are logged and dropped here.
 */
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

pub trait CommandRunnerOperations: Send + Sync {
    fn open_in_file_manager(&self, path: &Path);
}

pub struct CoreCommandRunner {}

impl CoreCommandRunner {
    pub fn new() -> Self {
        CoreCommandRunner {}
    }
}

impl Default for CoreCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "macos")]
const OPENER: &str = "open";

#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/*
 * Spawns `program path` with null stdio and waits for it on a detached thread,
 * so the child is reaped without blocking the caller.
 */
fn spawn_detached(program: &str, path: &Path) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(program)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let program = program.to_string();
    Ok(thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(status) => log::debug!("CoreCommandRunner: '{program}' exited with {status}"),
            Err(e) => log::warn!("CoreCommandRunner: Could not wait for '{program}': {e}"),
        }
        status
    }))
}

impl CommandRunnerOperations for CoreCommandRunner {
    fn open_in_file_manager(&self, path: &Path) {
        log::debug!("CoreCommandRunner: Running '{OPENER}' on {path:?}");
        if let Err(e) = spawn_detached(OPENER, path) {
            log::warn!("CoreCommandRunner: Failed to run '{OPENER}': {e}");
        }
    }
}

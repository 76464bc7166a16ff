//! Opens the backup directory in the desktop file manager

use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::{SaveKeeperError, SaveKeeperResult};

#[cfg(windows)]
const FILE_MANAGER: &str = "explorer";

#[cfg(target_os = "macos")]
const FILE_MANAGER: &str = "open";

#[cfg(not(any(windows, target_os = "macos")))]
const FILE_MANAGER: &str = "xdg-open";

/// Spawn the file manager on `dir` without waiting for it
pub fn open_directory(dir: &Path) -> SaveKeeperResult<()> {
    launch(FILE_MANAGER, dir).map(|_| ())
}

/// Start `program` on `dir` and reap it on a background thread
///
/// Repeated opens from the shell leave no zombie processes behind.
fn launch(program: &str, dir: &Path) -> SaveKeeperResult<JoinHandle<()>> {
    debug!(command = program, dir = %dir.display(), "opening file manager");

    let mut child = Command::new(program)
        .arg(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            SaveKeeperError::Io(format!(
                "Failed to open {} with {}: {}",
                dir.display(),
                program,
                e
            ))
        })?;

    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => debug!(%status, "file manager exited"),
        Err(e) => warn!(error = %e, "failed to wait for file manager"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_launched_process_is_reaped() {
        let temp_dir = TempDir::new().unwrap();
        let reaper = launch("true", temp_dir.path()).unwrap();
        reaper.join().unwrap();
    }

    #[test]
    fn test_missing_program_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let err = launch("savekeeper-no-such-file-manager", temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("savekeeper-no-such-file-manager"));
    }
}

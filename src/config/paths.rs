//! Path management for SaveKeeper
//!
//! Resolves where the configuration file lives and guesses sensible
//! first-run locations for the save file and the backup directory.
//!
//! ## Path Resolution Order
//!
//! 1. `SAVEKEEPER_CONFIG_DIR` environment variable (if set)
//! 2. The directory containing the running executable

use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};

use crate::error::SaveKeeperError;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "SAVEKEEPER_CONFIG_DIR";

/// Manages the paths used by SaveKeeper
#[derive(Debug, Clone)]
pub struct SaveKeeperPaths {
    /// Directory holding the default config.json
    config_dir: PathBuf,
}

impl SaveKeeperPaths {
    /// Create a new SaveKeeperPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the executable location cannot be determined.
    pub fn new() -> Result<Self, SaveKeeperError> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => executable_dir()?,
        };

        Ok(Self { config_dir })
    }

    /// Create SaveKeeperPaths with a custom config directory (useful for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the path to the default settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }
}

fn executable_dir() -> Result<PathBuf, SaveKeeperError> {
    let exe = std::env::current_exe()
        .map_err(|e| SaveKeeperError::Io(format!("Failed to get executable path: {}", e)))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| SaveKeeperError::Io("Executable has no parent directory".into()))
}

/// Home directory guess, falling back to the current directory
fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// First-run guess for the live save file
///
/// - Windows: `%LOCALAPPDATA%\GameName\save.sav`
/// - macOS: `~/Library/Application Support/GameName/save.sav`
/// - Linux: `~/.local/share/GameName/save.sav`
pub fn default_save_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(home_dir);
    base.join("GameName").join("save.sav")
}

/// First-run guess for the backup directory: `<Documents>/GameSaveBackups`
pub fn default_backup_dir() -> PathBuf {
    let base = UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        .unwrap_or_else(home_dir);
    base.join("GameSaveBackups")
}

//! Backup manager for SaveKeeper
//!
//! Handles creating, listing and deleting `.sav` backups. The backup
//! directory is the only source of truth: every call rescans it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use super::time::{PlatformTimeProvider, TimeProvider};
use crate::config::settings::Settings;
use crate::error::{SaveKeeperError, SaveKeeperResult};
use crate::storage::file_io;

/// Extension every backup file carries
pub const BACKUP_EXTENSION: &str = "sav";

/// Prefix for backups created without a name
pub const MANUAL_PREFIX: &str = "Backup";

/// Prefix for backups taken automatically before a restore
pub const AUTO_PREFIX: &str = "AutoBackup";

/// Format of the timestamp embedded in generated names
pub const NAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A backup file found in the backup directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    /// File stem (filename without `.sav`)
    pub name: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Best-effort creation time
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

impl Backup {
    /// Whether this backup was taken automatically before a restore
    pub fn is_auto(&self) -> bool {
        self.name.starts_with(AUTO_PREFIX)
    }
}

/// A backup that could not be removed
#[derive(Debug, Clone)]
pub struct DeleteFailure {
    pub backup: Backup,
    pub reason: String,
}

/// Result of a batch delete
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    /// Number of backups the caller asked to delete
    pub selected: usize,
    /// Backups that were removed
    pub deleted: Vec<Backup>,
    /// Backups that could not be removed
    pub failures: Vec<DeleteFailure>,
}

impl DeleteReport {
    /// Number of successful deletions
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    /// Nothing was selected, so nothing was attempted
    pub fn nothing_selected(&self) -> bool {
        self.selected == 0
    }

    /// Something was selected and every removal failed
    pub fn all_failed(&self) -> bool {
        self.selected > 0 && self.deleted.is_empty()
    }
}

/// Manages backup creation, enumeration and deletion
pub struct BackupManager<T = PlatformTimeProvider> {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Live save file
    save_path: PathBuf,
    /// Where creation timestamps come from
    time: T,
}

impl BackupManager<PlatformTimeProvider> {
    /// Create a new BackupManager for the given settings
    pub fn new(settings: &Settings) -> Self {
        Self::with_time_provider(settings, PlatformTimeProvider::default())
    }
}

impl<T: TimeProvider> BackupManager<T> {
    /// Create a BackupManager with a specific timestamp source
    pub fn with_time_provider(settings: &Settings, time: T) -> Self {
        Self {
            backup_dir: settings.backup_dir.clone(),
            save_path: settings.save_path.clone(),
            time,
        }
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get the live save file path
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// List all available backups, newest first
    ///
    /// Files whose timestamp cannot be read are left out rather than failing
    /// the whole listing. Backups with identical timestamps keep directory
    /// order.
    pub fn list_backups(&self) -> SaveKeeperResult<Vec<Backup>> {
        let entries =
            fs::read_dir(&self.backup_dir).map_err(|e| SaveKeeperError::BackupDirUnavailable {
                path: self.backup_dir.clone(),
                reason: e.to_string(),
            })?;

        let mut backups = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
                continue;
            }

            let path = entry.path();
            if let Some(backup) = self.read_backup(&path) {
                backups.push(backup);
            }
        }

        // Sort by date, newest first
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Build a Backup from a file, if it is one
    fn read_backup(&self, path: &Path) -> Option<Backup> {
        let filename = path.file_name()?.to_str()?;
        let name = filename.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;

        let created_at = match self.time.creation_time(path) {
            Ok(ts) => ts,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "excluding backup without timestamp");
                return None;
            }
        };

        let size_bytes = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Some(Backup {
            name: name.to_string(),
            path: path.to_path_buf(),
            created_at,
            size_bytes,
        })
    }

    /// Create a backup of the save file
    ///
    /// An empty `requested_name` becomes `Backup_<timestamp>`. If the name is
    /// taken, `_1`, `_2`, ... is appended until a free name is found.
    pub fn create_backup(&self, requested_name: &str) -> SaveKeeperResult<Backup> {
        let requested_name = requested_name.trim();
        if requested_name.is_empty() {
            self.create_named(&generated_name(MANUAL_PREFIX, Local::now()))
        } else {
            validate_name(requested_name)?;
            self.create_named(requested_name)
        }
    }

    /// Create an `AutoBackup_<timestamp>` copy of the save file
    pub fn create_auto_backup(&self) -> SaveKeeperResult<Backup> {
        self.create_named(&generated_name(AUTO_PREFIX, Local::now()))
    }

    fn create_named(&self, base_name: &str) -> SaveKeeperResult<Backup> {
        match fs::metadata(&self.save_path) {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(SaveKeeperError::SaveFileNotFound(self.save_path.clone())),
        }

        let (name, backup_path) = self.resolve_name(base_name);

        let size_bytes =
            file_io::copy_to_new(&self.save_path, &backup_path).map_err(|e| {
                SaveKeeperError::Copy {
                    from: self.save_path.clone(),
                    to: backup_path.clone(),
                    reason: e.to_string(),
                }
            })?;

        // The filesystem assigns the creation time, so read it back
        let created_at = self
            .time
            .creation_time(&backup_path)
            .unwrap_or_else(|_| Utc::now());

        info!(name = %name, path = %backup_path.display(), "backup created");

        Ok(Backup {
            name,
            path: backup_path,
            created_at,
            size_bytes,
        })
    }

    /// Find the first unused name for `base_name`
    ///
    /// Tries the name itself, then `base_name_1`, `base_name_2`, ...
    pub fn resolve_name(&self, base_name: &str) -> (String, PathBuf) {
        let mut name = base_name.to_string();
        let mut path = self.path_for(&name);
        let mut counter = 1u32;

        while path.exists() {
            debug!(taken = %name, "backup name already in use");
            name = format!("{}_{}", base_name, counter);
            path = self.path_for(&name);
            counter += 1;
        }

        (name, path)
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.backup_dir.join(format!("{}.{}", name, BACKUP_EXTENSION))
    }

    /// Delete the selected backups
    ///
    /// Every selection is attempted; failures are collected instead of
    /// stopping the batch.
    pub fn delete_backups(&self, selection: &[Backup]) -> DeleteReport {
        let mut report = DeleteReport {
            selected: selection.len(),
            ..DeleteReport::default()
        };

        for backup in selection {
            match fs::remove_file(&backup.path) {
                Ok(()) => {
                    info!(name = %backup.name, "backup deleted");
                    report.deleted.push(backup.clone());
                }
                Err(e) => {
                    warn!(name = %backup.name, error = %e, "failed to delete backup");
                    report.failures.push(DeleteFailure {
                        backup: backup.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Resolve a backup by its name, its filename, or `latest`
    ///
    /// A backup actually named `latest` wins over the keyword.
    pub fn find_backup(&self, identifier: &str) -> SaveKeeperResult<Backup> {
        let identifier = identifier.trim();
        let name = identifier
            .strip_suffix(&format!(".{}", BACKUP_EXTENSION))
            .unwrap_or(identifier);

        let backups = self.list_backups()?;
        if let Some(found) = backups.iter().find(|b| b.name == name) {
            return Ok(found.clone());
        }

        if identifier.eq_ignore_ascii_case("latest") {
            return backups
                .into_iter()
                .next()
                .ok_or_else(|| SaveKeeperError::backup_not_found("latest"));
        }

        Err(SaveKeeperError::backup_not_found(identifier))
    }
}

/// `<prefix>_<YYYY-MM-DD_HH-MM-SS>`
pub fn generated_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{}_{}", prefix, at.format(NAME_TIMESTAMP_FORMAT))
}

/// User-supplied names must stay inside the backup directory
fn validate_name(name: &str) -> SaveKeeperResult<()> {
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SaveKeeperError::Validation(format!(
            "Invalid backup name '{}': names cannot contain path separators",
            name
        )));
    }
    Ok(())
}

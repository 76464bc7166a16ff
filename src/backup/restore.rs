//! Backup restoration for SaveKeeper
//!
//! Restoring is destructive, so it only runs once the caller has obtained a
//! confirmation. When auto-backup is enabled the current save is copied into
//! the backup directory first; failing to do so is reported but does not stop
//! the restore.

use std::fs;

use tracing::{info, warn};

use super::manager::{Backup, BackupManager};
use super::time::{PlatformTimeProvider, TimeProvider};
use crate::config::settings::Settings;
use crate::error::{SaveKeeperError, SaveKeeperResult};
use crate::storage::file_io;

/// The user's answer to "overwrite the current save?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Declined
        }
    }
}

/// What happened to the safety copy taken before a restore
#[derive(Debug, Clone)]
pub enum AutoBackupOutcome {
    /// Auto-backup is turned off
    Disabled,
    /// There was no save file to protect
    NoSaveFile,
    /// The current save was copied to this backup
    Created(Backup),
    /// The copy failed; the restore went ahead without it
    Failed(String),
}

/// Result of a restore request
#[derive(Debug, Clone)]
pub enum RestoreOutcome {
    /// Confirmation was declined; nothing was touched
    Cancelled,
    /// The save file now holds the backup's contents
    Restored {
        backup: Backup,
        auto_backup: AutoBackupOutcome,
    },
}

impl RestoreOutcome {
    /// Check if the save file was overwritten
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }

    /// Get a summary of what happened
    pub fn summary(&self) -> String {
        match self {
            Self::Cancelled => "Restore cancelled.".to_string(),
            Self::Restored {
                backup,
                auto_backup,
            } => {
                let safety = match auto_backup {
                    AutoBackupOutcome::Disabled => String::new(),
                    AutoBackupOutcome::NoSaveFile => {
                        " (no current save to auto-backup)".to_string()
                    }
                    AutoBackupOutcome::Created(auto) => {
                        format!(" (previous save kept as {})", auto.name)
                    }
                    AutoBackupOutcome::Failed(reason) => {
                        format!(" (auto-backup FAILED: {})", reason)
                    }
                };
                format!("Restored {}{}", backup.name, safety)
            }
        }
    }
}

/// Handles restoring from backups
pub struct RestoreManager<T = PlatformTimeProvider> {
    backups: BackupManager<T>,
    auto_backup: bool,
}

impl RestoreManager<PlatformTimeProvider> {
    /// Create a new RestoreManager
    pub fn new(settings: &Settings) -> Self {
        Self::with_time_provider(settings, PlatformTimeProvider::default())
    }
}

impl<T: TimeProvider> RestoreManager<T> {
    /// Create a RestoreManager with a specific timestamp source
    pub fn with_time_provider(settings: &Settings, time: T) -> Self {
        Self {
            backups: BackupManager::with_time_provider(settings, time),
            auto_backup: settings.auto_backup,
        }
    }

    /// Restore `backup` over the save file
    ///
    /// Nothing is written unless `confirmation` is `Granted`. The new
    /// contents are written to a temporary file next to the save file and
    /// renamed into place, so a failed write leaves the old save intact.
    pub fn restore(
        &self,
        backup: &Backup,
        confirmation: Confirmation,
    ) -> SaveKeeperResult<RestoreOutcome> {
        if confirmation == Confirmation::Declined {
            info!(name = %backup.name, "restore declined");
            return Ok(RestoreOutcome::Cancelled);
        }

        let auto_backup = self.take_auto_backup();

        let save_path = self.backups.save_path();
        let restore_err = |e: std::io::Error| SaveKeeperError::RestoreWrite {
            backup: backup.path.clone(),
            save: save_path.to_path_buf(),
            reason: e.to_string(),
        };

        let data = fs::read(&backup.path).map_err(restore_err)?;
        file_io::write_atomic(save_path, &data).map_err(restore_err)?;

        info!(name = %backup.name, save = %save_path.display(), "backup restored");

        Ok(RestoreOutcome::Restored {
            backup: backup.clone(),
            auto_backup,
        })
    }

    fn take_auto_backup(&self) -> AutoBackupOutcome {
        if !self.auto_backup {
            return AutoBackupOutcome::Disabled;
        }

        if !self.backups.save_path().exists() {
            return AutoBackupOutcome::NoSaveFile;
        }

        match self.backups.create_auto_backup() {
            Ok(auto) => AutoBackupOutcome::Created(auto),
            Err(e) => {
                warn!(error = %e, "auto-backup failed, continuing with restore");
                AutoBackupOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_env(auto_backup: bool) -> (Settings, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backup_dir = temp_dir.path().join("backups");
        fs::create_dir_all(&backup_dir).unwrap();

        let settings = Settings {
            save_path: temp_dir.path().join("save.dat"),
            backup_dir,
            auto_backup,
            config_file_path: PathBuf::new(),
        };
        fs::write(&settings.save_path, b"original progress").unwrap();

        (settings, temp_dir)
    }

    #[test]
    fn test_restore_round_trip_is_byte_identical() {
        let (settings, _temp) = create_test_env(false);
        let backup = BackupManager::new(&settings).create_backup("snap").unwrap();

        fs::write(&settings.save_path, b"progress lost to a bad decision").unwrap();

        let outcome = RestoreManager::new(&settings)
            .restore(&backup, Confirmation::Granted)
            .unwrap();

        assert!(outcome.is_restored());
        assert_eq!(fs::read(&settings.save_path).unwrap(), b"original progress");
    }

    #[cfg(unix)]
    #[test]
    fn test_restore_through_symlinked_save() {
        let (mut settings, temp) = create_test_env(false);
        let real_save = temp.path().join("real_save.dat");
        fs::write(&real_save, b"old-progress").unwrap();
        fs::remove_file(&settings.save_path).unwrap();
        let link = temp.path().join("linked_save.dat");
        std::os::unix::fs::symlink(&real_save, &link).unwrap();
        settings.save_path = link;

        let backup = BackupManager::new(&settings).create_backup("snap").unwrap();
        fs::write(&real_save, b"new-progress").unwrap();

        RestoreManager::new(&settings)
            .restore(&backup, Confirmation::Granted)
            .unwrap();

        let link_meta = fs::symlink_metadata(&settings.save_path).unwrap();
        assert!(link_meta.file_type().is_symlink());
        assert_eq!(fs::read(&real_save).unwrap(), b"old-progress");
    }

    #[test]
    fn test_declined_restore_touches_nothing() {
        let (settings, _temp) = create_test_env(true);
        let backups = BackupManager::new(&settings);
        let backup = backups.create_backup("snap").unwrap();
        fs::write(&settings.save_path, b"current").unwrap();

        let outcome = RestoreManager::new(&settings)
            .restore(&backup, Confirmation::from(false))
            .unwrap();

        assert!(!outcome.is_restored());
        assert_eq!(fs::read(&settings.save_path).unwrap(), b"current");
        assert_eq!(backups.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn test_auto_backup_preserves_current_save() {
        let (settings, _temp) = create_test_env(true);
        let backups = BackupManager::new(&settings);
        let backup = backups.create_backup("X").unwrap();
        fs::write(&settings.save_path, b"current progress").unwrap();

        let outcome = RestoreManager::new(&settings)
            .restore(&backup, Confirmation::Granted)
            .unwrap();

        let auto = match outcome {
            RestoreOutcome::Restored {
                auto_backup: AutoBackupOutcome::Created(auto),
                ..
            } => auto,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert!(auto.name.starts_with("AutoBackup_"));
        assert_eq!(fs::read(&auto.path).unwrap(), b"current progress");
        assert_eq!(fs::read(&settings.save_path).unwrap(), b"original progress");

        let listed = backups.list_backups().unwrap();
        assert!(listed.iter().any(|b| b.is_auto()));
    }

    #[test]
    fn test_auto_backup_skipped_without_save_file() {
        let (settings, _temp) = create_test_env(true);
        let backup = BackupManager::new(&settings).create_backup("X").unwrap();
        fs::remove_file(&settings.save_path).unwrap();

        let outcome = RestoreManager::new(&settings)
            .restore(&backup, Confirmation::Granted)
            .unwrap();

        assert!(matches!(
            outcome,
            RestoreOutcome::Restored {
                auto_backup: AutoBackupOutcome::NoSaveFile,
                ..
            }
        ));
        assert_eq!(fs::read(&settings.save_path).unwrap(), b"original progress");
    }

    #[test]
    fn test_auto_backup_failure_does_not_block_restore() {
        let (mut settings, temp) = create_test_env(true);

        // Keep the chosen backup outside the (now unusable) backup directory
        let external = temp.path().join("external.sav");
        fs::write(&external, b"from elsewhere").unwrap();
        let backup = Backup {
            name: "external".into(),
            path: external,
            created_at: chrono::Utc::now(),
            size_bytes: 14,
        };

        settings.backup_dir = temp.path().join("missing-dir");

        let outcome = RestoreManager::new(&settings)
            .restore(&backup, Confirmation::Granted)
            .unwrap();

        match &outcome {
            RestoreOutcome::Restored {
                auto_backup: AutoBackupOutcome::Failed(_),
                ..
            } => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(outcome.summary().contains("FAILED"));
        assert_eq!(fs::read(&settings.save_path).unwrap(), b"from elsewhere");
    }

    #[test]
    fn test_unreadable_backup_is_restore_error() {
        let (settings, _temp) = create_test_env(false);
        let backup = BackupManager::new(&settings).create_backup("X").unwrap();
        fs::remove_file(&backup.path).unwrap();

        let err = RestoreManager::new(&settings)
            .restore(&backup, Confirmation::Granted)
            .unwrap_err();

        assert!(matches!(err, SaveKeeperError::RestoreWrite { .. }));
        assert_eq!(fs::read(&settings.save_path).unwrap(), b"original progress");
    }

    #[test]
    fn test_restore_summary() {
        let (settings, _temp) = create_test_env(false);
        let backup = BackupManager::new(&settings).create_backup("snap").unwrap();

        let outcome = RestoreManager::new(&settings)
            .restore(&backup, Confirmation::Granted)
            .unwrap();
        assert_eq!(outcome.summary(), "Restored snap");
        assert_eq!(RestoreOutcome::Cancelled.summary(), "Restore cancelled.");
    }
}

//! Backup system for SaveKeeper
//!
//! Copies the live save file into a directory of `.sav` backups and restores
//! them on request.
//!
//! # Architecture
//!
//! The backup system consists of three components:
//!
//! - `BackupManager`: Creates, lists, resolves and deletes backups
//! - `RestoreManager`: Runs the confirmed restore with optional auto-backup
//! - `TimeProvider`: Supplies best-effort creation timestamps per platform
//!
//! # Backup Format
//!
//! A backup is a byte-for-byte copy of the save file named `<name>.sav`,
//! where `<name>` is user-supplied, `Backup_<YYYY-MM-DD_HH-MM-SS>` or
//! `AutoBackup_<YYYY-MM-DD_HH-MM-SS>`, with a `_<N>` suffix when the name is
//! already taken. No metadata is stored alongside; the directory is rescanned
//! on every call.
//!
//! # Example
//!
//! ```rust,ignore
//! use savekeeper::backup::{BackupManager, Confirmation, RestoreManager};
//!
//! let backup = BackupManager::new(&settings).create_backup("")?;
//!
//! // Later, restore from backup
//! let outcome = RestoreManager::new(&settings).restore(&backup, Confirmation::Granted)?;
//! println!("{}", outcome.summary());
//! ```

mod manager;
mod restore;
pub mod time;

pub use manager::{
    generated_name, Backup, BackupManager, DeleteFailure, DeleteReport, AUTO_PREFIX,
    BACKUP_EXTENSION, MANUAL_PREFIX,
};
pub use restore::{AutoBackupOutcome, Confirmation, RestoreManager, RestoreOutcome};
pub use time::{ModificationTime, NativeCreationTime, PlatformTimeProvider, TimeProvider};

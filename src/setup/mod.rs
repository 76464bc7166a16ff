//! First-run setup wizard
//!
//! Asks a first-time user where the game keeps its save file and where
//! backups should go, validating both before anything is written.

pub mod validate;
pub mod wizard;

pub use validate::{is_exit, prepare_backup_dir, validate_save_path, BackupDirCheck};
pub use wizard::SetupWizard;

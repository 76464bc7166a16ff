//! Validation rules for the paths entered during setup
//!
//! Each rule returns a `Validation` error whose message is shown to the user
//! as-is before asking again.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{SaveKeeperError, SaveKeeperResult};

/// Scratch file used to check that the backup directory is writable
const WRITE_TEST_FILE: &str = ".savekeeper_write_test";

/// Outcome of preparing the backup directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupDirCheck {
    pub path: PathBuf,
    /// The directory did not exist and was created
    pub created: bool,
    /// Entries already present before SaveKeeper used it
    pub existing_entries: usize,
}

/// Whether the user asked to leave setup
pub fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("exit")
}

/// Check that `input` names an existing, readable save file
pub fn validate_save_path(input: &str) -> SaveKeeperResult<PathBuf> {
    let path = require_absolute(input)?;

    let meta = fs::metadata(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => invalid(format!(
            "File not found: {}. Please check the path and make sure the file exists.",
            path.display()
        )),
        _ => invalid(format!("Cannot access {}: {}", path.display(), e)),
    })?;

    if meta.is_dir() {
        return Err(invalid(format!(
            "Path points to a directory, not a file: {}",
            path.display()
        )));
    }

    File::open(&path).map_err(|_| {
        invalid(format!(
            "Cannot read file (permission denied): {}",
            path.display()
        ))
    })?;

    Ok(path)
}

/// Make sure `input` is a writable directory, creating it if needed
pub fn prepare_backup_dir(input: &str) -> SaveKeeperResult<BackupDirCheck> {
    let path = require_absolute(input)?;

    let created = !path.exists();
    if created {
        fs::create_dir_all(&path).map_err(|e| SaveKeeperError::DirectoryCreate {
            path: path.clone(),
            reason: e.to_string(),
        })?;
    }

    if !path.is_dir() {
        return Err(invalid(format!(
            "Path points to a file, not a directory: {}",
            path.display()
        )));
    }

    check_writable(&path)?;

    let existing_entries = fs::read_dir(&path).map(|dir| dir.count()).unwrap_or(0);

    Ok(BackupDirCheck {
        path,
        created,
        existing_entries,
    })
}

fn check_writable(dir: &Path) -> SaveKeeperResult<()> {
    let probe = dir.join(WRITE_TEST_FILE);
    File::create(&probe).map_err(|_| {
        invalid(format!(
            "Cannot write to directory (permission denied): {}",
            dir.display()
        ))
    })?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

fn require_absolute(input: &str) -> SaveKeeperResult<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("Path cannot be empty.".into()));
    }

    let path = PathBuf::from(trimmed);
    if !path.is_absolute() {
        return Err(invalid(
            "Please provide an absolute path (full path starting from root).".into(),
        ));
    }
    Ok(path)
}

fn invalid(message: String) -> SaveKeeperError {
    SaveKeeperError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn input(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_is_exit() {
        assert!(is_exit("exit"));
        assert!(is_exit("  EXIT "));
        assert!(!is_exit("exits"));
        assert!(!is_exit(""));
    }

    #[test]
    fn test_save_path_accepts_existing_file() {
        let temp = TempDir::new().unwrap();
        let save = temp.path().join("save.dat");
        fs::write(&save, b"progress").unwrap();

        let padded = format!("  {}  ", input(&save));
        assert_eq!(validate_save_path(&padded).unwrap(), save);
    }

    #[test]
    fn test_save_path_rejects_empty_and_relative() {
        let err = validate_save_path("   ").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));

        let err = validate_save_path("saves/save.dat").unwrap_err();
        assert!(err.to_string().contains("absolute path"));
    }

    #[test]
    fn test_save_path_rejects_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.dat");

        let err = validate_save_path(&input(&missing)).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_save_path_rejects_directory() {
        let temp = TempDir::new().unwrap();

        let err = validate_save_path(&input(temp.path())).unwrap_err();
        assert!(err.to_string().contains("directory, not a file"));
    }

    #[test]
    fn test_backup_dir_is_created() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("backups");

        let check = prepare_backup_dir(&input(&dir)).unwrap();
        assert!(check.created);
        assert_eq!(check.existing_entries, 0);
        assert!(dir.is_dir());
        assert!(!dir.join(WRITE_TEST_FILE).exists());
    }

    #[test]
    fn test_backup_dir_counts_existing_entries() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("old.sav"), b"x").unwrap();

        let check = prepare_backup_dir(&input(temp.path())).unwrap();
        assert!(!check.created);
        assert_eq!(check.existing_entries, 1);
    }

    #[test]
    fn test_backup_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, b"x").unwrap();

        let err = prepare_backup_dir(&input(&file)).unwrap_err();
        assert!(err.to_string().contains("file, not a directory"));
    }

    #[test]
    fn test_backup_dir_rejects_relative() {
        let err = prepare_backup_dir("backups").unwrap_err();
        assert!(err.to_string().contains("absolute path"));
    }

    #[test]
    fn test_backup_dir_under_a_file_cannot_be_created() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = prepare_backup_dir(&input(&blocker.join("backups"))).unwrap_err();
        assert!(matches!(err, SaveKeeperError::DirectoryCreate { .. }));
    }
}

//! Custom error types for SaveKeeper
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for SaveKeeper operations
#[derive(Error, Debug)]
pub enum SaveKeeperError {
    /// The configuration file exists but could not be parsed
    #[error("Configuration file {path} is corrupted: {reason}")]
    ConfigCorrupt { path: PathBuf, reason: String },

    /// The configuration file could not be written
    #[error("Failed to write configuration to {path}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    /// A required directory could not be created
    #[error("Cannot create directory {path}: {reason}")]
    DirectoryCreate { path: PathBuf, reason: String },

    /// The configured save file does not exist or is not a regular file
    #[error("Save file not found at: {0}")]
    SaveFileNotFound(PathBuf),

    /// The backup directory itself could not be read
    #[error("Failed to read backup directory {path}: {reason}")]
    BackupDirUnavailable { path: PathBuf, reason: String },

    /// Copying the save file into a backup failed
    #[error("Failed to copy {from} to {to}: {reason}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// Writing a backup over the save file failed
    #[error("Failed to restore {backup} over {save}: {reason}")]
    RestoreWrite {
        backup: PathBuf,
        save: PathBuf,
        reason: String,
    },

    /// A file could not be stat'ed
    #[error("Cannot access {path}: {reason}")]
    FileAccess { path: PathBuf, reason: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The user left the first-run setup before finishing it
    #[error("Setup cancelled by user")]
    SetupCancelled,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl SaveKeeperError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::SaveFileNotFound(_))
    }
}

impl From<std::io::Error> for SaveKeeperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SaveKeeperError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SaveKeeper operations
pub type SaveKeeperResult<T> = Result<T, SaveKeeperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SaveKeeperError::SaveFileNotFound(PathBuf::from("/games/save.dat"));
        assert_eq!(err.to_string(), "Save file not found at: /games/save.dat");
    }

    #[test]
    fn test_not_found_error() {
        let err = SaveKeeperError::backup_not_found("Backup_2024");
        assert_eq!(err.to_string(), "Backup not found: Backup_2024");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SaveKeeperError = io_err.into();
        assert!(matches!(err, SaveKeeperError::Io(_)));
    }
}

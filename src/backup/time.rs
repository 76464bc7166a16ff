//! Best-effort file creation timestamps
//!
//! Not every platform records when a file was created. Where it is missing
//! the modification time is reported instead, so a timestamp is always
//! "creation time if the platform knows it".

use std::fs::{self, Metadata};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{SaveKeeperError, SaveKeeperResult};

/// Source of the timestamp shown for a backup
pub trait TimeProvider {
    /// Best available creation time of `path`
    ///
    /// Fails with `FileAccess` when the path cannot be stat'ed.
    fn creation_time(&self, path: &Path) -> SaveKeeperResult<DateTime<Utc>>;
}

/// Uses native creation metadata, falling back to modification time
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCreationTime;

impl TimeProvider for NativeCreationTime {
    fn creation_time(&self, path: &Path) -> SaveKeeperResult<DateTime<Utc>> {
        let meta = stat(path)?;
        match meta.created() {
            Ok(created) => Ok(DateTime::<Utc>::from(created)),
            Err(_) => modified(path, &meta),
        }
    }
}

/// Always reports modification time
#[derive(Debug, Clone, Copy, Default)]
pub struct ModificationTime;

impl TimeProvider for ModificationTime {
    fn creation_time(&self, path: &Path) -> SaveKeeperResult<DateTime<Utc>> {
        let meta = stat(path)?;
        modified(path, &meta)
    }
}

/// Provider used on this platform
#[cfg(any(windows, target_os = "macos"))]
pub type PlatformTimeProvider = NativeCreationTime;

/// Provider used on this platform
#[cfg(not(any(windows, target_os = "macos")))]
pub type PlatformTimeProvider = ModificationTime;

fn stat(path: &Path) -> SaveKeeperResult<Metadata> {
    fs::metadata(path).map_err(|e| SaveKeeperError::FileAccess {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn modified(path: &Path, meta: &Metadata) -> SaveKeeperResult<DateTime<Utc>> {
    meta.modified()
        .map(DateTime::<Utc>::from)
        .map_err(|e| SaveKeeperError::FileAccess {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

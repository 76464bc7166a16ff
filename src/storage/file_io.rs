//! File I/O utilities for whole-file copies
//!
//! Provides the byte-level primitives the backup system is built on. Every
//! copy is one whole-buffer read followed by one whole-buffer write, and file
//! handles are dropped before these functions return.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Copy `src` to `dst`, refusing to touch an existing `dst`
///
/// If the write fails after `dst` was created, the partial file is removed
/// so it can never be mistaken for a complete copy.
pub fn copy_to_new(src: &Path, dst: &Path) -> io::Result<u64> {
    let data = fs::read(src)?;

    let mut file = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let written = file.write_all(&data).and_then(|_| file.sync_all());
    drop(file);

    if let Err(e) = written {
        let _ = fs::remove_file(dst);
        return Err(e);
    }

    Ok(data.len() as u64)
}

/// Replace `dst` with `data` atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified
/// at all. An existing `dst` is resolved through symlinks first, so the file
/// it points at is replaced and the link itself survives. The replaced file
/// keeps its permissions.
pub fn write_atomic(dst: &Path, data: &[u8]) -> io::Result<()> {
    let existing = match fs::canonicalize(dst) {
        Ok(resolved) => Some(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };
    let target = existing.as_deref().unwrap_or(dst);
    let permissions = match existing {
        Some(ref resolved) => Some(fs::metadata(resolved)?.permissions()),
        None => None,
    };

    let temp_path = temp_path_for(target);

    let result: io::Result<()> = (|| {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        // Sync to disk before rename
        file.sync_all()?;
        drop(file);
        if let Some(permissions) = permissions {
            fs::set_permissions(&temp_path, permissions)?;
        }
        Ok(())
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, target).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        e
    })
}

/// Temporary sibling used by `write_atomic`
///
/// Lives in the same directory as the target so the rename stays on one
/// filesystem.
fn temp_path_for(dst: &Path) -> PathBuf {
    let name = dst
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "savefile".to_string());
    dst.with_file_name(format!(".{}.savekeeper.tmp", name))
}

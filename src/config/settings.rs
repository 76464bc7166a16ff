//! User settings for SaveKeeper
//!
//! Manages the persisted settings record (save file, backup directory,
//! auto-backup flag and optional config redirect) and the store that loads,
//! creates and persists it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::paths::{self, SaveKeeperPaths};
use crate::error::{SaveKeeperError, SaveKeeperResult};

/// User settings for SaveKeeper
///
/// Field names match the on-disk JSON keys exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Live save file that backups are taken from and restored over
    pub save_path: PathBuf,

    /// Directory holding `.sav` backups
    pub backup_dir: PathBuf,

    /// Take an `AutoBackup_*` copy of the current save before each restore
    #[serde(default)]
    pub auto_backup: bool,

    /// Custom config location; empty means the default location
    #[serde(default, skip_serializing_if = "path_is_empty")]
    pub config_file_path: PathBuf,
}

fn path_is_empty(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: paths::default_save_path(),
            backup_dir: paths::default_backup_dir(),
            auto_backup: true,
            config_file_path: PathBuf::new(),
        }
    }
}

/// State of the configured save file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFileStatus {
    /// An existing regular file
    Present,
    /// Nothing at the configured path
    Missing,
    /// Something other than a regular file (e.g. a directory)
    NotAFile,
}

impl Settings {
    /// Read and parse a settings file
    pub fn read_from(path: &Path) -> SaveKeeperResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SaveKeeperError::Io(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| SaveKeeperError::ConfigCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save settings to disk as indented JSON in a single write
    pub fn save(&self, path: &Path) -> SaveKeeperResult<()> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|e| SaveKeeperError::ConfigWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        fs::write(path, contents).map_err(|e| SaveKeeperError::ConfigWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Redirect target, if one is configured
    pub fn redirect(&self) -> Option<&Path> {
        if path_is_empty(&self.config_file_path) {
            None
        } else {
            Some(&self.config_file_path)
        }
    }

    /// Check what currently lives at `save_path`
    pub fn save_file_status(&self) -> SaveFileStatus {
        match fs::metadata(&self.save_path) {
            Ok(meta) if meta.is_file() => SaveFileStatus::Present,
            Ok(_) => SaveFileStatus::NotAFile,
            Err(_) => SaveFileStatus::Missing,
        }
    }

    /// Create the backup directory (and parents) if missing
    pub fn ensure_backup_dir(&self) -> SaveKeeperResult<()> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| SaveKeeperError::DirectoryCreate {
            path: self.backup_dir.clone(),
            reason: e.to_string(),
        })
    }
}

/// What to do when the config file exists but cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptConfigPolicy {
    /// Fail startup with `ConfigCorrupt`
    #[default]
    Strict,
    /// Log a warning and continue with default settings
    Lenient,
}

/// Settings together with the file they are persisted to
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub settings: Settings,
    pub path: PathBuf,
}

/// A single settings mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    SavePath(PathBuf),
    BackupDir(PathBuf),
    AutoBackup(bool),
    ToggleAutoBackup,
    /// Move persistence to another file; an empty path restores the default
    ConfigFile(PathBuf),
}

/// Loads, creates and persists the settings record
#[derive(Debug, Clone)]
pub struct ConfigStore {
    paths: SaveKeeperPaths,
    policy: CorruptConfigPolicy,
    /// Record written on first run
    defaults: Settings,
}

impl ConfigStore {
    /// Create a new ConfigStore
    pub fn new(paths: SaveKeeperPaths) -> Self {
        Self {
            paths,
            policy: CorruptConfigPolicy::default(),
            defaults: Settings::default(),
        }
    }

    /// Override the first-run defaults
    pub fn with_defaults(mut self, defaults: Settings) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the corrupt-file policy
    pub fn with_corrupt_policy(mut self, policy: CorruptConfigPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Default location of config.json
    pub fn default_path(&self) -> PathBuf {
        self.paths.settings_file()
    }

    /// Load settings, creating them on first run
    ///
    /// The returned path is where subsequent changes are persisted. After a
    /// successful load the backup directory exists.
    pub fn load(&self) -> SaveKeeperResult<LoadedConfig> {
        let default_path = self.default_path();

        let loaded = if default_path.exists() {
            match Settings::read_from(&default_path) {
                Ok(settings) => self.follow_redirect(settings, default_path),
                Err(err @ SaveKeeperError::ConfigCorrupt { .. }) => match self.policy {
                    CorruptConfigPolicy::Strict => return Err(err),
                    CorruptConfigPolicy::Lenient => {
                        warn!(error = %err, "ignoring unreadable configuration, using defaults");
                        LoadedConfig {
                            settings: self.defaults.clone(),
                            path: default_path,
                        }
                    }
                },
                Err(err) => return Err(err),
            }
        } else {
            let settings = self.defaults.clone();
            if let Some(parent) = default_path.parent() {
                fs::create_dir_all(parent).map_err(|e| SaveKeeperError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
            settings.save(&default_path)?;
            info!(path = %default_path.display(), "created default configuration");
            LoadedConfig {
                settings,
                path: default_path,
            }
        };

        loaded.settings.ensure_backup_dir()?;
        Ok(loaded)
    }

    fn follow_redirect(&self, settings: Settings, default_path: PathBuf) -> LoadedConfig {
        let target = match settings.redirect() {
            Some(target) if target != default_path => target.to_path_buf(),
            _ => {
                return LoadedConfig {
                    settings,
                    path: default_path,
                }
            }
        };

        match Settings::read_from(&target) {
            Ok(custom) => {
                debug!(path = %target.display(), "using redirected configuration");
                LoadedConfig {
                    settings: custom,
                    path: target,
                }
            }
            Err(err) => {
                warn!(
                    path = %target.display(),
                    error = %err,
                    "failed to load redirected configuration, keeping default"
                );
                LoadedConfig {
                    settings,
                    path: default_path,
                }
            }
        }
    }

    /// Apply a change and persist it immediately
    ///
    /// The in-memory value is updated even when persisting fails, so the
    /// running session keeps the user's choice.
    pub fn apply(&self, loaded: &mut LoadedConfig, change: SettingChange) -> SaveKeeperResult<()> {
        match change {
            SettingChange::SavePath(path) => {
                require_non_empty(&path, "Save file path")?;
                loaded.settings.save_path = path;
                loaded.settings.save(&loaded.path)?;
            }
            SettingChange::BackupDir(path) => {
                require_non_empty(&path, "Backup directory")?;
                loaded.settings.backup_dir = path;
                let created = loaded.settings.ensure_backup_dir();
                loaded.settings.save(&loaded.path)?;
                created?;
            }
            SettingChange::AutoBackup(enabled) => {
                loaded.settings.auto_backup = enabled;
                loaded.settings.save(&loaded.path)?;
            }
            SettingChange::ToggleAutoBackup => {
                loaded.settings.auto_backup = !loaded.settings.auto_backup;
                loaded.settings.save(&loaded.path)?;
            }
            SettingChange::ConfigFile(path) => self.relocate(loaded, path)?,
        }

        info!(path = %loaded.path.display(), "settings updated");
        Ok(())
    }

    fn relocate(&self, loaded: &mut LoadedConfig, target: PathBuf) -> SaveKeeperResult<()> {
        let default_path = self.default_path();

        if path_is_empty(&target) || target == default_path {
            loaded.settings.config_file_path = PathBuf::new();
            loaded.settings.save(&default_path)?;
            loaded.path = default_path;
            return Ok(());
        }

        if let Some(parent) = target.parent().filter(|p| !path_is_empty(p)) {
            fs::create_dir_all(parent).map_err(|e| SaveKeeperError::DirectoryCreate {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        loaded.settings.config_file_path = target.clone();
        loaded.settings.save(&target)?;
        // The default file keeps the redirect so the next start finds the target
        loaded.settings.save(&default_path)?;
        loaded.path = target;
        Ok(())
    }
}

fn require_non_empty(path: &Path, what: &str) -> SaveKeeperResult<()> {
    if path_is_empty(path) {
        return Err(SaveKeeperError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::new(SaveKeeperPaths::with_config_dir(temp.path().to_path_buf()))
    }

    fn settings_in(temp: &TempDir) -> Settings {
        Settings {
            save_path: temp.path().join("game").join("save.dat"),
            backup_dir: temp.path().join("backups"),
            auto_backup: false,
            config_file_path: PathBuf::new(),
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.auto_backup);
        assert!(settings.redirect().is_none());
    }

    #[test]
    fn test_first_run_creates_and_persists_defaults() {
        let temp = TempDir::new().unwrap();
        let mut defaults = settings_in(&temp);
        defaults.auto_backup = true;
        let store = store_in(&temp).with_defaults(defaults.clone());
        assert!(!store.default_path().exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.path, store.default_path());
        assert_eq!(loaded.settings, defaults);
        assert!(defaults.backup_dir.is_dir());
        assert_eq!(Settings::read_from(&store.default_path()).unwrap(), defaults);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let settings = settings_in(&temp);
        settings.save(&store.default_path()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.settings, settings);
        assert_eq!(loaded.path, store.default_path());
        assert!(settings.backup_dir.is_dir());
    }

    #[test]
    fn test_field_names_are_stable() {
        let temp = TempDir::new().unwrap();
        let settings = settings_in(&temp);
        let value = serde_json::to_value(&settings).unwrap();

        assert!(value.get("save_path").is_some());
        assert!(value.get("backup_dir").is_some());
        assert_eq!(value.get("auto_backup"), Some(&serde_json::Value::Bool(false)));
        assert!(value.get("config_file_path").is_none());
    }

    #[test]
    fn test_corrupt_config_is_fatal_when_strict() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.default_path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, SaveKeeperError::ConfigCorrupt { .. }));
    }

    #[test]
    fn test_corrupt_config_falls_through_when_lenient() {
        let temp = TempDir::new().unwrap();
        let defaults = settings_in(&temp);
        let store = store_in(&temp)
            .with_corrupt_policy(CorruptConfigPolicy::Lenient)
            .with_defaults(defaults.clone());
        fs::write(store.default_path(), "{ not json").unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.settings, defaults);
        // The corrupt file is left for the user to inspect
        assert_eq!(fs::read_to_string(store.default_path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_redirect_is_followed() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let custom_path = temp.path().join("custom.json");

        let mut custom = settings_in(&temp);
        custom.auto_backup = true;
        custom.save(&custom_path).unwrap();

        let mut default = settings_in(&temp);
        default.config_file_path = custom_path.clone();
        default.save(&store.default_path()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.path, custom_path);
        assert!(loaded.settings.auto_backup);
    }

    #[test]
    fn test_broken_redirect_keeps_default_record() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut default = settings_in(&temp);
        default.config_file_path = temp.path().join("missing.json");
        default.save(&store.default_path()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.path, store.default_path());
        assert_eq!(loaded.settings, default);
    }

    #[test]
    fn test_missing_required_field_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.default_path(), r#"{"auto_backup": true}"#).unwrap();

        assert!(matches!(
            store.load(),
            Err(SaveKeeperError::ConfigCorrupt { .. })
        ));
    }

    #[test]
    fn test_backup_dir_creation_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();

        let mut settings = settings_in(&temp);
        settings.backup_dir = blocker.join("backups");
        settings.save(&store.default_path()).unwrap();

        assert!(matches!(
            store.load(),
            Err(SaveKeeperError::DirectoryCreate { .. })
        ));
    }

    #[test]
    fn test_apply_persists_each_change() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        settings_in(&temp).save(&store.default_path()).unwrap();
        let mut loaded = store.load().unwrap();

        store
            .apply(&mut loaded, SettingChange::ToggleAutoBackup)
            .unwrap();
        assert!(Settings::read_from(&loaded.path).unwrap().auto_backup);

        let new_save = temp.path().join("other.sav");
        store
            .apply(&mut loaded, SettingChange::SavePath(new_save.clone()))
            .unwrap();
        assert_eq!(Settings::read_from(&loaded.path).unwrap().save_path, new_save);

        let new_dir = temp.path().join("nested").join("backups");
        store
            .apply(&mut loaded, SettingChange::BackupDir(new_dir.clone()))
            .unwrap();
        assert!(new_dir.is_dir());
        assert_eq!(Settings::read_from(&loaded.path).unwrap().backup_dir, new_dir);
    }

    #[test]
    fn test_apply_rejects_empty_paths() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        settings_in(&temp).save(&store.default_path()).unwrap();
        let mut loaded = store.load().unwrap();

        let err = store
            .apply(&mut loaded, SettingChange::SavePath(PathBuf::new()))
            .unwrap_err();
        assert!(matches!(err, SaveKeeperError::Validation(_)));
    }

    #[test]
    fn test_relocate_and_return_to_default() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        settings_in(&temp).save(&store.default_path()).unwrap();
        let mut loaded = store.load().unwrap();

        let custom = temp.path().join("elsewhere").join("settings.json");
        store
            .apply(&mut loaded, SettingChange::ConfigFile(custom.clone()))
            .unwrap();
        assert_eq!(loaded.path, custom);
        assert!(custom.exists());

        // A fresh load follows the redirect
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.path, custom);

        store
            .apply(&mut loaded, SettingChange::ConfigFile(PathBuf::new()))
            .unwrap();
        assert_eq!(loaded.path, store.default_path());
        assert_eq!(store.load().unwrap().path, store.default_path());
    }

    #[test]
    fn test_save_file_status() {
        let temp = TempDir::new().unwrap();
        let mut settings = settings_in(&temp);
        assert_eq!(settings.save_file_status(), SaveFileStatus::Missing);

        settings.save_path = temp.path().to_path_buf();
        assert_eq!(settings.save_file_status(), SaveFileStatus::NotAFile);

        let file = temp.path().join("save.dat");
        fs::write(&file, b"data").unwrap();
        settings.save_path = file;
        assert_eq!(settings.save_file_status(), SaveFileStatus::Present);
    }
}

//! Settings CLI commands
//!
//! Every change is persisted immediately to the resolved config file.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::{ConfigStore, LoadedConfig, SaveFileStatus, SettingChange};
use crate::error::SaveKeeperResult;

use super::prompt::absolutize;

/// Auto-backup switch values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AutoBackupState {
    On,
    Off,
    Toggle,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings and where they are stored
    Show,

    /// Change the save file that gets backed up
    SavePath {
        /// Path to the live save file
        path: PathBuf,
    },

    /// Change the directory backups are stored in
    BackupDir {
        /// Backup directory (created if missing)
        path: PathBuf,
    },

    /// Turn the pre-restore auto-backup on or off
    AutoBackup {
        #[arg(value_enum)]
        state: AutoBackupState,
    },

    /// Store settings in a different file (omit to use the default location)
    File {
        /// New config file path
        path: Option<PathBuf>,
    },

    /// Check that the configured save file exists
    Test,
}

/// Handle a config command
pub fn handle_config_command(
    store: &ConfigStore,
    loaded: &mut LoadedConfig,
    cmd: ConfigCommands,
) -> SaveKeeperResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", format_settings(loaded));
        }

        ConfigCommands::SavePath { path } => {
            store.apply(loaded, SettingChange::SavePath(absolutize(&path)))?;
            println!("Save file path set to: {}", loaded.settings.save_path.display());
        }

        ConfigCommands::BackupDir { path } => {
            store.apply(loaded, SettingChange::BackupDir(absolutize(&path)))?;
            println!("Backup directory set to: {}", loaded.settings.backup_dir.display());
        }

        ConfigCommands::AutoBackup { state } => {
            let change = match state {
                AutoBackupState::On => SettingChange::AutoBackup(true),
                AutoBackupState::Off => SettingChange::AutoBackup(false),
                AutoBackupState::Toggle => SettingChange::ToggleAutoBackup,
            };
            store.apply(loaded, change)?;
            println!(
                "Auto-backup has been {}",
                enabled_label(loaded.settings.auto_backup)
            );
        }

        ConfigCommands::File { path } => {
            let target = path.map(|p| absolutize(&p)).unwrap_or_default();
            store.apply(loaded, SettingChange::ConfigFile(target))?;
            println!("Settings are now stored in: {}", loaded.path.display());
        }

        ConfigCommands::Test => {
            println!("{}", describe_save_file(loaded));
        }
    }

    Ok(())
}

/// Multi-line overview of the current settings
pub fn format_settings(loaded: &LoadedConfig) -> String {
    let settings = &loaded.settings;
    format!(
        "SaveKeeper Configuration\n\
         ========================\n\
         Config file:      {}\n\
         Save file:        {}\n\
         Backup directory: {}\n\
         Auto-backup:      {}",
        loaded.path.display(),
        settings.save_path.display(),
        settings.backup_dir.display(),
        enabled_label(settings.auto_backup),
    )
}

/// Human-readable result of checking the save file
pub fn describe_save_file(loaded: &LoadedConfig) -> String {
    let path = loaded.settings.save_path.display();
    match loaded.settings.save_file_status() {
        SaveFileStatus::Present => format!("Save file found at: {}", path),
        SaveFileStatus::Missing => format!("Save file not found at: {}", path),
        SaveFileStatus::NotAFile => format!("Path points to a directory, not a file: {}", path),
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "ENABLED"
    } else {
        "DISABLED"
    }
}

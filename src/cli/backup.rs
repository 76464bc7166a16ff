//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;

use crate::backup::{Backup, BackupManager, Confirmation, RestoreManager};
use crate::config::settings::Settings;
use crate::display;
use crate::error::{SaveKeeperError, SaveKeeperResult};

use super::launcher;
use super::prompt;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Copy the save file into a new backup
    Create {
        /// Backup name (defaults to Backup_<timestamp>)
        name: Option<String>,
    },

    /// List all available backups, newest first
    #[command(alias = "ls")]
    List,

    /// Restore a backup over the save file
    Restore {
        /// Backup name (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete one or more backups
    #[command(alias = "rm")]
    Delete {
        /// Backup names
        #[arg(required = true)]
        backups: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Open the backup directory in the file manager
    Open,
}

/// Handle a backup command
pub fn handle_backup_command(settings: &Settings, cmd: BackupCommands) -> SaveKeeperResult<()> {
    let manager = BackupManager::new(settings);

    match cmd {
        BackupCommands::Create { name } => {
            let backup = manager.create_backup(name.as_deref().unwrap_or(""))?;
            println!("Backup created successfully!");
            println!("Backup name: {}", backup.name);
            println!("Created at: {}", display::format_time(&backup.created_at));
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;
            println!("{}", display::format_backup_list(&backups));
        }

        BackupCommands::Restore { backup, yes } => {
            let backup = manager.find_backup(&backup)?;

            let confirmation = if yes {
                Confirmation::Granted
            } else {
                println!("WARNING: This will overwrite your current save file!");
                println!("Selected backup: {}", display::format_backup_choice(&backup));
                Confirmation::from(prompt::confirm(
                    "Are you sure you want to restore this backup?",
                )?)
            };

            let outcome = RestoreManager::new(settings).restore(&backup, confirmation)?;
            println!("{}", outcome.summary());
        }

        BackupCommands::Delete { backups, yes } => {
            let mut selection: Vec<Backup> = Vec::new();
            for name in &backups {
                let backup = manager.find_backup(name)?;
                if !selection.iter().any(|b| b.path == backup.path) {
                    selection.push(backup);
                }
            }

            if !yes {
                println!("WARNING: This will permanently delete the selected backups!");
                for backup in &selection {
                    println!(" - {}", backup.name);
                }
                if !prompt::confirm("Are you sure?")? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }

            let report = manager.delete_backups(&selection);
            println!("{}", display::format_delete_report(&report));
            if report.all_failed() {
                return Err(SaveKeeperError::Io(format!(
                    "{} deletion(s) failed",
                    report.failures.len()
                )));
            }
        }

        BackupCommands::Open => {
            launcher::open_directory(&settings.backup_dir)?;
            println!("Directory opened.");
        }
    }

    Ok(())
}

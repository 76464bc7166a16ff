//! Interactive menu shell
//!
//! Started when no subcommand is given. Every action reports its own failure
//! and returns to the menu; only closing stdin or choosing Exit ends the loop.

use std::path::PathBuf;

use crossterm::style::Stylize;
use tracing::debug;

use crate::backup::{BackupManager, Confirmation, RestoreManager};
use crate::config::settings::{ConfigStore, LoadedConfig, SettingChange};
use crate::display;
use crate::error::SaveKeeperResult;

use super::config::{describe_save_file, format_settings};
use super::launcher;
use super::prompt::{self, absolutize, parse_choice, parse_selection, prompt_string};
use super::term::{clear_screen, error_line, heading, print_menu, success_line, wait_for_enter};

const MAIN_MENU: [&str; 6] = [
    "Create Backup",
    "Restore Backup",
    "List Backups",
    "Delete Backup",
    "Settings",
    "Exit",
];

const SETTINGS_MENU: [&str; 7] = [
    "Change Save File Path",
    "Change Backup Directory",
    "Toggle Auto-Backup on Restore",
    "Test Save File Path",
    "Open Backup Directory",
    "Change Config File Location",
    "Back to Main Menu",
];

/// The interactive session
pub struct Shell {
    store: ConfigStore,
    loaded: LoadedConfig,
}

impl Shell {
    /// Create a shell over already-loaded settings
    pub fn new(store: ConfigStore, loaded: LoadedConfig) -> Self {
        Self { store, loaded }
    }

    /// Run the main menu until the user exits
    ///
    /// Returns the settings as they stand at exit.
    pub fn run(mut self) -> SaveKeeperResult<LoadedConfig> {
        loop {
            clear_screen();
            heading("GAME SAVE BACKUP MANAGER");
            println!("{}", format_settings(&self.loaded));
            println!();
            print_menu(&MAIN_MENU);

            let Some(input) = prompt_string("Select an option (1-6): ")? else {
                break;
            };

            clear_screen();
            let result = match parse_choice(&input, MAIN_MENU.len()) {
                Some(0) => self.create_backup(),
                Some(1) => self.restore_backup(),
                Some(2) => self.list_backups(),
                Some(3) => self.delete_backups(),
                Some(4) => {
                    // The settings menu pauses after its own actions
                    if let Err(e) = self.settings_menu() {
                        error_line(&e.to_string());
                    }
                    continue;
                }
                Some(_) => {
                    println!("{} Thank you for using SaveKeeper!", "INFO:".green());
                    break;
                }
                None => {
                    error_line(&format!(
                        "please enter a number between 1 and {}",
                        MAIN_MENU.len()
                    ));
                    Ok(())
                }
            };

            if let Err(e) = result {
                debug!(error = ?e, "menu action failed");
                error_line(&e.to_string());
            }
            wait_for_enter();
        }

        Ok(self.loaded)
    }

    fn create_backup(&self) -> SaveKeeperResult<()> {
        heading("CREATE BACKUP");
        let manager = BackupManager::new(&self.loaded.settings);

        let Some(name) = prompt_string("Enter backup name (press Enter for default): ")? else {
            return Ok(());
        };

        let backup = manager.create_backup(&name)?;
        success_line("Backup created successfully!");
        println!("Backup name: {}", backup.name);
        println!("Created at: {}", display::format_time(&backup.created_at));
        Ok(())
    }

    fn restore_backup(&self) -> SaveKeeperResult<()> {
        heading("RESTORE BACKUP");
        let manager = BackupManager::new(&self.loaded.settings);

        let backups = manager.list_backups()?;
        if backups.is_empty() {
            println!("No backups found.");
            return Ok(());
        }

        for (i, backup) in backups.iter().enumerate() {
            println!("{}. {}", i + 1, display::format_backup_choice(backup));
        }
        println!("{}. Cancel", backups.len() + 1);
        println!();

        let Some(input) = prompt_string("Select a backup to restore: ")? else {
            return Ok(());
        };
        let Some(index) = parse_choice(&input, backups.len()) else {
            println!("Restore cancelled.");
            return Ok(());
        };

        let selected = &backups[index];
        println!();
        println!(
            "{} This will overwrite your current save file!",
            "WARNING:".yellow()
        );
        println!("Selected backup: {}", selected.name);
        println!();

        let confirmation = Confirmation::from(prompt::confirm(
            "Are you sure you want to restore this backup?",
        )?);

        let outcome = RestoreManager::new(&self.loaded.settings).restore(selected, confirmation)?;
        if outcome.is_restored() {
            success_line(&outcome.summary());
        } else {
            println!("{}", outcome.summary());
        }
        Ok(())
    }

    fn list_backups(&self) -> SaveKeeperResult<()> {
        heading("BACKUP LIST");
        let backups = BackupManager::new(&self.loaded.settings).list_backups()?;
        println!("{}", display::format_backup_list(&backups));
        Ok(())
    }

    fn delete_backups(&self) -> SaveKeeperResult<()> {
        heading("DELETE BACKUP");
        let manager = BackupManager::new(&self.loaded.settings);

        let backups = manager.list_backups()?;
        if backups.is_empty() {
            println!("No backups found.");
            return Ok(());
        }

        for (i, backup) in backups.iter().enumerate() {
            println!("{}. {}", i + 1, display::format_backup_choice(backup));
        }
        println!();

        let Some(input) = prompt_string("Select backups to delete (e.g. 1,3): ")? else {
            return Ok(());
        };
        let selection: Vec<_> = parse_selection(&input, backups.len())?
            .into_iter()
            .map(|i| backups[i].clone())
            .collect();

        if selection.is_empty() {
            println!("No backups selected.");
            return Ok(());
        }

        println!();
        println!(
            "{} This will permanently delete the selected backups!",
            "WARNING:".yellow()
        );
        for backup in &selection {
            println!(" - {}", backup.name.as_str().yellow());
        }
        println!();

        if !prompt::confirm("Are you sure?")? {
            println!("Deletion cancelled.");
            return Ok(());
        }

        let report = manager.delete_backups(&selection);
        println!("{}", display::format_delete_report(&report));
        Ok(())
    }

    fn settings_menu(&mut self) -> SaveKeeperResult<()> {
        loop {
            clear_screen();
            heading("SETTINGS");
            println!("{}", format_settings(&self.loaded));
            println!();
            print_menu(&SETTINGS_MENU);

            let Some(input) = prompt_string("Select an option (1-7): ")? else {
                return Ok(());
            };

            let result = match parse_choice(&input, SETTINGS_MENU.len()) {
                Some(0) => self.change_path(
                    "Enter new save file path: ",
                    SettingChange::SavePath,
                    false,
                ),
                Some(1) => self.change_path(
                    "Enter new backup directory: ",
                    SettingChange::BackupDir,
                    false,
                ),
                Some(2) => self
                    .store
                    .apply(&mut self.loaded, SettingChange::ToggleAutoBackup)
                    .map(|_| {
                        let state = if self.loaded.settings.auto_backup {
                            "ENABLED"
                        } else {
                            "DISABLED"
                        };
                        success_line(&format!("Auto-backup has been {}", state));
                    }),
                Some(3) => {
                    println!("{}", describe_save_file(&self.loaded));
                    Ok(())
                }
                Some(4) => launcher::open_directory(&self.loaded.settings.backup_dir)
                    .map(|_| success_line("Directory opened.")),
                Some(5) => self.change_path(
                    "Enter new config file path (empty for default): ",
                    SettingChange::ConfigFile,
                    true,
                ),
                Some(_) => return Ok(()),
                None => {
                    error_line(&format!(
                        "please enter a number between 1 and {}",
                        SETTINGS_MENU.len()
                    ));
                    Ok(())
                }
            };

            if let Err(e) = result {
                error_line(&e.to_string());
            }
            wait_for_enter();
        }
    }

    /// Prompt for a path and apply it; an empty answer is only passed on
    /// when `allow_empty` is set
    fn change_path(
        &mut self,
        prompt: &str,
        change: fn(PathBuf) -> SettingChange,
        allow_empty: bool,
    ) -> SaveKeeperResult<()> {
        let Some(input) = prompt_string(prompt)? else {
            return Ok(());
        };

        if input.is_empty() && !allow_empty {
            println!("Unchanged.");
            return Ok(());
        }

        let path = absolutize(PathBuf::from(input).as_path());
        self.store.apply(&mut self.loaded, change(path))?;
        success_line("Settings saved.");
        Ok(())
    }
}

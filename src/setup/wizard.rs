//! Setup wizard orchestration
//!
//! Runs when no configuration file exists yet and stdin is a terminal.
//! Non-interactive first runs skip it and start from guessed defaults.

use std::path::PathBuf;

use crossterm::style::Stylize;
use tracing::info;

use crate::cli::prompt::prompt_string;
use crate::cli::term::{clear_screen, error_line, heading, success_line, wait_for_enter};
use crate::config::{SaveKeeperPaths, Settings};
use crate::error::{SaveKeeperError, SaveKeeperResult};

use super::validate::{is_exit, prepare_backup_dir, validate_save_path};

#[cfg(windows)]
const SAVE_EXAMPLES: &[&str] = &[
    r"C:\Users\YourName\Documents\My Games\GameName\save.dat",
    r"C:\Users\YourName\AppData\Local\GameName\save.sav",
    r"C:\Users\YourName\Saved Games\GameName\save.dat",
];

#[cfg(target_os = "macos")]
const SAVE_EXAMPLES: &[&str] = &[
    "~/Library/Application Support/GameName/save.dat",
    "~/Documents/GameName/save.sav",
];

#[cfg(not(any(windows, target_os = "macos")))]
const SAVE_EXAMPLES: &[&str] = &["~/.local/share/GameName/save.dat", "~/.config/GameName/save.sav"];

/// The first-run setup flow
pub struct SetupWizard {
    paths: SaveKeeperPaths,
}

impl SetupWizard {
    /// Create a new setup wizard
    pub fn new(paths: SaveKeeperPaths) -> Self {
        Self { paths }
    }

    /// Check if setup is needed (first run)
    pub fn needs_setup(&self) -> bool {
        !self.paths.settings_file().exists()
    }

    /// Run the interactive setup wizard
    ///
    /// Returns the chosen settings without persisting them; typing `exit` or
    /// closing stdin yields `SetupCancelled`.
    pub fn run(&self) -> SaveKeeperResult<Settings> {
        clear_screen();
        heading("FIRST TIME SETUP");
        println!("{} Welcome to SaveKeeper!", "WELCOME:".green());
        println!("Let's set up your save file and backup locations.");
        println!();
        println!("{} Common save file locations:", "EXAMPLES:".cyan());
        for example in SAVE_EXAMPLES {
            println!("  - {}", example);
        }
        println!();

        let save_path = self.ask_save_path()?;
        let backup_dir = self.ask_backup_dir()?;

        let settings = Settings {
            save_path,
            backup_dir,
            auto_backup: true,
            config_file_path: PathBuf::new(),
        };

        println!();
        success_line("Configuration completed successfully!");
        println!("Save file:              {}", settings.save_path.display());
        println!("Backup directory:       {}", settings.backup_dir.display());
        println!("Auto-backup on restore: ENABLED");
        println!();
        println!("You can now create your first backup from the main menu!");
        wait_for_enter();

        info!(config = %self.paths.settings_file().display(), "first-run setup completed");
        Ok(settings)
    }

    fn ask_save_path(&self) -> SaveKeeperResult<PathBuf> {
        loop {
            println!("{} SAVE FILE SETUP", "STEP 1:".cyan());
            println!("Enter the full path to your game save file.");
            println!("Type '{}' to exit setup.", "exit".yellow());
            println!();

            let input = next_answer("Save file path: ")?;
            match validate_save_path(&input) {
                Ok(path) => {
                    success_line("Save file validated successfully!");
                    println!();
                    return Ok(path);
                }
                Err(e) => report(&e),
            }
        }
    }

    fn ask_backup_dir(&self) -> SaveKeeperResult<PathBuf> {
        loop {
            println!("{} BACKUP DIRECTORY SETUP", "STEP 2:".cyan());
            println!("Enter the directory where you want to store your backups.");
            println!("Type '{}' to exit setup.", "exit".yellow());
            println!();

            let input = next_answer("Backup directory path: ")?;
            match prepare_backup_dir(&input) {
                Ok(check) => {
                    if check.created {
                        println!("Directory didn't exist and was created.");
                    }
                    if check.existing_entries > 0 {
                        println!(
                            "{} Directory already contains {} file(s). Make sure it's not used by other applications.",
                            "WARNING:".yellow(),
                            check.existing_entries
                        );
                    }
                    success_line("Backup directory validated successfully!");
                    println!();
                    return Ok(check.path);
                }
                Err(e) => report(&e),
            }
        }
    }
}

/// Read one answer; `exit` or closed stdin cancels setup
fn next_answer(prompt: &str) -> SaveKeeperResult<String> {
    match prompt_string(prompt)? {
        Some(input) if !is_exit(&input) => Ok(input),
        _ => Err(SaveKeeperError::SetupCancelled),
    }
}

fn report(err: &SaveKeeperError) {
    match err {
        SaveKeeperError::Validation(message) => error_line(message),
        other => error_line(&other.to_string()),
    }
    println!();
}

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands and the
//! interactive shell, bridging argument parsing and stdin prompts with the
//! backup and configuration layers.

pub mod backup;
pub mod config;
pub mod launcher;
pub mod prompt;
pub mod shell;
pub mod term;

pub use backup::{handle_backup_command, BackupCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use shell::Shell;

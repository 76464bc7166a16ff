//! SaveKeeper - Terminal-based backup manager for game save files
//!
//! This library copies a designated save file into named or timestamped
//! backups, lists them, restores a chosen backup over the live save file and
//! deletes backups.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Config file location, settings persistence and redirection
//! - `error`: Custom error types
//! - `storage`: Whole-file copy and atomic replace primitives
//! - `backup`: Backup enumeration, creation, restore and deletion
//! - `display`: Terminal formatting
//! - `cli`: Subcommand handlers and the interactive shell
//! - `setup`: First-run setup wizard
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use savekeeper::backup::BackupManager;
//! use savekeeper::config::{ConfigStore, SaveKeeperPaths};
//!
//! let store = ConfigStore::new(SaveKeeperPaths::new()?);
//! let loaded = store.load()?;
//! let backup = BackupManager::new(&loaded.settings).create_backup("")?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod setup;
pub mod storage;

pub use error::{SaveKeeperError, SaveKeeperResult};

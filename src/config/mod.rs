//! Configuration module for SaveKeeper
//!
//! This module provides configuration management including:
//! - Config file location resolution
//! - Settings persistence and redirection
//! - First-run defaults

pub mod paths;
pub mod settings;

pub use paths::SaveKeeperPaths;
pub use settings::{ConfigStore, CorruptConfigPolicy, LoadedConfig, SettingChange, Settings};

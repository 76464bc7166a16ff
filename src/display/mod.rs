//! Display formatting for terminal output
//!
//! Provides utilities for formatting backups and operation results for
//! terminal display.

pub mod backup;

pub use backup::{
    format_backup_choice, format_backup_list, format_delete_report, format_size, format_time,
};

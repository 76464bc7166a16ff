//! Backup display formatting
//!
//! Formats backups for terminal output in table and selection views.

use chrono::{DateTime, Local, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::{Backup, DeleteReport};

/// Timestamp format used wherever a backup time is shown
pub const DISPLAY_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Format a list of backups as a numbered table
pub fn format_backup_list(backups: &[Backup]) -> String {
    if backups.is_empty() {
        return "No backups found.".to_string();
    }

    let rows = backups.iter().enumerate().map(|(i, b)| BackupRow {
        index: i + 1,
        name: b.name.clone(),
        created: format_time(&b.created_at),
        size: format_size(b.size_bytes),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n\nTotal: {} backup(s)", table, backups.len())
}

/// One-line label used in selection prompts
pub fn format_backup_choice(backup: &Backup) -> String {
    format!("{} (Created: {})", backup.name, format_time(&backup.created_at))
}

/// Format the outcome of a batch delete
pub fn format_delete_report(report: &DeleteReport) -> String {
    if report.nothing_selected() {
        return "No backups selected.".to_string();
    }

    let mut lines: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("Failed to delete {}: {}", f.backup.name, f.reason))
        .collect();

    if report.all_failed() {
        lines.push("No backups were deleted.".to_string());
    } else {
        lines.push(format!(
            "{} backup(s) deleted successfully!",
            report.deleted_count()
        ));
    }

    lines.join("\n")
}

/// Format a timestamp in local time
pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(DISPLAY_TIME_FORMAT).to_string()
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

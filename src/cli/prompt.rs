//! Line-based prompts on stdin
//!
//! Reading is kept apart from parsing so the parsing rules can be tested
//! without a terminal.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{SaveKeeperError, SaveKeeperResult};

/// Prompt for a string input
///
/// Returns `None` when stdin is closed.
pub fn prompt_string(prompt: &str) -> SaveKeeperResult<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

/// Ask a y/N question; anything but yes (including closed stdin) is no
pub fn confirm(prompt: &str) -> SaveKeeperResult<bool> {
    Ok(prompt_string(&format!("{} (y/N): ", prompt))?
        .map(|answer| is_yes(&answer))
        .unwrap_or(false))
}

/// Whether an answer means yes
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Parse a 1-based menu choice into a 0-based index
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

/// Parse a list of 1-based choices separated by commas or spaces
///
/// Duplicates are dropped and the first-seen order is kept. An empty input
/// is an empty selection.
pub fn parse_selection(input: &str, count: usize) -> SaveKeeperResult<Vec<usize>> {
    let mut selected = Vec::new();

    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let index = parse_choice(token, count).ok_or_else(|| {
            SaveKeeperError::Validation(format!(
                "'{}' is not a number between 1 and {}",
                token, count
            ))
        })?;
        if !selected.contains(&index) {
            selected.push(index);
        }
    }

    Ok(selected)
}

/// Resolve a user-entered path against the current directory
pub fn absolutize(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return PathBuf::new();
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

//! Terminal output helpers shared by the shell and the setup wizard

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

pub fn clear_screen() {
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

pub fn heading(title: &str) {
    let rule = "=====================================";
    println!("{}", rule.cyan());
    println!("{}", title.cyan().bold());
    println!("{}", rule.cyan());
    println!();
}

pub fn print_menu(items: &[&str]) {
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }
    println!();
}

pub fn success_line(message: &str) {
    println!("{} {}", "SUCCESS:".green(), message);
}

pub fn error_line(message: &str) {
    println!("{} {}", "ERROR:".red(), message);
}

pub fn wait_for_enter() {
    print!("\nPress Enter to continue...");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    let _ = io::stdin().read_line(&mut buf);
}

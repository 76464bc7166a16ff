use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{Parser, Subcommand};

use savekeeper::cli::{
    handle_backup_command, handle_config_command, BackupCommands, ConfigCommands, Shell,
};
use savekeeper::config::{ConfigStore, CorruptConfigPolicy, SaveKeeperPaths};
use savekeeper::setup::SetupWizard;
use savekeeper::{logging, SaveKeeperError};

#[derive(Parser)]
#[command(
    name = "savekeeper",
    version,
    about = "Backup manager for game save files",
    long_about = "SaveKeeper copies your game save into named or timestamped backups, \
                  lists them, restores any of them over the live save (taking an \
                  automatic safety backup first) and deletes the ones you no longer \
                  need. Run without a command for the interactive menu."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Start with default settings instead of failing on an unreadable config file
    #[arg(long, global = true, env = "SAVEKEEPER_LENIENT_CONFIG")]
    lenient_config: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Backup(BackupCommands),

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Launch the interactive menu
    #[command(alias = "ui")]
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let policy = if cli.lenient_config {
        CorruptConfigPolicy::Lenient
    } else {
        CorruptConfigPolicy::Strict
    };

    let paths = SaveKeeperPaths::new()?;
    let mut store = ConfigStore::new(paths.clone()).with_corrupt_policy(policy);

    // First run on a terminal asks for real paths instead of guessing them
    let wizard = SetupWizard::new(paths);
    if wizard.needs_setup() && io::stdin().is_terminal() {
        match wizard.run() {
            Ok(settings) => store = store.with_defaults(settings),
            Err(e) => {
                report_startup_failure(&e);
                std::process::exit(1);
            }
        }
    }

    let mut loaded = match store.load() {
        Ok(loaded) => loaded,
        Err(e) => {
            report_startup_failure(&e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Backup(cmd)) => handle_backup_command(&loaded.settings, cmd)?,
        Some(Commands::Config(cmd)) => handle_config_command(&store, &mut loaded, cmd)?,
        Some(Commands::Shell) | None => {
            Shell::new(store, loaded).run()?;
        }
    }

    Ok(())
}

fn report_startup_failure(err: &SaveKeeperError) {
    eprintln!("ERROR: Configuration error: {}", err);
    match err {
        SaveKeeperError::ConfigCorrupt { path, .. } => {
            eprintln!();
            eprintln!("This usually means there's an issue with your configuration file.");
            eprintln!(
                "Delete {} and restart, or run with --lenient-config to start with defaults.",
                path.display()
            );
        }
        SaveKeeperError::DirectoryCreate { path, .. } => {
            eprintln!();
            eprintln!(
                "Check the permissions for {} or point backup_dir somewhere writable.",
                path.display()
            );
        }
        _ => {}
    }
}

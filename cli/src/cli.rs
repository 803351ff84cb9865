//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the dotfile linker.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Link annotated dotfiles into your home directory",
    version
)]
pub struct Cli {
    /// Subcommand to run (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to run, falling back to `list`.
    #[must_use]
    pub fn subcommand_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the config file location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every annotated file and whether its link exists
    List,
    /// Register the directory to scan for annotated files
    Source {
        /// Source directory (a leading `~` is expanded)
        path: PathBuf,
    },
    /// Create links for every annotated file
    Up,
    /// Remove links for every annotated file
    Down,
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Source { .. } => "source",
            Self::Up => "up",
            Self::Down => "down",
            Self::Version => "version",
        }
    }
}

//! `dotlink` binary entry point.

use clap::Parser;
use std::io::IsTerminal as _;
use std::process::ExitCode;

use dotlink::cli::{Cli, Command};
use dotlink::commands;
use dotlink::logging::{self, Logger};
use dotlink::platform::Platform;
use dotlink::style;

fn main() -> ExitCode {
    let args = Cli::parse();
    let command = args.subcommand_or_default();
    let color = style::enabled_for(Platform::detect().supports_color(), &std::io::stderr())
        && std::io::stdout().is_terminal();
    logging::init_subscriber(args.verbose, color, command.name());
    let log = Logger::new();

    let result = match command {
        Command::List => commands::list::run(&args.global, &log),
        Command::Source { path } => commands::source::run(&args.global, &path, &log),
        Command::Up => commands::up::run(&args.global, &log),
        Command::Down => commands::down::run(&args.global, &log),
        Command::Version => commands::version::run(),
    };

    if commands::succeeded(result, &log) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

//! Down command: remove the link of every annotated file.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Log;
use crate::reconcile::ReconcileReport;
use crate::scanner::Scanner;

/// Run the down command.
///
/// # Errors
///
/// Returns an error if no source is registered or a source file cannot be
/// read under the fail-fast policy.
pub fn run(global: &GlobalOpts, log: &dyn Log) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    execute(&setup, global.dry_run, log)?;
    Ok(())
}

/// Deactivate every annotation under the registered source.
///
/// # Errors
///
/// See [`run`].
pub fn execute(setup: &CommandSetup, dry_run: bool, log: &dyn Log) -> Result<ReconcileReport> {
    let root = setup.source_root(log)?;
    let scanner = Scanner::new(&root, &setup.config, log);
    Ok(setup.reconciler(dry_run, log).deactivate(scanner.scan())?)
}

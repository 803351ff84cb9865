//! Source command: register the directory to scan.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Log;

/// Run the source command.
///
/// # Errors
///
/// Returns an error if `path` does not exist or a source is already
/// registered.
pub fn run(global: &GlobalOpts, path: &Path, log: &dyn Log) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    execute(&setup, path, log)?;
    Ok(())
}

/// Register `path` and return its absolute form.
///
/// # Errors
///
/// Returns an error if `path` does not exist or a source is already
/// registered.
pub fn execute(setup: &CommandSetup, path: &Path, log: &dyn Log) -> Result<PathBuf> {
    let registry = setup.registry();
    let source = registry.register(path)?;
    log.debug(&format!(
        "registered {} at {}",
        source.display(),
        registry.location().display()
    ));
    Ok(source)
}

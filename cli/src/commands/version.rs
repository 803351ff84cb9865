//! Command: print version information.
use anyhow::Result;
use std::io::Write as _;

/// The build version: `DOTLINK_VERSION` if set at build time, else the
/// crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the dotlink version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    writeln!(std::io::stdout().lock(), "dotlink {}", version())?;
    Ok(())
}

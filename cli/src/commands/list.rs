//! List command: show every annotation and whether its link exists.
use anyhow::Result;
use std::io::Write as _;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Log;
use crate::reconcile::LinkStatus;
use crate::scanner::Scanner;
use crate::style::{self, status_glyph};

/// Run the list command.
///
/// # Errors
///
/// Returns an error if no source is registered or a source file cannot be
/// read under the fail-fast policy.
pub fn run(global: &GlobalOpts, log: &dyn Log) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let fancy = style::enabled_for(setup.platform.supports_fancy_glyphs(), &std::io::stdout());
    let rows = render_rows(&execute(&setup, log)?, fancy);

    let mut out = std::io::stdout().lock();
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

/// Scan the registered source and report the state of every link.
///
/// # Errors
///
/// Returns an error if no source is registered or a source file cannot be
/// read under the fail-fast policy.
pub fn execute(setup: &CommandSetup, log: &dyn Log) -> Result<Vec<LinkStatus>> {
    let root = setup.source_root(log)?;
    let scanner = Scanner::new(&root, &setup.config, log);
    Ok(setup.reconciler(false, log).list(&root, scanner.scan())?)
}

/// Format statuses as aligned `<glyph>  <source>  <destination>` rows.
#[must_use]
pub fn render_rows(statuses: &[LinkStatus], fancy: bool) -> Vec<String> {
    let glyph_width = statuses
        .iter()
        .map(|s| visible_glyph_width(s.exists, fancy))
        .max()
        .unwrap_or(0);
    let sources: Vec<String> = statuses
        .iter()
        .map(|s| s.source.display().to_string())
        .collect();
    let source_width = sources.iter().map(|s| s.chars().count()).max().unwrap_or(0);

    statuses
        .iter()
        .zip(&sources)
        .map(|(status, source)| {
            let glyph_pad = glyph_width.saturating_sub(visible_glyph_width(status.exists, fancy));
            format!(
                "{}{}  {source:<source_width$}  {}",
                status_glyph(status.exists, fancy),
                " ".repeat(glyph_pad),
                status.destination.display()
            )
        })
        .collect()
}

/// Width of the glyph as shown on the terminal, ignoring color codes.
fn visible_glyph_width(exists: bool, fancy: bool) -> usize {
    if fancy {
        1
    } else {
        exists.to_string().len()
    }
}

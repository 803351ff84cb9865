//! Link reconciliation: compare annotations against the filesystem and act.
//!
//! Every pair is handled on its own.  A pair whose preconditions do not hold
//! produces one warning and is skipped; the remaining pairs are still
//! processed, and the action as a whole still succeeds.
use std::path::{Path, PathBuf};

use crate::error::{DotlinkError, ReconcileError, ScanError};
use crate::logging::Log;
use crate::platform::Platform;
use crate::resources::link::{LinkMode, LinkResource};
use crate::resources::{Applicable, Resource, ResourceChange, ResourceState, SkipReason};
use crate::scanner::Annotation;

/// One row of the `list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStatus {
    /// Whether anything is at the destination.
    pub exists: bool,
    /// Source path relative to the registered root.
    pub source: PathBuf,
    /// Absolute destination path.
    pub destination: PathBuf,
}

/// Outcome of an activate or deactivate pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Pairs whose link was created or removed (or would be, in dry-run).
    pub changed: Vec<Annotation>,
    /// Pairs left alone, with the reason.
    pub skipped: Vec<(Annotation, SkipReason)>,
}

/// Applies one reconciliation action to a stream of annotations.
pub struct Reconciler<'a> {
    mode: LinkMode,
    log: &'a dyn Log,
    dry_run: bool,
    skip_unreadable: bool,
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("mode", &self.mode)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("skip_unreadable", &self.skip_unreadable)
            .finish()
    }
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler for `platform`.
    #[must_use]
    pub const fn new(platform: &Platform, log: &'a dyn Log) -> Self {
        Self {
            mode: LinkMode::for_platform(platform),
            log,
            dry_run: false,
            skip_unreadable: false,
        }
    }

    /// Preview changes instead of applying them.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Warn about and skip unreadable source files instead of failing.
    #[must_use]
    pub const fn skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Report the destination state of every annotation, sorted by
    /// `(source, destination)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read and unreadable files
    /// are not being skipped.
    pub fn list<I>(&self, root: &Path, annotations: I) -> Result<Vec<LinkStatus>, DotlinkError>
    where
        I: IntoIterator<Item = Result<Annotation, ScanError>>,
    {
        let mut pairs = Vec::new();
        self.for_each(annotations, |annotation| {
            pairs.push(annotation);
            Ok(())
        })?;
        pairs.sort();

        Ok(pairs
            .into_iter()
            .map(|annotation| {
                let link = self.link(&annotation);
                let state = link.current_state();
                if let ResourceState::Incorrect { current } = &state {
                    self.log
                        .debug(&format!("{}: {current}", annotation.destination.display()));
                }
                let source = annotation
                    .source
                    .strip_prefix(root)
                    .map_or_else(|_| annotation.source.clone(), Path::to_path_buf);
                LinkStatus {
                    exists: state.is_present(),
                    source,
                    destination: annotation.destination,
                }
            })
            .collect())
    }

    /// Create a link for every annotation whose destination is free.
    ///
    /// # Errors
    ///
    /// Returns an error if a destination's parent directory cannot be
    /// created, or a source file cannot be read and unreadable files are not
    /// being skipped.  Pairs processed before the error keep their links.
    pub fn activate<I>(&self, annotations: I) -> Result<ReconcileReport, DotlinkError>
    where
        I: IntoIterator<Item = Result<Annotation, ScanError>>,
    {
        let mut report = ReconcileReport::default();

        self.for_each(annotations, |annotation| {
            let link = self.link(&annotation);
            let change = if self.dry_run {
                link.activation_blocker().map_or_else(
                    || {
                        self.log
                            .dry_run(&format!("would link {}", link.description()));
                        ResourceChange::Applied
                    },
                    |reason| ResourceChange::Skipped { reason },
                )
            } else {
                link.apply()?
            };
            self.record(&link, annotation, change, "linked", &mut report);
            Ok(())
        })?;

        let verb = if self.dry_run { "would link" } else { "linked" };
        self.log.info(&format!(
            "{} {verb}, {} skipped",
            report.changed.len(),
            report.skipped.len()
        ));
        Ok(report)
    }

    /// Remove the link of every annotation whose destination is a link.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read and unreadable files
    /// are not being skipped.
    pub fn deactivate<I>(&self, annotations: I) -> Result<ReconcileReport, DotlinkError>
    where
        I: IntoIterator<Item = Result<Annotation, ScanError>>,
    {
        let mut report = ReconcileReport::default();

        self.for_each(annotations, |annotation| {
            let link = self.link(&annotation);
            let change = if self.dry_run {
                link.deactivation_blocker().map_or_else(
                    || {
                        self.log
                            .dry_run(&format!("would remove {}", link.destination.display()));
                        ResourceChange::Applied
                    },
                    |reason| ResourceChange::Skipped { reason },
                )
            } else {
                link.remove()?
            };
            self.record(&link, annotation, change, "removed", &mut report);
            Ok(())
        })?;

        let verb = if self.dry_run { "would remove" } else { "removed" };
        self.log.info(&format!(
            "{} {verb}, {} skipped",
            report.changed.len(),
            report.skipped.len()
        ));
        Ok(report)
    }

    fn link(&self, annotation: &Annotation) -> LinkResource {
        LinkResource::new(
            annotation.source.clone(),
            annotation.destination.clone(),
            self.mode,
        )
    }

    fn record(
        &self,
        link: &LinkResource,
        annotation: Annotation,
        change: ResourceChange,
        verb: &str,
        report: &mut ReconcileReport,
    ) {
        match change {
            ResourceChange::Applied => {
                if !self.dry_run {
                    self.log.debug(&format!("{verb} {}", link.description()));
                }
                report.changed.push(annotation);
            }
            ResourceChange::Skipped { reason } => {
                self.log.warn(&link.skip_message(&reason));
                report.skipped.push((annotation, reason));
            }
        }
    }

    /// Feed every readable annotation to `f`, handling scan errors per the
    /// unreadable-file policy.
    fn for_each<I, F>(&self, annotations: I, mut f: F) -> Result<(), DotlinkError>
    where
        I: IntoIterator<Item = Result<Annotation, ScanError>>,
        F: FnMut(Annotation) -> Result<(), ReconcileError>,
    {
        for item in annotations {
            match item {
                Ok(annotation) => f(annotation)?,
                Err(e) if self.skip_unreadable => self.log.warn(&e.to_string()),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

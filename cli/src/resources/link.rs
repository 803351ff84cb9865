//! Link resource: one destination path backed by one source file.
use std::path::{Path, PathBuf};

use super::helpers::fs::{create_symlink, ensure_parent_dir, entry_exists, is_symlink, remove_link};
use super::{Applicable, Resource, ResourceChange, ResourceState, SkipReason};
use crate::error::ReconcileError;
use crate::platform::Platform;

/// How a link is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// A symbolic link pointing at the source.
    Symlink,
    /// A byte-for-byte copy of the source.
    Copy,
}

impl LinkMode {
    /// The mode the platform supports.
    #[must_use]
    pub const fn for_platform(platform: &Platform) -> Self {
        if platform.supports_symlinks() {
            Self::Symlink
        } else {
            Self::Copy
        }
    }
}

/// A link resource that can be checked, applied, and removed.
#[derive(Debug, Clone)]
pub struct LinkResource {
    /// The annotated file (what the link points to).
    pub source: PathBuf,
    /// Where the link lives.
    pub destination: PathBuf,
    /// Symlink or copy.
    pub mode: LinkMode,
}

impl LinkResource {
    /// Create a new link resource.
    #[must_use]
    pub const fn new(source: PathBuf, destination: PathBuf, mode: LinkMode) -> Self {
        Self {
            source,
            destination,
            mode,
        }
    }

    /// The first precondition for creating this link that does not hold.
    #[must_use]
    pub fn activation_blocker(&self) -> Option<SkipReason> {
        if !self.source.exists() {
            Some(SkipReason::SourceMissing)
        } else if is_symlink(&self.source) {
            Some(SkipReason::SourceIsSymlink)
        } else if entry_exists(&self.destination) {
            Some(SkipReason::DestinationExists)
        } else {
            None
        }
    }

    /// The first precondition for removing this link that does not hold.
    #[must_use]
    pub fn deactivation_blocker(&self) -> Option<SkipReason> {
        if !entry_exists(&self.destination) {
            Some(SkipReason::DestinationMissing)
        } else if self.mode == LinkMode::Symlink && !is_symlink(&self.destination) {
            Some(SkipReason::DestinationNotSymlink)
        } else {
            None
        }
    }

    /// The warning line for a skipped link, naming the path the reason is about.
    #[must_use]
    pub fn skip_message(&self, reason: &SkipReason) -> String {
        let subject: &Path = match reason {
            SkipReason::SourceMissing | SkipReason::SourceIsSymlink => &self.source,
            _ => &self.destination,
        };
        format!("{}: {reason}", subject.display())
    }

    fn materialize(&self) -> std::io::Result<()> {
        match self.mode {
            LinkMode::Symlink => create_symlink(&self.source, &self.destination),
            LinkMode::Copy => std::fs::copy(&self.source, &self.destination).map(|_| ()),
        }
    }
}

impl Applicable for LinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.destination.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange, ReconcileError> {
        if let Some(reason) = self.activation_blocker() {
            return Ok(ResourceChange::Skipped { reason });
        }

        ensure_parent_dir(&self.destination).map_err(|source| ReconcileError::CreateDir {
            path: self
                .destination
                .parent()
                .map_or_else(|| self.destination.clone(), Path::to_path_buf),
            source,
        })?;

        match self.materialize() {
            Ok(()) => Ok(ResourceChange::Applied),
            Err(e) => Ok(ResourceChange::Skipped {
                reason: SkipReason::Io(format!("cannot create link: {e}")),
            }),
        }
    }

    fn remove(&self) -> Result<ResourceChange, ReconcileError> {
        if let Some(reason) = self.deactivation_blocker() {
            return Ok(ResourceChange::Skipped { reason });
        }

        match remove_link(&self.destination) {
            Ok(()) => Ok(ResourceChange::Applied),
            Err(e) => Ok(ResourceChange::Skipped {
                reason: SkipReason::Io(format!("cannot remove link: {e}")),
            }),
        }
    }
}

impl Resource for LinkResource {
    fn current_state(&self) -> ResourceState {
        if !entry_exists(&self.destination) {
            return ResourceState::Missing;
        }

        match std::fs::read_link(&self.destination) {
            Ok(existing) if existing == self.source => ResourceState::Correct,
            Ok(existing) => ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            },
            Err(_) if self.mode == LinkMode::Copy && self.destination.is_file() => {
                ResourceState::Correct
            }
            Err(_) => ResourceState::Incorrect {
                current: "not a symbolic link".to_string(),
            },
        }
    }
}

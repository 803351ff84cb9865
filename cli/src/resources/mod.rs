//! Idempotent resource primitives (check + apply pattern).
pub mod helpers;
pub mod link;

use std::fmt;

use crate::error::ReconcileError;

/// Minimal interface for resources that can be described, applied, and removed.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Bring the resource into existence.
    ///
    /// Preconditions that do not hold produce [`ResourceChange::Skipped`]
    /// rather than an error, so callers can warn and move on.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures that leave the tool unable to
    /// continue (e.g. a parent directory that cannot be created).
    fn apply(&self) -> Result<ResourceChange, ReconcileError>;

    /// Undo a previous [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// Returns an error only for unrecoverable failures.
    fn remove(&self) -> Result<ResourceChange, ReconcileError>;
}

/// Resources that can inspect their own state.
pub trait Resource: Applicable {
    /// Check the current state of the resource without modifying anything.
    fn current_state(&self) -> ResourceState;
}

/// Observed state of a resource.
///
/// # Examples
///
/// ```
/// use dotlink::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Incorrect { current: "points to /elsewhere".into() };
///
/// assert!(!missing.is_present());
/// assert!(wrong.is_present());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the resource location.
    Missing,
    /// The resource exists and matches the desired state.
    Correct,
    /// Something exists at the location but does not match.
    Incorrect {
        /// Description of what is there instead.
        current: String,
    },
}

impl ResourceState {
    /// Whether anything occupies the resource location.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}

/// Result of applying or removing a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The filesystem was changed.
    Applied,
    /// Nothing was changed.
    Skipped {
        /// Why the resource was left alone.
        reason: SkipReason,
    },
}

/// Why a single link was not created or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The annotated source file is gone.
    SourceMissing,
    /// The source is itself a symlink; linking to it would chain links.
    SourceIsSymlink,
    /// Something already occupies the destination.
    DestinationExists,
    /// Nothing is at the destination to remove.
    DestinationMissing,
    /// The destination is a real file, not a link this tool created.
    DestinationNotSymlink,
    /// The filesystem call itself failed.
    Io(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceMissing => write!(f, "source file does not exist"),
            Self::SourceIsSymlink => write!(f, "source file is a symbolic link"),
            Self::DestinationExists => write!(f, "already exists"),
            Self::DestinationMissing => write!(f, "does not exist"),
            Self::DestinationNotSymlink => write!(f, "is not a symbolic link"),
            Self::Io(msg) => write!(f, "{msg}"),
        }
    }
}

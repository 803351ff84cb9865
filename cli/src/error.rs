//! Domain-specific error types for the dotfile linker.
//!
//! Library modules return the typed errors below; command handlers at the
//! CLI boundary convert them to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DotlinkError
//! ├── Config(ConfigError)       : config file loading, home resolution
//! ├── Registry(RegistryError)   : source registration record
//! ├── Scan(ScanError)           : annotation scanning
//! └── Reconcile(ReconcileError) : unrecoverable link reconciliation failures
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the dotfile linker.
#[derive(Error, Debug)]
pub enum DotlinkError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Source registry error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Annotation scan error.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Link reconciliation error.
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// Errors that arise while building the runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("cannot determine home directory: {0} is not set")]
    NoHome(&'static str),

    /// The config file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or contains unknown keys.
    #[error("Invalid config file {path}: {message}")]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors raised by the source registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The path given to `source` does not exist.
    #[error("source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// A registration record is already present.
    #[error("{0} already exists; delete it first to register a different source")]
    AlreadyRegistered(PathBuf),

    /// No registration record is present.
    #[error("{0} does not exist; register a source directory first with `dotlink source <path>`")]
    NotRegistered(PathBuf),

    /// The registration record could not be read or written.
    #[error("IO error on registry {path}: {source}")]
    Io {
        /// Registry location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised while scanning the source tree for annotations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A candidate file could not be opened or decoded as UTF-8 text.
    #[error("cannot read {path} as text: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error (`InvalidData` for non-UTF-8 content).
        source: std::io::Error,
    },
}

/// Unrecoverable errors during reconciliation.
///
/// Per-pair conditions are warnings, not errors; only failures that leave the
/// tool unable to continue end up here.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Creating the destination's parent directories failed for a reason
    /// other than the directory already existing.
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

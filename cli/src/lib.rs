//! Annotation-driven dotfile linker.
//!
//! Any file in a registered source tree may carry a marker such as
//! `# dotfile @ ~/.bashrc`.  `dotlink` scans the tree for these markers and
//! creates (or removes) a symlink at each destination pointing back at the
//! annotated file.  Without symlink support the file is copied instead.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: runtime settings loaded once from `config.toml`
//! - **[`registry`]**: the single record naming the source directory
//! - **[`scanner`]**: lazy walk of the source tree yielding annotations
//! - **[`resources`]**: idempotent `check + apply` primitive for one link
//! - **[`reconcile`]**: list, activate, and deactivate over all annotations
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod reconcile;
pub mod registry;
pub mod resources;
pub mod scanner;
pub mod style;

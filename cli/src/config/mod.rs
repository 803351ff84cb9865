//! Runtime configuration, built once at startup and never mutated.
pub mod paths;
pub mod toml_loader;

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Directory names pruned from the scan by default.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// File name suffixes skipped by the scan by default.
pub const DEFAULT_IGNORE_SUFFIXES: &[&str] = &[".swp", ".swo", "~", ".bak", ".orig", ".pyc"];

/// Registry location relative to the home directory.
pub const DEFAULT_REGISTRY: &str = ".dotlink";

/// On-disk shape of `config.toml`.  Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    registry: Option<String>,
    ignore_dirs: Option<Vec<String>>,
    ignore_suffixes: Option<Vec<String>>,
    skip_unreadable: Option<bool>,
}

/// Immutable settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// User's home directory; destination annotations expand `~` against it.
    pub home: PathBuf,
    /// Location of the source registration record.
    pub registry: PathBuf,
    /// Directory names never descended into (exact match).
    pub ignore_dirs: BTreeSet<String>,
    /// File name suffixes never scanned.
    pub ignore_suffixes: Vec<String>,
    /// Downgrade unreadable files from a fatal error to a warning.
    pub skip_unreadable: bool,
}

impl Config {
    /// Built-in configuration for `home`.
    #[must_use]
    pub fn defaults(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            registry: home.join(DEFAULT_REGISTRY),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(ToString::to_string).collect(),
            ignore_suffixes: DEFAULT_IGNORE_SUFFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            skip_unreadable: false,
        }
    }

    /// Load configuration from `path`, layering its keys over the defaults.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(home: &Path, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml_loader::load_config(path)?;
        let mut config = Self::defaults(home);

        if let Some(registry) = file.registry {
            config.registry = paths::expand_home(&registry, home);
        }
        if let Some(dirs) = file.ignore_dirs {
            config.ignore_dirs = dirs.into_iter().collect();
        }
        if let Some(suffixes) = file.ignore_suffixes {
            config.ignore_suffixes = suffixes;
        }
        if let Some(skip) = file.skip_unreadable {
            config.skip_unreadable = skip;
        }
        Ok(config)
    }

    /// Whether a directory with this name is pruned from the scan.
    #[must_use]
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }

    /// Whether a file with this name is skipped by the scan.
    #[must_use]
    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignore_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

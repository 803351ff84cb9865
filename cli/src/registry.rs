//! Source registry: the single record naming the directory to scan.
//!
//! The record lives at a fixed location (`~/.dotlink` by default).  Where
//! symlinks work it is a symlink to the source directory; elsewhere it is a
//! text file holding the absolute path.
use std::io;
use std::path::{Path, PathBuf};

use crate::error::RegistryError;
use crate::logging::Log;
use crate::platform::Platform;
use crate::resources::helpers::fs::{create_symlink, ensure_parent_dir, entry_exists};

/// Reads and writes the source registration record.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    location: PathBuf,
    home: PathBuf,
    platform: Platform,
}

impl SourceRegistry {
    /// Create a registry handle for the record at `location`.
    #[must_use]
    pub fn new(location: &Path, home: &Path, platform: Platform) -> Self {
        Self {
            location: location.to_path_buf(),
            home: home.to_path_buf(),
            platform,
        }
    }

    /// Where the record lives.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Record `path` as the source directory and return its absolute form.
    ///
    /// A leading `~` is expanded; a relative path is resolved against the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SourceNotFound`] if `path` does not exist,
    /// [`RegistryError::AlreadyRegistered`] if a record is already present,
    /// and [`RegistryError::Io`] if the record cannot be written.  No
    /// existing record is modified on any error.
    pub fn register(&self, path: &Path) -> Result<PathBuf, RegistryError> {
        let source = self.absolutize(path)?;
        if !source.exists() {
            return Err(RegistryError::SourceNotFound(source));
        }
        if entry_exists(&self.location) {
            return Err(RegistryError::AlreadyRegistered(self.location.clone()));
        }

        ensure_parent_dir(&self.location).map_err(|e| self.io_error(e))?;
        if self.platform.supports_symlinks() {
            create_symlink(&source, &self.location)
        } else {
            std::fs::write(&self.location, source.to_string_lossy().as_bytes())
        }
        .map_err(|e| self.io_error(e))?;

        Ok(source)
    }

    /// Return the registered source directory.
    ///
    /// A record that is a regular file on a symlink-capable platform is
    /// accepted with a warning.  An empty text record resolves to the
    /// record's own location.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if there is no record and
    /// [`RegistryError::Io`] if it cannot be read.
    pub fn read(&self, log: &dyn Log) -> Result<PathBuf, RegistryError> {
        let meta = match std::fs::symlink_metadata(&self.location) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RegistryError::NotRegistered(self.location.clone()));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if meta.is_symlink() {
            let target = std::fs::read_link(&self.location).map_err(|e| self.io_error(e))?;
            return Ok(self.anchor(target));
        }

        if self.platform.supports_symlinks() {
            log.warn(&format!(
                "{} is not a symbolic link (it may have been created manually or copied from another platform)",
                self.location.display()
            ));
        }

        let content = std::fs::read_to_string(&self.location).map_err(|e| self.io_error(e))?;
        let content = content.trim();
        if content.is_empty() {
            Ok(self.location.clone())
        } else {
            Ok(PathBuf::from(content))
        }
    }

    fn absolutize(&self, path: &Path) -> Result<PathBuf, RegistryError> {
        if let Ok(rest) = path.strip_prefix("~") {
            return Ok(if rest.as_os_str().is_empty() {
                self.home.clone()
            } else {
                self.home.join(rest)
            });
        }
        std::path::absolute(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve a relative symlink target against the record's directory.
    fn anchor(&self, target: PathBuf) -> PathBuf {
        if target.is_absolute() {
            return target;
        }
        self.location
            .parent()
            .map_or_else(|| target.clone(), |parent| parent.join(&target))
    }

    fn io_error(&self, source: io::Error) -> RegistryError {
        RegistryError::Io {
            path: self.location.clone(),
            source,
        }
    }
}

//! Top-level subcommand orchestration.
pub mod down;
pub mod list;
pub mod source;
pub mod up;
pub mod version;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::{Config, paths};
use crate::logging::Log;
use crate::platform::Platform;
use crate::reconcile::Reconciler;
use crate::registry::SourceRegistry;

/// Log a failed command's error chain and report whether it succeeded.
///
/// Routing the error through `log` puts it on the console as `error: ...`
/// and in the command's log file.
#[must_use]
pub fn succeeded(result: Result<()>, log: &dyn Log) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log.error(&format!("{e:#}"));
            false
        }
    }
}

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates platform detection, home resolution, and configuration
/// loading so that each command does not have to repeat the boilerplate.
#[derive(Debug, Clone)]
pub struct CommandSetup {
    /// Detected host platform.
    pub platform: Platform,
    /// Loaded configuration.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the home directory, detect the platform, and load the config
    /// file (`--config` or the default location).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// config file exists but fails to parse.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let home = paths::home_dir()?;
        let path = global
            .config
            .clone()
            .unwrap_or_else(|| paths::default_config_path(&home));
        log.debug(&format!("config: {}", path.display()));

        let config = Config::load(&home, &path)?;
        let platform = Platform::detect();
        log.debug(&format!("platform: {}", platform.os));

        Ok(Self::new(platform, config))
    }

    /// Build a setup from explicit parts.
    #[must_use]
    pub const fn new(platform: Platform, config: Config) -> Self {
        Self { platform, config }
    }

    /// Handle on the configured source registry.
    #[must_use]
    pub fn registry(&self) -> SourceRegistry {
        SourceRegistry::new(&self.config.registry, &self.config.home, self.platform)
    }

    /// Read the registered source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no source is registered or the record cannot be
    /// read.
    pub fn source_root(&self, log: &dyn Log) -> Result<PathBuf> {
        let root = self.registry().read(log)?;
        log.debug(&format!("source: {}", root.display()));
        Ok(root)
    }

    /// A reconciler configured for this platform and config.
    #[must_use]
    pub fn reconciler<'a>(&self, dry_run: bool, log: &'a dyn Log) -> Reconciler<'a> {
        Reconciler::new(&self.platform, log)
            .dry_run(dry_run)
            .skip_unreadable(self.config.skip_unreadable)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::logging::MockLog;

    #[test]
    fn success_logs_nothing() {
        let mut log = MockLog::new();
        log.expect_error().never();
        assert!(succeeded(Ok(()), &log));
    }

    #[test]
    fn failure_is_logged_as_error() {
        let mut log = MockLog::new();
        log.expect_error()
            .withf(|m| m.contains("register a source directory first"))
            .times(1)
            .return_const(());

        let err = RegistryError::NotRegistered(PathBuf::from("/home/u/.dotlink"));
        assert!(!succeeded(Err(err.into()), &log));
    }
}

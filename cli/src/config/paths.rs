//! Home directory resolution and `~` expansion.
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Resolve the user's home directory from the environment.
///
/// # Errors
///
/// Returns an error if `HOME` (or `USERPROFILE` on Windows) is not set.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .map(PathBuf::from)
            .map_err(|_| ConfigError::NoHome("USERPROFILE"))
    } else {
        std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| ConfigError::NoHome("HOME"))
    }
}

/// Default config file location: `$XDG_CONFIG_HOME/dotlink/config.toml`,
/// falling back to `~/.config/dotlink/config.toml`.
#[must_use]
pub fn default_config_path(home: &Path) -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map_or_else(|_| home.join(".config"), PathBuf::from)
        .join("dotlink")
        .join("config.toml")
}

/// Expand a leading `~` and anchor the result at `home` unless it is
/// already absolute.
///
/// `~` and `~/rest` resolve against `home`.  `~user` forms are not
/// supported and are treated like any other relative path.
#[must_use]
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return home.join(rest);
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        home.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_alone_is_home() {
        let home = PathBuf::from("/home/user");
        assert_eq!(expand_home("~", &home), home);
    }

    #[test]
    fn tilde_slash_joins_home() {
        let home = PathBuf::from("/home/user");
        assert_eq!(
            expand_home("~/.config/nvim/init.lua", &home),
            PathBuf::from("/home/user/.config/nvim/init.lua")
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolute_is_kept() {
        let home = PathBuf::from("/home/user");
        assert_eq!(expand_home("/etc/hosts", &home), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn relative_resolves_against_home() {
        let home = PathBuf::from("/home/user");
        assert_eq!(
            expand_home(".bashrc", &home),
            PathBuf::from("/home/user/.bashrc")
        );
        assert_eq!(
            expand_home("~other/x", &home),
            PathBuf::from("/home/user/~other/x")
        );
    }

    #[test]
    fn default_config_path_ends_with_dotlink_config() {
        let p = default_config_path(Path::new("/home/user"));
        assert!(p.ends_with("dotlink/config.toml"));
    }
}

//! Annotation scanner: finds `dotfile @ <path>` markers in a source tree.
//!
//! Any file, of any content type, may carry a marker such as
//!
//! ```text
//! # dotfile @ ~/.bashrc
//! " dotfile @ ~/.vimrc
//! ```
//!
//! The first marker in the file decides where the file is linked. Files
//! without a marker are not managed.
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::config::paths::expand_home;
use crate::error::ScanError;
use crate::logging::Log;

#[allow(clippy::expect_used)]
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"dotfile\s+@\s*([^\s'"]+)"#).expect("valid marker regex")
});

/// A source file and the destination it should be linked to.
///
/// Orders by source path, then destination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Annotation {
    /// Absolute path of the annotated file.
    pub source: PathBuf,
    /// Absolute path where the link belongs.
    pub destination: PathBuf,
}

/// Extract the raw destination token of the first marker in `text`.
///
/// # Examples
///
/// ```
/// use dotlink::scanner::parse_marker;
///
/// assert_eq!(parse_marker("# dotfile @ ~/.bashrc"), Some("~/.bashrc"));
/// assert_eq!(parse_marker("no marker here"), None);
/// ```
#[must_use]
pub fn parse_marker(text: &str) -> Option<&str> {
    MARKER_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Walks a source tree and yields its annotations.
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a Config,
    log: &'a dyn Log,
}

impl std::fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> Scanner<'a> {
    /// Create a scanner rooted at `root`.
    #[must_use]
    pub fn new(root: &Path, config: &'a Config, log: &'a dyn Log) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            log,
        }
    }

    /// Lazily walk the tree and yield one item per annotated file.
    ///
    /// Every call starts a fresh walk.  Ignored directories are pruned before
    /// descent; ignored suffixes are skipped without being opened.  A file
    /// that cannot be read as UTF-8 text yields an error item; the walk
    /// itself continues, so the caller decides whether that is fatal.
    /// Traversal order is unspecified.
    pub fn scan(&self) -> impl Iterator<Item = Result<Annotation, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| !self.is_pruned(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    self.log.debug(&format!("skipping unreadable entry: {e}"));
                    None
                }
            })
            .filter(move |entry| self.is_candidate(entry))
            .filter_map(move |entry| self.annotate(entry.path()).transpose())
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .config
                .is_ignored_dir(&entry.file_name().to_string_lossy())
    }

    fn is_candidate(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_dir() {
            return false;
        }
        // A symlink to a directory is a directory for traversal purposes,
        // and is not followed.
        if entry.path_is_symlink() && entry.path().is_dir() {
            return false;
        }
        !self
            .config
            .is_ignored_file(&entry.file_name().to_string_lossy())
    }

    fn annotate(&self, path: &Path) -> Result<Option<Annotation>, ScanError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(parse_marker(&text).map(|raw| Annotation {
            source: path.to_path_buf(),
            destination: expand_home(raw, &self.config.home),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MockLog;

    struct Tree {
        _dir: tempfile::TempDir,
        root: PathBuf,
        config: Config,
        log: MockLog,
    }

    impl Tree {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = dir.path().join("src");
            let home = dir.path().join("home");
            std::fs::create_dir_all(&root).unwrap();
            std::fs::create_dir_all(&home).unwrap();
            let config = Config::defaults(&home);
            let mut log = MockLog::new();
            log.expect_debug().return_const(());
            Self {
                _dir: dir,
                root,
                config,
                log,
            }
        }

        fn file(&self, rel: &str, content: &[u8]) -> PathBuf {
            let path = self.root.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, content).unwrap();
            path
        }

        fn scan_sorted(&self) -> Vec<Annotation> {
            let mut found: Vec<Annotation> = Scanner::new(&self.root, &self.config, &self.log)
                .scan()
                .collect::<Result<_, _>>()
                .unwrap();
            found.sort();
            found
        }
    }

    #[test]
    fn parse_marker_variants() {
        assert_eq!(parse_marker("dotfile @~/.x"), Some("~/.x"));
        assert_eq!(parse_marker("dotfile\t@\t/etc/x"), Some("/etc/x"));
        assert_eq!(parse_marker("  <!-- dotfile @ ~/.y -->"), Some("~/.y"));
        assert_eq!(parse_marker("dotfile@ ~/.x"), None);
        assert_eq!(parse_marker("dotfile @ "), None);
    }

    #[test]
    fn parse_marker_stops_at_quotes() {
        assert_eq!(parse_marker("x = \"dotfile @ ~/.gitconfig\""), Some("~/.gitconfig"));
        assert_eq!(parse_marker("'dotfile @ ~/.inputrc'"), Some("~/.inputrc"));
    }

    #[test]
    fn parse_marker_first_match_wins() {
        let text = "# dotfile @ ~/.first\n# dotfile @ ~/.second\n";
        assert_eq!(parse_marker(text), Some("~/.first"));
    }

    #[test]
    fn scan_expands_home() {
        let tree = Tree::new();
        let vimrc = tree.file("vimrc", b"\" dotfile @ ~/.vimrc\nset nu\n");

        let found = tree.scan_sorted();

        assert_eq!(
            found,
            vec![Annotation {
                source: vimrc,
                destination: tree.config.home.join(".vimrc"),
            }]
        );
    }

    #[test]
    fn scan_ignores_files_without_marker() {
        let tree = Tree::new();
        tree.file("README", b"just text");
        assert!(tree.scan_sorted().is_empty());
    }

    #[test]
    fn scan_takes_first_of_two_markers() {
        let tree = Tree::new();
        tree.file("profile", b"# dotfile @ ~/.profile\n# dotfile @ ~/.bash_profile\n");
        let found = tree.scan_sorted();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].destination, tree.config.home.join(".profile"));
    }

    #[test]
    fn scan_descends_into_subdirectories() {
        let tree = Tree::new();
        let init = tree.file("nvim/lua/init.lua", b"-- dotfile @ ~/.config/nvim/init.lua");
        let found = tree.scan_sorted();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source, init);
        assert_eq!(
            found[0].destination,
            tree.config.home.join(".config/nvim/init.lua")
        );
    }

    #[test]
    fn scan_prunes_ignored_directories() {
        let tree = Tree::new();
        tree.file(".git/hooks/post-commit", b"# dotfile @ ~/.hidden");
        tree.file("nested/.git/config", b"# dotfile @ ~/.also-hidden");
        let kept = tree.file("gitconfig", b"# dotfile @ ~/.gitconfig");

        let found = tree.scan_sorted();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source, kept);
    }

    #[test]
    fn scan_prunes_by_exact_name_only() {
        let tree = Tree::new();
        tree.file(".github/settings", b"# dotfile @ ~/.settings");
        assert_eq!(tree.scan_sorted().len(), 1);
    }

    #[test]
    fn pruned_directories_are_never_read() {
        let tree = Tree::new();
        // Would be a fatal read error if the scanner opened it.
        tree.file(".hg/store/blob", &[0xff, 0xfe, 0x00]);
        assert!(tree.scan_sorted().is_empty());
    }

    #[test]
    fn scan_skips_ignored_suffixes() {
        let tree = Tree::new();
        tree.file("vimrc.swp", b"\" dotfile @ ~/.vimrc");
        tree.file("bashrc~", b"# dotfile @ ~/.bashrc");
        tree.file("binary.pyc", &[0xff, 0xfe]);
        assert!(tree.scan_sorted().is_empty());
    }

    #[test]
    fn scan_yields_error_for_non_utf8_file() {
        let tree = Tree::new();
        let blob = tree.file("image.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
        tree.file("bashrc", b"# dotfile @ ~/.bashrc");

        let results: Vec<_> = Scanner::new(&tree.root, &tree.config, &tree.log).scan().collect();

        assert_eq!(results.len(), 2);
        let err = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("one error");
        assert!(matches!(err, ScanError::Read { path, .. } if *path == blob));
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    }

    #[test]
    fn scan_is_restartable() {
        let tree = Tree::new();
        tree.file("bashrc", b"# dotfile @ ~/.bashrc");
        let scanner = Scanner::new(&tree.root, &tree.config, &tree.log);

        assert_eq!(scanner.scan().count(), 1);
        tree.file("zshrc", b"# dotfile @ ~/.zshrc");
        assert_eq!(scanner.scan().count(), 2);
    }

    #[test]
    fn walk_errors_are_logged_and_skipped() {
        let tree = Tree::new();
        let missing = tree.root.join("not-there");
        let mut log = MockLog::new();
        log.expect_debug()
            .withf(|m| m.starts_with("skipping unreadable entry"))
            .times(1)
            .return_const(());

        let results: Vec<_> = Scanner::new(&missing, &tree.config, &log).scan().collect();

        assert!(results.is_empty());
    }

    #[test]
    fn scan_respects_configured_ignores() {
        let mut tree = Tree::new();
        tree.config.ignore_dirs = std::iter::once("private".to_string()).collect();
        tree.config.ignore_suffixes = vec![".local".to_string()];
        tree.file("private/token", b"# dotfile @ ~/.token");
        tree.file("bashrc.local", b"# dotfile @ ~/.bashrc.local");
        tree.file(".git/x", b"# dotfile @ ~/.x");

        let found = tree.scan_sorted();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].destination, tree.config.home.join(".x"));
    }

    #[cfg(unix)]
    #[test]
    fn scan_does_not_follow_directory_symlinks() {
        let tree = Tree::new();
        let outside = tree.root.parent().unwrap().join("outside");
        std::fs::create_dir_all(&outside).unwrap();
        std::fs::write(outside.join("rc"), "# dotfile @ ~/.outside").unwrap();
        std::os::unix::fs::symlink(&outside, tree.root.join("linked")).unwrap();

        assert!(tree.scan_sorted().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn scan_yields_symlinked_files() {
        let tree = Tree::new();
        let real = tree.file("real", b"# dotfile @ ~/.real");
        let alias = tree.root.join("alias");
        std::os::unix::fs::symlink(&real, &alias).unwrap();

        let found = tree.scan_sorted();

        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|a| a.source == alias));
    }
}

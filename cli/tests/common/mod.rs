// Shared helpers for integration tests.
//
// Provides an isolated source tree and home directory backed by a temporary
// directory, plus a recording logger, so each integration test can drive the
// commands end to end without touching the real home directory.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use dotlink::commands::CommandSetup;
use dotlink::config::Config;
use dotlink::logging::Log;
use dotlink::platform::{Os, Platform};

/// Log sink that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: &'static str, msg: &str) {
        self.entries.borrow_mut().push((level, msg.to_string()));
    }

    /// All messages logged at `level`.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at("warn")
    }
}

impl Log for RecordingLog {
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }

    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }

    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
}

/// An isolated source tree and home directory.
///
/// Both are deleted when the context is dropped.
pub struct IntegrationTestContext {
    dir: tempfile::TempDir,
    pub source: PathBuf,
    pub home: PathBuf,
    pub setup: CommandSetup,
}

impl IntegrationTestContext {
    /// Context for the host platform.
    pub fn new() -> Self {
        Self::for_platform(Platform::detect())
    }

    /// Context for an explicit platform, e.g. `Os::Windows` to exercise the
    /// copy fallback on any host.
    pub fn for_platform(platform: Platform) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let source = dir.path().join("dotfiles");
        let home = dir.path().join("home");
        std::fs::create_dir_all(&source).expect("create source dir");
        std::fs::create_dir_all(&home).expect("create home dir");
        let setup = CommandSetup::new(platform, Config::defaults(&home));
        Self {
            dir,
            source,
            home,
            setup,
        }
    }

    pub fn copy_mode() -> Self {
        Self::for_platform(Platform::new(Os::Windows))
    }

    pub fn temp_path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel` under the source tree, creating parents.
    pub fn write_source(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.source.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        std::fs::write(&path, content).expect("write source file");
        path
    }

    /// Register the source tree.
    pub fn register(&self) {
        dotlink::commands::source::execute(&self.setup, &self.source, &RecordingLog::new())
            .expect("register source");
    }
}

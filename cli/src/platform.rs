//! Host capability probe.
use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
    /// Any other Unix-like system.
    Other,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether the filesystem supports symbolic links.
    ///
    /// Windows only allows unprivileged symlinks in developer mode, so it is
    /// treated as unsupported and links fall back to plain copies.
    #[must_use]
    pub const fn supports_symlinks(&self) -> bool {
        !matches!(self.os, Os::Windows)
    }

    /// Whether ANSI color output should be emitted.
    #[must_use]
    pub const fn supports_color(&self) -> bool {
        self.supports_symlinks()
    }

    /// Whether non-ASCII status glyphs should be emitted.
    #[must_use]
    pub const fn supports_fancy_glyphs(&self) -> bool {
        self.supports_symlinks()
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "linux") {
            Os::Linux
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            Os::Other
        }
    }
}

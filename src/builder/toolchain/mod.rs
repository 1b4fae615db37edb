//! Host toolchain detection.
//!
//! Detection answers three questions about the host:
//! 1. Which Visual Studio generations are installed (install marker files)
//! 2. Which platform identifier applies (`MSVC`, else `uname -s`)
//! 3. Which generator drivers are on PATH (`xcrun`, `ninja`, `gmake`/`make`)
//!
//! All host queries go through [`Host`] so detection can run against a fake
//! host in tests.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::process::{find_executable, ProcessBuilder};

mod detect;
mod msvc;

pub use detect::detect;
pub use msvc::VisualStudio;

/// Platform identifier reported whenever any Visual Studio is installed.
pub const MSVC_PLATFORM: &str = "MSVC";

/// Facts detected about the host. Computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainInfo {
    /// `MSVC` or the trimmed output of `uname -s`
    pub platform: String,
    /// Installed Visual Studio generations, newest first
    pub visual_studio: Vec<VisualStudio>,
    /// `xcrun` is on PATH
    pub xcode: bool,
    /// `ninja` is on PATH
    pub ninja: bool,
    /// Usable make driver (`gmake` or `make`).
    ///
    /// Informational only: shown by `conductor detect`. Stages never invoke
    /// it; `cmake --build` drives whichever native tool the generator chose.
    pub make: Option<String>,
}

impl ToolchainInfo {
    /// Newest installed Visual Studio generation.
    pub fn newest_visual_studio(&self) -> Option<VisualStudio> {
        self.visual_studio.first().copied()
    }

    pub fn is_msvc(&self) -> bool {
        self.platform == MSVC_PLATFORM
    }

    pub fn is_darwin(&self) -> bool {
        self.platform == "Darwin"
    }
}

/// Read-only view of the host used by detection.
pub trait Host {
    /// Whether a file or directory exists.
    fn path_exists(&self, path: &Path) -> bool;

    /// Locate an executable on the search path.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Run `uname -s` through the given executable and return its stdout.
    fn uname(&self, uname: &Path) -> Result<String>;
}

/// The real host: the filesystem, the `PATH` search and subprocesses.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        find_executable(name)
    }

    fn uname(&self, uname: &Path) -> Result<String> {
        let output = ProcessBuilder::new(uname).arg("-s").exec_and_check()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

//! IDE project discovery and launch.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::toolchain::ToolchainInfo;
use crate::core::Error;
use crate::util::fs::last_match;
use crate::util::process::ProcessBuilder;

/// Project file patterns, in the order they are tried.
pub const PROJECT_PATTERNS: [&str; 2] = ["*.xcodeproj", "*.sln"];

/// Find the generated IDE project in `build_dir`.
///
/// Tries each pattern in turn and takes the last match of the first
/// pattern that matches anything.
pub fn find_project(build_dir: &Path) -> Result<PathBuf> {
    for pattern in PROJECT_PATTERNS {
        if let Some(project) = last_match(build_dir, pattern)? {
            return Ok(project);
        }
    }

    Err(Error::Discovery {
        dir: build_dir.to_path_buf(),
    }
    .into())
}

/// Platform-specific "open this file" action.
pub trait IdeLauncher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Command that opens `project` in its associated application.
    fn open_command(&self, project: &Path) -> ProcessBuilder;
}

/// macOS `open`.
#[derive(Debug, Default)]
pub struct OpenLauncher;

impl IdeLauncher for OpenLauncher {
    fn name(&self) -> &'static str {
        "open"
    }

    fn open_command(&self, project: &Path) -> ProcessBuilder {
        ProcessBuilder::new("open").arg(project)
    }
}

/// Windows `start`, a `cmd` builtin.
#[derive(Debug, Default)]
pub struct StartLauncher;

impl IdeLauncher for StartLauncher {
    fn name(&self) -> &'static str {
        "start"
    }

    fn open_command(&self, project: &Path) -> ProcessBuilder {
        // The empty argument is the window title; without it a quoted path
        // would be taken as the title.
        ProcessBuilder::new("cmd")
            .args(["/C", "start", ""])
            .arg(project)
    }
}

/// freedesktop `xdg-open`.
#[derive(Debug, Default)]
pub struct XdgOpenLauncher;

impl IdeLauncher for XdgOpenLauncher {
    fn name(&self) -> &'static str {
        "xdg-open"
    }

    fn open_command(&self, project: &Path) -> ProcessBuilder {
        ProcessBuilder::new("xdg-open").arg(project)
    }
}

/// Pick the launcher for the detected platform.
pub fn launcher_for(info: &ToolchainInfo) -> Box<dyn IdeLauncher> {
    if info.is_msvc() || info.platform.starts_with("MINGW") || info.platform.starts_with("CYGWIN")
    {
        Box::new(StartLauncher)
    } else if info.is_darwin() {
        Box::new(OpenLauncher)
    } else {
        Box::new(XdgOpenLauncher)
    }
}

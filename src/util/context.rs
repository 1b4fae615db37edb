//! Global context for Conductor operations.
//!
//! Computed once at startup and passed by reference afterwards; nothing in
//! the crate reads the working directory or config files on its own.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_path, load_config, project_config_path, Config};
use crate::util::shell::Shell;

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Source root; build directories are created directly beneath it
    root: PathBuf,

    /// Merged configuration
    config: Config,

    /// Status output
    shell: Shell,
}

impl GlobalContext {
    /// Create a context rooted at the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_root(cwd))
    }

    /// Create a context rooted at `root`, loading its configuration.
    pub fn with_root(root: PathBuf) -> Self {
        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(&root));

        GlobalContext {
            root,
            config,
            shell: Shell::default(),
        }
    }

    /// Create a context with an explicit configuration.
    pub fn with_config(root: PathBuf, config: Config) -> Self {
        GlobalContext {
            root,
            config,
            shell: Shell::default(),
        }
    }

    /// Replace the shell, typically with one built from CLI flags.
    pub fn set_shell(&mut self, shell: Shell) {
        self.shell = shell;
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

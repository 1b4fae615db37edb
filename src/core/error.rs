//! Error taxonomy for orchestration runs.
//!
//! Every variant is fatal: the run stops at the first error and the
//! process exits with [`Error::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

/// Exit code used for detection and discovery failures.
pub const FATAL_EXIT_CODE: i32 = 2;

/// Error raised while detecting the host or running a stage.
#[derive(Debug, Error)]
pub enum Error {
    /// No platform identifier could be determined.
    #[error("unknown platform: {reason}")]
    Detection { reason: String },

    /// An external tool could not be located on the search path.
    #[error("`{tool}` not found on PATH")]
    ToolNotFound { tool: String },

    /// An external tool exited unsuccessfully.
    #[error("{stage} failed for `{configuration}`: `{tool}` exited with {}", display_code(.code))]
    ToolFailed {
        tool: String,
        stage: String,
        configuration: String,
        code: Option<i32>,
    },

    /// No IDE project file was found in the build directory.
    #[error("no known project file found in {}", .dir.display())]
    Discovery { dir: PathBuf },

    #[error("invalid configuration id `{id}`: {reason}")]
    InvalidConfigurationId { id: String, reason: &'static str },

    /// A toolchain family produced no configurations.
    #[error("no build configurations were selected for this host")]
    EmptyMatrix,
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Tool failures forward the tool's own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolFailed { code, .. } => match code {
                Some(0) | None => 1,
                Some(code) => *code,
            },
            Error::Detection { .. } | Error::Discovery { .. } => FATAL_EXIT_CODE,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Test utilities and mocks for Conductor unit tests.
//!
//! - [`MockHost`]: a fake host for toolchain detection
//! - [`MockRunner`]: records commands instead of running them
//!
//! # Example
//!
//! ```rust,ignore
//! use conductor::test_support::{MockHost, MockRunner};
//!
//! #[test]
//! fn test_example() {
//!     let host = MockHost::new().with_executable("uname").with_uname("Linux");
//!     let runner = MockRunner::new().fail_on("ctest", 8);
//!
//!     // Use mocks in tests...
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::builder::toolchain::Host;
use crate::util::process::{CommandRunner, ProcessBuilder, ProcessStatus};

/// Directory mock executables appear to live in.
pub const MOCK_BIN: &str = "/mock/bin";

/// Fake host: a set of existing paths, a set of executables and a canned
/// `uname -s` output.
#[derive(Debug, Default)]
pub struct MockHost {
    files: HashSet<PathBuf>,
    executables: HashSet<String>,
    uname_output: Option<String>,
    uname_calls: AtomicUsize,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as existing.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.insert(path.as_ref().to_path_buf());
        self
    }

    /// Put an executable on the fake search path.
    pub fn with_executable(mut self, name: &str) -> Self {
        self.executables.insert(name.to_string());
        self
    }

    /// Set what `uname -s` prints.
    pub fn with_uname(mut self, output: &str) -> Self {
        self.uname_output = Some(output.to_string());
        self
    }

    /// How many times `uname` was run.
    pub fn uname_calls(&self) -> usize {
        self.uname_calls.load(Ordering::SeqCst)
    }
}

impl Host for MockHost {
    fn path_exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        self.executables
            .contains(name)
            .then(|| Path::new(MOCK_BIN).join(name))
    }

    fn uname(&self, _uname: &Path) -> Result<String> {
        self.uname_calls.fetch_add(1, Ordering::SeqCst);
        match &self.uname_output {
            Some(output) => Ok(output.clone()),
            None => bail!("uname exited with code 1"),
        }
    }
}

/// Records every command it is asked to run.
///
/// Commands succeed unless their command line contains a pattern registered
/// with [`fail_on`](Self::fail_on).
#[derive(Debug, Default)]
pub struct MockRunner {
    commands: Mutex<Vec<ProcessBuilder>>,
    failures: Vec<(String, i32)>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` for any command line containing `pattern`.
    pub fn fail_on(mut self, pattern: &str, code: i32) -> Self {
        self.failures.push((pattern.to_string(), code));
        self
    }

    /// Commands run so far, in order.
    pub fn commands(&self) -> Vec<ProcessBuilder> {
        self.commands.lock().unwrap().clone()
    }

    /// Commands run so far, rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands()
            .iter()
            .map(|c| c.display_command())
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &ProcessBuilder) -> Result<ProcessStatus> {
        self.commands.lock().unwrap().push(cmd.clone());

        let line = cmd.display_command();
        let code = self
            .failures
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map_or(0, |(_, code)| *code);

        Ok(ProcessStatus { code: Some(code) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_records_and_fails() {
        let runner = MockRunner::new().fail_on("ctest", 8);

        let ok = runner
            .run(&ProcessBuilder::new("cmake").arg("--version"))
            .unwrap();
        let failed = runner
            .run(&ProcessBuilder::new("ctest").arg("--output-on-failure"))
            .unwrap();

        assert!(ok.success());
        assert_eq!(failed.code, Some(8));
        assert_eq!(
            runner.command_lines(),
            ["cmake --version", "ctest --output-on-failure"]
        );
    }

    #[test]
    fn test_mock_host() {
        let host = MockHost::new().with_executable("ninja");

        assert_eq!(
            host.find_executable("ninja"),
            Some(PathBuf::from("/mock/bin/ninja"))
        );
        assert!(host.find_executable("xcrun").is_none());
        assert!(host.uname(Path::new("/mock/bin/uname")).is_err());
        assert_eq!(host.uname_calls(), 1);
    }
}

//! Blocking invocation of the external tools.
//!
//! Every tool run passes through [`ToolInvoker::invoke`], which turns a
//! non-zero exit into [`Error::ToolFailed`]. There are no retries.

use std::path::Path;

use anyhow::Result;

use crate::builder::cmake::CMake;
use crate::builder::conan::Conan;
use crate::core::{BuildConfiguration, BuildMode, Error};
use crate::util::config::Config;
use crate::util::process::{CommandRunner, ProcessBuilder};
use crate::util::shell::{Shell, Status};

/// Runs Conan, CMake and CTest for one configuration at a time.
pub struct ToolInvoker<'a> {
    runner: &'a dyn CommandRunner,
    shell: Shell,
    conan: Conan,
    cmake: CMake,
}

impl<'a> ToolInvoker<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &Config, shell: Shell) -> Self {
        ToolInvoker {
            runner,
            shell,
            conan: Conan::new(&config.tools.conan, &config.dependencies.profile),
            cmake: CMake::new(&config.tools.cmake, &config.tools.ctest),
        }
    }

    /// Shell tool runs are reported to.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// `conan install` into `build_dir`.
    pub fn install_dependencies(
        &self,
        build_dir: &Path,
        mode: BuildMode,
        config: &BuildConfiguration,
        root: &Path,
    ) -> Result<()> {
        let cmd = self.conan.install_command(build_dir, mode, config, root);
        self.invoke("dependency install", config.id(), &cmd)
    }

    /// CMake configure step, consuming the toolchain file from the install.
    pub fn configure_project(
        &self,
        build_dir: &Path,
        mode: BuildMode,
        root: &Path,
        config: &BuildConfiguration,
    ) -> Result<()> {
        let cmd = self.cmake.configure_command(build_dir, mode, root, config);
        self.invoke("configure", config.id(), &cmd)
    }

    /// Native build, optionally restricted to one target.
    pub fn run_build(
        &self,
        build_dir: &Path,
        mode: BuildMode,
        config: &BuildConfiguration,
        target: Option<&str>,
    ) -> Result<()> {
        let cmd = self.cmake.build_command(build_dir, mode, target);
        self.invoke("build", config.id(), &cmd)
    }

    /// CTest, with output only for failing tests.
    pub fn run_tests(
        &self,
        build_dir: &Path,
        mode: BuildMode,
        config: &BuildConfiguration,
    ) -> Result<()> {
        let cmd = self.cmake.test_command(build_dir, mode);
        self.invoke("test", config.id(), &cmd)
    }

    /// Run a command to completion; any failure is fatal.
    pub fn invoke(&self, stage: &str, configuration: &str, cmd: &ProcessBuilder) -> Result<()> {
        self.shell.verbose(
            Status::Running,
            format_args!("`{}` ({})", cmd.display_command(), configuration),
        );

        let status = self.runner.run(cmd)?;
        if !status.success() {
            return Err(Error::ToolFailed {
                tool: cmd.get_program().display().to_string(),
                stage: stage.to_string(),
                configuration: configuration.to_string(),
                code: status.code,
            }
            .into());
        }

        Ok(())
    }
}

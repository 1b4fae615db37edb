//! CMake adapter: configure, build and test commands.

use std::path::{Path, PathBuf};

use crate::core::{BuildConfiguration, BuildMode};
use crate::util::process::ProcessBuilder;

/// Toolchain file written by `conan install` into the output folder.
pub const CONAN_TOOLCHAIN_FILE: &str = "conan_toolchain.cmake";

/// CMake command builder.
#[derive(Debug, Clone)]
pub struct CMake {
    cmake: String,
    ctest: String,
}

impl CMake {
    pub fn new(cmake: impl Into<String>, ctest: impl Into<String>) -> Self {
        CMake {
            cmake: cmake.into(),
            ctest: ctest.into(),
        }
    }

    /// Configure step, run from inside `build_dir`.
    pub fn configure_command(
        &self,
        build_dir: &Path,
        mode: BuildMode,
        root: &Path,
        config: &BuildConfiguration,
    ) -> ProcessBuilder {
        ProcessBuilder::new(&self.cmake)
            .args(config.generator_args())
            .arg(format!(
                "-DCMAKE_TOOLCHAIN_FILE={}",
                toolchain_file(build_dir).display()
            ))
            .arg(format!("-DCMAKE_BUILD_TYPE={}", mode.as_str()))
            .arg(root)
            .cwd(build_dir)
    }

    /// Build step. `--config` matters for multi-config generators
    /// (Visual Studio, Xcode).
    pub fn build_command(
        &self,
        build_dir: &Path,
        mode: BuildMode,
        target: Option<&str>,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(build_dir)
            .arg("--config")
            .arg(mode.as_str());

        if let Some(target) = target {
            cmd = cmd.arg("--target").arg(target);
        }

        cmd
    }

    /// CTest run, from inside `build_dir`.
    pub fn test_command(&self, build_dir: &Path, mode: BuildMode) -> ProcessBuilder {
        ProcessBuilder::new(&self.ctest)
            .arg("--build-config")
            .arg(mode.as_str())
            .arg("--output-on-failure")
            .cwd(build_dir)
    }
}

/// Path of the Conan-generated toolchain file in a build directory.
pub fn toolchain_file(build_dir: &Path) -> PathBuf {
    build_dir.join(CONAN_TOOLCHAIN_FILE)
}

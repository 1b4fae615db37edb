//! Conan adapter: the dependency install step.

use std::path::Path;

use crate::core::{BuildConfiguration, BuildMode};
use crate::util::process::ProcessBuilder;

/// Conan install command builder.
#[derive(Debug, Clone)]
pub struct Conan {
    program: String,
    profile: String,
}

impl Conan {
    pub fn new(program: impl Into<String>, profile: impl Into<String>) -> Self {
        Conan {
            program: program.into(),
            profile: profile.into(),
        }
    }

    /// `conan install` for one configuration.
    ///
    /// Conan's own packages are built as `Release` in release mode while the
    /// consuming project (`&`) is `RelWithDebInfo`. The toolchain file lands
    /// in `build_dir`.
    pub fn install_command(
        &self,
        build_dir: &Path,
        mode: BuildMode,
        config: &BuildConfiguration,
        root: &Path,
    ) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .arg("install")
            .arg(format!("--output-folder={}", build_dir.display()))
            .arg(format!("--profile:build={}", self.profile))
            .arg("-s")
            .arg(format!("build_type={}", mode.dependency_build_type()))
            .arg("-s")
            .arg(format!("&:build_type={}", mode.as_str()))
            .args(config.dependency_install_args())
            .arg("--build=missing")
            .arg(root)
            .cwd(root)
    }
}

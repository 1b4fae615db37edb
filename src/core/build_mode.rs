//! Build modes.

use std::fmt;
use std::str::FromStr;

/// The two build types every configuration is built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// All modes, debug first.
    pub const ALL: [BuildMode; 2] = [BuildMode::Debug, BuildMode::Release];

    /// Label handed to CMake and used in build directory names.
    ///
    /// Release builds keep debug info.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "RelWithDebInfo",
        }
    }

    /// `build_type` setting for the packages Conan builds.
    ///
    /// Differs from [`as_str`](Self::as_str) for release: prebuilt Conan
    /// binaries only exist for plain `Release`.
    pub fn dependency_build_type(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "Release",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildMode::Debug),
            "release" | "relwithdebinfo" => Ok(BuildMode::Release),
            _ => Err(format!(
                "invalid build mode '{}'; expected 'debug' or 'release'",
                s
            )),
        }
    }
}

//! Configuration file support for Conductor.
//!
//! Conductor reads two configuration files:
//! - Global: `~/.conductor/config.toml` - User-wide defaults
//! - Project: `.conductor/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Conductor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool locations
    pub tools: ToolsConfig,

    /// Dependency manager settings
    pub dependencies: DependenciesConfig,

    /// Stage execution settings
    pub build: BuildConfig,
}

/// Names or paths of the external tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub conan: String,
    pub cmake: String,
    pub ctest: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            conan: "conan".to_string(),
            cmake: "cmake".to_string(),
            ctest: "ctest".to_string(),
        }
    }
}

/// Dependency manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependenciesConfig {
    /// Profile passed to `--profile:build`
    pub profile: String,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        DependenciesConfig {
            profile: "default".to_string(),
        }
    }
}

/// Stage execution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Run the configurations of a stage concurrently
    pub parallel: bool,
}

/// Partially specified configuration, as read from one file.
///
/// Only the keys present in a file override lower-precedence files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    tools: ToolsLayer,
    dependencies: DependenciesLayer,
    build: BuildLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ToolsLayer {
    conan: Option<String>,
    cmake: Option<String>,
    ctest: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DependenciesLayer {
    profile: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BuildLayer {
    parallel: Option<bool>,
}

impl ConfigLayer {
    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

impl Config {
    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(conan) = layer.tools.conan {
            self.tools.conan = conan;
        }
        if let Some(cmake) = layer.tools.cmake {
            self.tools.cmake = cmake;
        }
        if let Some(ctest) = layer.tools.ctest {
            self.tools.ctest = ctest;
        }
        if let Some(profile) = layer.dependencies.profile {
            self.dependencies.profile = profile;
        }
        if let Some(parallel) = layer.build.parallel {
            self.build.parallel = parallel;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.conductor/config.toml)
/// 2. Global config (~/.conductor/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.apply(ConfigLayer::load_or_default(global_path));
    }
    config.apply(ConfigLayer::load_or_default(project_path));

    config
}

/// Get the global conductor config directory (~/.conductor).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".conductor"))
}

/// Get the global config path (~/.conductor/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.conductor/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".conductor").join("config.toml")
}

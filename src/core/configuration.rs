//! Build configurations and the per-run configuration matrix.

use std::fmt;
use std::path::{Path, PathBuf};

use super::build_mode::BuildMode;
use super::error::{Error, Result};

/// One generator + architecture combination.
///
/// Argument lists are passed to the tools verbatim and in order; flag/value
/// pairs such as `-G Ninja` depend on that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    id: String,
    generator_args: Vec<String>,
    dependency_install_args: Vec<String>,
}

impl BuildConfiguration {
    /// Create a configuration.
    ///
    /// The id ends up inside a directory name, so it must be a non-empty
    /// token without path separators.
    pub fn new(
        id: impl Into<String>,
        generator_args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let id = id.into();
        validate_id(&id)?;

        let generator_args: Vec<String> = generator_args.into_iter().map(Into::into).collect();
        if generator_args.is_empty() {
            return Err(Error::InvalidConfigurationId {
                id,
                reason: "configuration selects no generator",
            });
        }

        Ok(BuildConfiguration {
            id,
            generator_args,
            dependency_install_args: Vec::new(),
        })
    }

    /// Append arguments for the dependency manager's install step.
    pub fn with_install_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependency_install_args
            .extend(args.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generator_args(&self) -> &[String] {
        &self.generator_args
    }

    pub fn dependency_install_args(&self) -> &[String] {
        &self.dependency_install_args
    }

    /// Build directory for this configuration under `root`.
    pub fn build_dir(&self, root: &Path, mode: BuildMode) -> PathBuf {
        build_dir(root, &self.id, mode)
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

fn validate_id(id: &str) -> Result<()> {
    let reason = if id.is_empty() {
        "id is empty"
    } else if id.contains(['/', '\\']) {
        "id contains a path separator"
    } else if id == "." || id == ".." {
        "id is a relative path component"
    } else if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
        "id contains whitespace"
    } else {
        return Ok(());
    };

    Err(Error::InvalidConfigurationId {
        id: id.to_string(),
        reason,
    })
}

/// Resolve the build directory for a configuration id and mode.
///
/// The mode label is always the last `_`-separated component and is one of a
/// fixed set, so distinct `(id, mode)` pairs never share a directory.
pub fn build_dir(root: &Path, configuration_id: &str, mode: BuildMode) -> PathBuf {
    root.join(format!("build_{}_{}", configuration_id, mode.as_str()))
}

/// The ordered set of configurations selected for this host.
///
/// Never empty and ids are unique; both are enforced on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationMatrix {
    configurations: Vec<BuildConfiguration>,
}

impl ConfigurationMatrix {
    pub fn new(configurations: Vec<BuildConfiguration>) -> Result<Self> {
        let Some(first) = configurations.first() else {
            return Err(Error::EmptyMatrix);
        };

        for (i, config) in configurations.iter().enumerate() {
            if configurations[..i].iter().any(|c| c.id == config.id) {
                return Err(Error::InvalidConfigurationId {
                    id: config.id.clone(),
                    reason: "id is used by more than one configuration",
                });
            }
        }

        tracing::debug!("configuration matrix starts with `{}`", first.id);

        Ok(ConfigurationMatrix { configurations })
    }

    /// The top-priority configuration, used for IDE generation.
    pub fn primary(&self) -> &BuildConfiguration {
        &self.configurations[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuildConfiguration> {
        self.configurations.iter()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn ids(&self) -> Vec<&str> {
        self.configurations.iter().map(|c| c.id()).collect()
    }

    pub fn as_slice(&self) -> &[BuildConfiguration] {
        &self.configurations
    }
}

impl<'a> IntoIterator for &'a ConfigurationMatrix {
    type Item = &'a BuildConfiguration;
    type IntoIter = std::slice::Iter<'a, BuildConfiguration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configurations.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_build_dir_layout() {
        let root = Path::new("/src/project");
        assert_eq!(
            build_dir(root, "VS2019x86", BuildMode::Release),
            PathBuf::from("/src/project/build_VS2019x86_RelWithDebInfo")
        );
        assert_eq!(
            build_dir(root, "Xcode", BuildMode::Debug),
            PathBuf::from("/src/project/build_Xcode_Debug")
        );
    }

    #[test]
    fn test_build_dir_is_injective() {
        let root = Path::new("root");
        let ids = [
            "Xcode",
            "Ninja",
            "Makefiles",
            "VS2022",
            "VS2022x86",
            "VS2019",
            "VS2019x86",
            "VS2017",
            "VS2017x86",
            "VS2015",
            "VS2015x86",
            "Debug",
            "a_Debug",
        ];

        let mut seen = HashSet::new();
        for id in ids {
            for mode in BuildMode::ALL {
                assert!(
                    seen.insert(build_dir(root, id, mode)),
                    "collision for ({}, {})",
                    id,
                    mode
                );
            }
        }
        assert_eq!(seen.len(), ids.len() * 2);
    }

    #[test]
    fn test_rejects_unsafe_ids() {
        assert!(BuildConfiguration::new("", ["-G", "Ninja"]).is_err());
        assert!(BuildConfiguration::new("a/b", ["-G", "Ninja"]).is_err());
        assert!(BuildConfiguration::new("a\\b", ["-G", "Ninja"]).is_err());
        assert!(BuildConfiguration::new("..", ["-G", "Ninja"]).is_err());
        assert!(BuildConfiguration::new("Unix Makefiles", ["-G", "Ninja"]).is_err());
        assert!(BuildConfiguration::new("Ninja", ["-G", "Ninja"]).is_ok());
    }

    #[test]
    fn test_requires_generator_args() {
        let empty: [&str; 0] = [];
        assert!(BuildConfiguration::new("Ninja", empty).is_err());
    }

    #[test]
    fn test_argument_order_is_preserved() {
        let config = BuildConfiguration::new(
            "VS2019x86",
            ["-G", "Visual Studio 16 2019", "-A", "Win32"],
        )
        .unwrap()
        .with_install_args(["-s", "arch=x86"]);

        assert_eq!(
            config.generator_args(),
            ["-G", "Visual Studio 16 2019", "-A", "Win32"]
        );
        assert_eq!(config.dependency_install_args(), ["-s", "arch=x86"]);
    }

    #[test]
    fn test_empty_matrix_error() {
        let err = ConfigurationMatrix::new(Vec::new()).unwrap_err();

        assert!(matches!(err, Error::EmptyMatrix));
        assert_eq!(
            err.to_string(),
            "no build configurations were selected for this host"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_matrix_rejects_duplicates() {
        let a = BuildConfiguration::new("Ninja", ["-G", "Ninja"]).unwrap();
        let err = ConfigurationMatrix::new(vec![a.clone(), a.clone()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration id `Ninja`: id is used by more than one configuration"
        );

        let matrix = ConfigurationMatrix::new(vec![a]).unwrap();
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.primary().id(), "Ninja");
    }
}

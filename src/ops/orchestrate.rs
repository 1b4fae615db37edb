//! Stage orchestration across the configuration matrix.
//!
//! Stages run configuration by configuration. Sequentially (the default)
//! the first failure stops the stage before any further configuration
//! starts. With `parallel`, configurations run on the rayon pool; the first
//! failure is reported once the configurations already running have
//! finished.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use rayon::prelude::*;

use crate::builder::ide::{find_project, IdeLauncher};
use crate::builder::invoker::ToolInvoker;
use crate::core::{BuildConfiguration, BuildMode, ConfigurationMatrix};
use crate::ops::stage::{Stage, Step};
use crate::util::config::Config;
use crate::util::fs::ensure_dir;
use crate::util::process::CommandRunner;
use crate::util::shell::{format_duration, Shell, Status};

/// Options that shape a run.
#[derive(Debug, Clone, Default)]
pub struct OrchestrateOptions {
    /// Run configurations of a stage concurrently
    pub parallel: bool,
    /// Restrict build steps to a single target
    pub target: Option<String>,
}

/// Drives the generate/build/test/ide steps for one matrix.
pub struct Orchestrator<'a> {
    root: &'a Path,
    matrix: &'a ConfigurationMatrix,
    tools: ToolInvoker<'a>,
    launcher: &'a dyn IdeLauncher,
    options: OrchestrateOptions,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        root: &'a Path,
        matrix: &'a ConfigurationMatrix,
        config: &Config,
        shell: Shell,
        runner: &'a dyn CommandRunner,
        launcher: &'a dyn IdeLauncher,
        options: OrchestrateOptions,
    ) -> Self {
        Orchestrator {
            root,
            matrix,
            tools: ToolInvoker::new(runner, config, shell),
            launcher,
            options,
        }
    }

    /// Run several stages in order, stopping at the first failure.
    pub fn run_all(&self, stages: &[Stage]) -> Result<()> {
        let start = Instant::now();

        for stage in stages {
            tracing::debug!("running stage `{}`", stage);
            self.run(*stage)?;
        }

        let names: Vec<&str> = stages.iter().map(|s| s.as_str()).collect();
        self.shell().status(
            Status::Finished,
            format_args!("{} in {}", names.join(", "), format_duration(start.elapsed())),
        );
        Ok(())
    }

    /// Run one stage.
    pub fn run(&self, stage: Stage) -> Result<()> {
        for step in stage.steps() {
            match step {
                Step::Generate(mode) => self.generate(mode)?,
                Step::Build(mode) => self.build(mode)?,
                Step::Test(mode) => self.test(mode)?,
                Step::Ide => {
                    self.ide()?;
                }
            }
        }
        Ok(())
    }

    /// Install dependencies and configure every configuration.
    pub fn generate(&self, mode: BuildMode) -> Result<()> {
        self.for_each_configuration(|config| {
            self.shell().status(Status::Generating, format_args!("{} ({})", config, mode));
            self.generate_one(config, mode).map(|_| ())
        })
    }

    /// Build every configuration. The build directories must already have
    /// been generated.
    pub fn build(&self, mode: BuildMode) -> Result<()> {
        let target = self.options.target.as_deref();
        self.for_each_configuration(|config| {
            self.shell().status(Status::Building, format_args!("{} ({})", config, mode));
            let dir = self.build_dir(config, mode);
            self.tools.run_build(&dir, mode, config, target)
        })
    }

    /// Run the tests of every configuration.
    pub fn test(&self, mode: BuildMode) -> Result<()> {
        self.for_each_configuration(|config| {
            self.shell().status(Status::Testing, format_args!("{} ({})", config, mode));
            let dir = self.build_dir(config, mode);
            self.tools.run_tests(&dir, mode, config)
        })
    }

    /// Generate the primary configuration in debug and open its IDE project.
    ///
    /// Returns the project that was opened.
    pub fn ide(&self) -> Result<PathBuf> {
        let config = self.matrix.primary();
        let mode = BuildMode::Debug;

        self.shell().status(Status::Generating, format_args!("{} ({})", config, mode));
        let dir = self.generate_one(config, mode)?;

        let project = find_project(&dir)?;
        self.shell().status(Status::Opening, project.display());

        let cmd = self.launcher.open_command(&project);
        self.tools.invoke("open", config.id(), &cmd)?;

        Ok(project)
    }

    fn shell(&self) -> &Shell {
        self.tools.shell()
    }

    /// Directory a configuration builds into.
    pub fn build_dir(&self, config: &BuildConfiguration, mode: BuildMode) -> PathBuf {
        config.build_dir(self.root, mode)
    }

    fn generate_one(&self, config: &BuildConfiguration, mode: BuildMode) -> Result<PathBuf> {
        let dir = self.build_dir(config, mode);
        ensure_dir(&dir)?;

        self.tools.install_dependencies(&dir, mode, config, self.root)?;
        self.tools.configure_project(&dir, mode, self.root, config)?;

        Ok(dir)
    }

    fn for_each_configuration<F>(&self, f: F) -> Result<()>
    where
        F: Fn(&BuildConfiguration) -> Result<()> + Sync + Send,
    {
        if self.options.parallel && self.matrix.len() > 1 {
            self.matrix.as_slice().par_iter().try_for_each(f)
        } else {
            self.matrix.iter().try_for_each(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::builder::ide::OpenLauncher;
    use crate::builder::matrix::visual_studio_pair;
    use crate::builder::toolchain::VisualStudio;
    use crate::core::Error;
    use crate::test_support::MockRunner;

    fn single(id: &str, generator: &str) -> ConfigurationMatrix {
        let config = BuildConfiguration::new(id, ["-G", generator]).unwrap();
        ConfigurationMatrix::new(vec![config]).unwrap()
    }

    fn three() -> ConfigurationMatrix {
        ConfigurationMatrix::new(vec![
            BuildConfiguration::new("A", ["-G", "Ninja"]).unwrap(),
            BuildConfiguration::new("B", ["-G", "Ninja"]).unwrap(),
            BuildConfiguration::new("C", ["-G", "Ninja"]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_generate_xcode_debug() {
        let tmp = TempDir::new().unwrap();
        let matrix = single("Xcode", "Xcode");
        let runner = MockRunner::new();
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        orch.generate(BuildMode::Debug).unwrap();

        let dir = tmp.path().join("build_Xcode_Debug");
        assert!(dir.is_dir());

        let commands = runner.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].get_program(), Path::new("conan"));
        assert!(commands[0]
            .get_args()
            .contains(&"build_type=Debug".to_string()));
        assert_eq!(commands[1].get_program(), Path::new("cmake"));
        assert_eq!(commands[1].get_cwd(), Some(dir.as_path()));
        assert_eq!(&commands[1].get_args()[..2], ["-G", "Xcode"]);
        assert!(commands[1]
            .get_args()
            .contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
    }

    #[test]
    fn test_generate_vs2019_release() {
        let tmp = TempDir::new().unwrap();
        let matrix = ConfigurationMatrix::new(visual_studio_pair(VisualStudio::Vs2019).unwrap())
            .unwrap();
        let runner = MockRunner::new();
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        orch.generate(BuildMode::Release).unwrap();

        assert!(tmp.path().join("build_VS2019_RelWithDebInfo").is_dir());
        assert!(tmp.path().join("build_VS2019x86_RelWithDebInfo").is_dir());

        let commands = runner.commands();
        assert_eq!(commands.len(), 4);
        let x86_install = commands[2].get_args();
        assert!(x86_install.contains(&"build_type=Release".to_string()));
        assert!(x86_install.contains(&"&:build_type=RelWithDebInfo".to_string()));
        assert!(x86_install.contains(&"arch=x86".to_string()));
        assert!(x86_install.iter().any(|a| a.ends_with("build_VS2019x86_RelWithDebInfo")));
    }

    #[test]
    fn test_all_runs_six_stages_for_makefiles() {
        let tmp = TempDir::new().unwrap();
        let matrix = single("Makefiles", "Unix Makefiles");
        let runner = MockRunner::new();
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        orch.run(Stage::All).unwrap();

        let programs: Vec<String> = runner
            .commands()
            .iter()
            .map(|c| c.get_program().display().to_string())
            .collect();
        assert_eq!(
            programs,
            ["conan", "cmake", "cmake", "ctest", "conan", "cmake", "cmake", "ctest"]
        );
        assert!(tmp.path().join("build_Makefiles_Debug").is_dir());
        assert!(tmp.path().join("build_Makefiles_RelWithDebInfo").is_dir());
    }

    #[test]
    fn test_generate_keeps_existing_build_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build_Ninja_Debug");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("CMakeCache.txt"), "cached").unwrap();

        let matrix = single("Ninja", "Ninja");
        let runner = MockRunner::new();
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        orch.generate(BuildMode::Debug).unwrap();
        assert_eq!(fs::read_to_string(dir.join("CMakeCache.txt")).unwrap(), "cached");
    }

    #[test]
    fn test_failed_install_skips_configure() {
        let tmp = TempDir::new().unwrap();
        let matrix = single("Ninja", "Ninja");
        let runner = MockRunner::new().fail_on("conan install", 1);
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        assert!(orch.generate(BuildMode::Debug).is_err());
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn test_sequential_build_stops_at_first_failure() {
        let tmp = TempDir::new().unwrap();
        let matrix = three();
        let runner = MockRunner::new().fail_on("build_A_Debug", 2);
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        let err = orch.build(BuildMode::Debug).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ToolFailed { code: Some(2), .. })
        ));
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn test_parallel_build_reports_failure() {
        let tmp = TempDir::new().unwrap();
        let matrix = three();
        let runner = MockRunner::new().fail_on("build_B_Debug", 3);
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions {
                parallel: true,
                target: None,
            },
        );

        let err = orch.build(BuildMode::Debug).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ToolFailed { code: Some(3), .. })
        ));
        assert!(!runner.commands().is_empty());
    }

    #[test]
    fn test_composite_aborts_after_failed_stage() {
        let tmp = TempDir::new().unwrap();
        let matrix = single("Ninja", "Ninja");
        let runner = MockRunner::new().fail_on("cmake --build", 1);
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        assert!(orch.run(Stage::Debug).is_err());
        assert!(runner
            .commands()
            .iter()
            .all(|c| c.get_program() != Path::new("ctest")));
    }

    #[test]
    fn test_build_target_is_forwarded() {
        let tmp = TempDir::new().unwrap();
        let matrix = single("Ninja", "Ninja");
        let runner = MockRunner::new();
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions {
                parallel: false,
                target: Some("unit_tests".to_string()),
            },
        );

        orch.build(BuildMode::Release).unwrap();
        assert!(runner.command_lines()[0].ends_with("--target unit_tests"));
    }

    #[test]
    fn test_ide_opens_primary_project() {
        let tmp = TempDir::new().unwrap();
        let matrix = ConfigurationMatrix::new(visual_studio_pair(VisualStudio::Vs2022).unwrap())
            .unwrap();
        let dir = tmp.path().join("build_VS2022_Debug");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("core.sln"), "").unwrap();

        let runner = MockRunner::new();
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        let project = orch.ide().unwrap();
        assert_eq!(project, dir.join("core.sln"));

        let commands = runner.commands();
        assert_eq!(commands.len(), 3);
        assert!(commands[0]
            .get_args()
            .iter()
            .any(|a| a.ends_with("build_VS2022_Debug")));
        assert_eq!(commands[2].get_program(), Path::new("open"));
        assert_eq!(commands[2].get_args(), [dir.join("core.sln").display().to_string()]);
    }

    #[test]
    fn test_ide_without_project_does_not_open() {
        let tmp = TempDir::new().unwrap();
        let matrix = single("Makefiles", "Unix Makefiles");
        let runner = MockRunner::new();
        let orch = Orchestrator::new(
            tmp.path(),
            &matrix,
            &Config::default(),
            Shell::default(),
            &runner,
            &OpenLauncher,
            OrchestrateOptions::default(),
        );

        let err = orch.ide().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Discovery { .. })
        ));
        assert!(runner
            .commands()
            .iter()
            .all(|c| c.get_program() != Path::new("open")));
    }
}

//! User-facing stages and the steps they expand to.

use std::fmt;
use std::str::FromStr;

use crate::core::BuildMode;

/// A primitive unit of orchestration work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Dependency install followed by configure, per configuration
    Generate(BuildMode),
    /// Native build, per configuration
    Build(BuildMode),
    /// Test run, per configuration
    Test(BuildMode),
    /// Generate the primary configuration in debug and open its project
    Ide,
}

/// A stage name accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    GenerateDebug,
    GenerateRelease,
    BuildDebug,
    BuildRelease,
    TestDebug,
    TestRelease,
    Debug,
    Release,
    All,
    Ide,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::GenerateDebug,
        Stage::GenerateRelease,
        Stage::BuildDebug,
        Stage::BuildRelease,
        Stage::TestDebug,
        Stage::TestRelease,
        Stage::Debug,
        Stage::Release,
        Stage::All,
        Stage::Ide,
    ];

    /// Stage run when none is named.
    pub const DEFAULT: Stage = Stage::All;

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::GenerateDebug => "generate_debug",
            Stage::GenerateRelease => "generate_release",
            Stage::BuildDebug => "build_debug",
            Stage::BuildRelease => "build_release",
            Stage::TestDebug => "test_debug",
            Stage::TestRelease => "test_release",
            Stage::Debug => "debug",
            Stage::Release => "release",
            Stage::All => "all",
            Stage::Ide => "ide",
        }
    }

    /// Alternate names.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Stage::Ide => &["xcode", "vs"],
            _ => &[],
        }
    }

    /// The steps this stage runs, in order.
    pub fn steps(&self) -> Vec<Step> {
        match self {
            Stage::GenerateDebug => vec![Step::Generate(BuildMode::Debug)],
            Stage::GenerateRelease => vec![Step::Generate(BuildMode::Release)],
            Stage::BuildDebug => vec![Step::Build(BuildMode::Debug)],
            Stage::BuildRelease => vec![Step::Build(BuildMode::Release)],
            Stage::TestDebug => vec![Step::Test(BuildMode::Debug)],
            Stage::TestRelease => vec![Step::Test(BuildMode::Release)],
            Stage::Debug => pipeline(BuildMode::Debug),
            Stage::Release => pipeline(BuildMode::Release),
            Stage::All => BuildMode::ALL.into_iter().flat_map(pipeline).collect(),
            Stage::Ide => vec![Step::Ide],
        }
    }
}

fn pipeline(mode: BuildMode) -> Vec<Step> {
    vec![Step::Generate(mode), Step::Build(mode), Step::Test(mode)]
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s || stage.aliases().contains(&s))
            .ok_or_else(|| {
                let names: Vec<&str> = Stage::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown stage '{}'; expected one of: {}", s, names.join(", "))
            })
    }
}

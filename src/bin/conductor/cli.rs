//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use conductor::ops::Stage;
use conductor::util::ColorChoice;

/// Conductor - generate, build and test a CMake + Conan project for every
/// toolchain configuration this host supports
#[derive(Parser)]
#[command(name = "conductor")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print no status lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring of status lines: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the detected toolchain and the configuration matrix
    Detect,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Stages to run, in order (default: all)
    ///
    /// generate_debug, generate_release, build_debug, build_release,
    /// test_debug, test_release, debug, release, all, ide (alias: xcode, vs)
    #[arg(value_name = "STAGE", value_parser = parse_stage)]
    pub stages: Vec<Stage>,

    /// Run the configurations of each stage concurrently
    #[arg(long, env = "CONDUCTOR_PARALLEL")]
    pub parallel: bool,

    /// Build only this CMake target
    #[arg(long, value_name = "TARGET")]
    pub target: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_stage(s: &str) -> Result<Stage, String> {
    s.parse::<Stage>().map_err(|e| e.to_string())
}

//! Conductor CLI - build-matrix orchestration for CMake + Conan projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use conductor::util::Shell;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let code = e
            .downcast_ref::<conductor::core::Error>()
            .map_or(1, conductor::core::Error::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("conductor=debug")
    } else {
        EnvFilter::new("conductor=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global_opts = GlobalOptions {
        shell: Shell::from_flags(cli.quiet, cli.verbose, cli.color),
    };

    // Execute command
    match cli.command {
        Some(Commands::Detect) => commands::detect::execute(),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        None => commands::run::execute(cli.run, &global_opts),
    }
}

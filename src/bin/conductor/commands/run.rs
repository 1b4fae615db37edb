//! Stage execution (`conductor [STAGE]...`)

use anyhow::Result;
use tracing::debug;

use conductor::builder::{build_matrix, detect, launcher_for, SystemHost};
use conductor::ops::{OrchestrateOptions, Orchestrator, Stage};
use conductor::util::SystemRunner;
use conductor::GlobalContext;

use crate::cli::RunArgs;
use crate::GlobalOptions;

pub fn execute(args: RunArgs, global_opts: &GlobalOptions) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_shell(global_opts.shell.clone());

    let toolchain = detect(&SystemHost)?;
    let matrix = build_matrix(&toolchain)?;
    debug!("configurations: {}", matrix.ids().join(", "));

    let launcher = launcher_for(&toolchain);
    let options = OrchestrateOptions {
        parallel: args.parallel || ctx.config().build.parallel,
        target: args.target,
    };

    let orchestrator = Orchestrator::new(
        ctx.root(),
        &matrix,
        ctx.config(),
        ctx.shell().clone(),
        &SystemRunner,
        launcher.as_ref(),
        options,
    );

    let stages = if args.stages.is_empty() {
        vec![Stage::DEFAULT]
    } else {
        args.stages
    };

    orchestrator.run_all(&stages)
}

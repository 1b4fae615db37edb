//! `conductor detect` command

use anyhow::Result;

use conductor::builder::SystemHost;
use conductor::ops::{detect_report, format_report};
use conductor::GlobalContext;

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;

    let report = detect_report(&ctx, &SystemHost)?;
    print!("{}", format_report(&report));

    Ok(())
}

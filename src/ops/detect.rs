//! Host detection report.
//!
//! Backs `conductor detect`: what was found on the host, which matrix
//! follows from it and where each configuration builds.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::builder::matrix::build_matrix;
use crate::builder::toolchain::{detect, Host, ToolchainInfo};
use crate::core::{BuildMode, ConfigurationMatrix};
use crate::util::GlobalContext;

/// Everything detection decided for this host.
#[derive(Debug, Clone)]
pub struct DetectReport {
    pub toolchain: ToolchainInfo,
    pub matrix: ConfigurationMatrix,
    /// `(configuration id, mode, directory)` for every matrix entry
    pub build_dirs: Vec<(String, BuildMode, PathBuf)>,
}

/// Detect the host and derive its matrix.
pub fn detect_report(ctx: &GlobalContext, host: &dyn Host) -> Result<DetectReport> {
    let toolchain = detect(host)?;
    let matrix = build_matrix(&toolchain)?;

    let build_dirs = matrix
        .iter()
        .flat_map(|config| {
            BuildMode::ALL.into_iter().map(move |mode| {
                (
                    config.id().to_string(),
                    mode,
                    config.build_dir(ctx.root(), mode),
                )
            })
        })
        .collect();

    Ok(DetectReport {
        toolchain,
        matrix,
        build_dirs,
    })
}

/// Render a report for the terminal.
pub fn format_report(report: &DetectReport) -> String {
    let mut out = String::new();
    let tc = &report.toolchain;

    let _ = writeln!(out, "platform:      {}", tc.platform);
    let vs: Vec<&str> = tc.visual_studio.iter().map(|v| v.tag()).collect();
    let _ = writeln!(
        out,
        "visual studio: {}",
        if vs.is_empty() {
            "none".to_string()
        } else {
            vs.join(", ")
        }
    );
    let _ = writeln!(out, "xcode:         {}", yes_no(tc.xcode));
    let _ = writeln!(out, "ninja:         {}", yes_no(tc.ninja));
    let _ = writeln!(out, "make:          {}", tc.make.as_deref().unwrap_or("none"));

    let _ = writeln!(out);
    let _ = writeln!(out, "configurations:");
    for config in &report.matrix {
        let _ = writeln!(out, "  {}", config.id());
        let _ = writeln!(out, "    generator: {}", config.generator_args().join(" "));
        if !config.dependency_install_args().is_empty() {
            let _ = writeln!(
                out,
                "    install:   {}",
                config.dependency_install_args().join(" ")
            );
        }
        for (id, mode, dir) in &report.build_dirs {
            if id == config.id() {
                let _ = writeln!(out, "    {:<9}  {}", format!("{}:", mode), dir.display());
            }
        }
    }

    out
}

fn yes_no(found: bool) -> &'static str {
    if found {
        "yes"
    } else {
        "no"
    }
}

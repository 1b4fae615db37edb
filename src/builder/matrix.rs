//! Configuration matrix construction.
//!
//! Exactly one toolchain family is selected per run. Families are tried in
//! priority order and the first whose predicate holds supplies the whole
//! matrix:
//!
//! 1. Xcode (`xcrun` on PATH)
//! 2. The newest installed Visual Studio, as a 64-bit and a 32-bit config
//! 3. Ninja
//! 4. Unix Makefiles, unconditionally

use crate::builder::toolchain::{ToolchainInfo, VisualStudio};
use crate::core::{BuildConfiguration, ConfigurationMatrix, Result};

/// A toolchain family: when it applies and the configurations it yields.
pub struct MatrixRule {
    pub name: &'static str,
    pub applies: fn(&ToolchainInfo) -> bool,
    pub configurations: fn(&ToolchainInfo) -> Result<Vec<BuildConfiguration>>,
}

/// Rules in priority order. The last rule always applies.
pub const RULES: &[MatrixRule] = &[
    MatrixRule {
        name: "xcode",
        applies: has_xcode,
        configurations: xcode,
    },
    MatrixRule {
        name: "visual-studio",
        applies: has_visual_studio,
        configurations: visual_studio,
    },
    MatrixRule {
        name: "ninja",
        applies: has_ninja,
        configurations: ninja,
    },
    MatrixRule {
        name: "makefiles",
        applies: always,
        configurations: makefiles,
    },
];

fn has_xcode(info: &ToolchainInfo) -> bool {
    info.xcode
}

fn has_visual_studio(info: &ToolchainInfo) -> bool {
    info.newest_visual_studio().is_some()
}

fn has_ninja(info: &ToolchainInfo) -> bool {
    info.ninja
}

fn always(_: &ToolchainInfo) -> bool {
    true
}

/// Build the configuration matrix for a detected host.
pub fn build_matrix(info: &ToolchainInfo) -> Result<ConfigurationMatrix> {
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(info))
        .unwrap_or(&RULES[RULES.len() - 1]);

    tracing::debug!("selected `{}` toolchain family", rule.name);

    ConfigurationMatrix::new((rule.configurations)(info)?)
}

fn xcode(_: &ToolchainInfo) -> Result<Vec<BuildConfiguration>> {
    Ok(vec![BuildConfiguration::new("Xcode", ["-G", "Xcode"])?])
}

fn visual_studio(info: &ToolchainInfo) -> Result<Vec<BuildConfiguration>> {
    match info.newest_visual_studio() {
        Some(vs) => visual_studio_pair(vs),
        None => Ok(Vec::new()),
    }
}

/// The 64-bit configuration followed by its 32-bit variant.
pub fn visual_studio_pair(vs: VisualStudio) -> Result<Vec<BuildConfiguration>> {
    let x64 = BuildConfiguration::new(vs.tag(), ["-G", vs.generator(), "-A", "x64"])?;
    let x86 = BuildConfiguration::new(
        format!("{}x86", vs.tag()),
        ["-G", vs.generator(), "-A", "Win32"],
    )?
    .with_install_args(["-s", "arch=x86"]);

    Ok(vec![x64, x86])
}

fn ninja(_: &ToolchainInfo) -> Result<Vec<BuildConfiguration>> {
    Ok(vec![BuildConfiguration::new("Ninja", ["-G", "Ninja"])?])
}

fn makefiles(_: &ToolchainInfo) -> Result<Vec<BuildConfiguration>> {
    Ok(vec![BuildConfiguration::new("Makefiles", ["-G", "Unix Makefiles"])?])
}

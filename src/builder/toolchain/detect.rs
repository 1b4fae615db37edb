//! Toolchain detection functions.

use crate::core::{Error, Result};

use super::{Host, ToolchainInfo, VisualStudio, MSVC_PLATFORM};

/// Detect the host toolchain.
///
/// Fails only when no platform identifier can be determined: no Visual
/// Studio is installed and `uname` is missing or unusable.
pub fn detect(host: &dyn Host) -> Result<ToolchainInfo> {
    let visual_studio = detect_visual_studio(host);
    let platform = detect_platform(host, !visual_studio.is_empty())?;

    let xcode = host.find_executable("xcrun").is_some();
    let ninja = host.find_executable("ninja").is_some();
    let make = ["gmake", "make"]
        .into_iter()
        .find(|name| host.find_executable(name).is_some())
        .map(str::to_string);

    let info = ToolchainInfo {
        platform,
        visual_studio,
        xcode,
        ninja,
        make,
    };

    tracing::debug!(
        "detected platform={} visual_studio={:?} xcode={} ninja={} make={:?}",
        info.platform,
        info.visual_studio,
        info.xcode,
        info.ninja,
        info.make
    );

    Ok(info)
}

/// Installed Visual Studio generations, newest first.
fn detect_visual_studio(host: &dyn Host) -> Vec<VisualStudio> {
    VisualStudio::NEWEST_FIRST
        .into_iter()
        .filter(|vs| {
            vs.install_markers()
                .iter()
                .any(|marker| host.path_exists(marker))
        })
        .collect()
}

fn detect_platform(host: &dyn Host, has_visual_studio: bool) -> Result<String> {
    if has_visual_studio {
        return Ok(MSVC_PLATFORM.to_string());
    }

    let Some(uname) = host.find_executable("uname") else {
        return Err(Error::Detection {
            reason: "no Visual Studio installation and no `uname` on PATH".to_string(),
        });
    };

    let output = host.uname(&uname).map_err(|e| Error::Detection {
        reason: format!("`{}` failed: {:#}", uname.display(), e),
    })?;

    let platform = output.trim();
    if platform.is_empty() {
        return Err(Error::Detection {
            reason: format!("`{}` printed nothing", uname.display()),
        });
    }

    Ok(platform.to_string())
}

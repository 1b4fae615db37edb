//! Visual Studio generations.

use std::fmt;
use std::path::PathBuf;

const PROGRAM_FILES: &str = "C:/Program Files";
const PROGRAM_FILES_X86: &str = "C:/Program Files (x86)";

/// Editions installed under a versioned `Microsoft Visual Studio/<year>` folder.
const EDITIONS: [&str; 4] = ["Community", "Professional", "Enterprise", "BuildTools"];

/// A Visual Studio release the matrix knows how to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisualStudio {
    Vs2022,
    Vs2019,
    Vs2017,
    Vs2015,
}

impl VisualStudio {
    /// Known generations, newest first. Detection and matrix building both
    /// walk this order.
    pub const NEWEST_FIRST: [VisualStudio; 4] = [
        VisualStudio::Vs2022,
        VisualStudio::Vs2019,
        VisualStudio::Vs2017,
        VisualStudio::Vs2015,
    ];

    /// Short tag used as the configuration id prefix.
    pub fn tag(&self) -> &'static str {
        match self {
            VisualStudio::Vs2022 => "VS2022",
            VisualStudio::Vs2019 => "VS2019",
            VisualStudio::Vs2017 => "VS2017",
            VisualStudio::Vs2015 => "VS2015",
        }
    }

    /// CMake generator name.
    pub fn generator(&self) -> &'static str {
        match self {
            VisualStudio::Vs2022 => "Visual Studio 17 2022",
            VisualStudio::Vs2019 => "Visual Studio 16 2019",
            VisualStudio::Vs2017 => "Visual Studio 15 2017",
            VisualStudio::Vs2015 => "Visual Studio 14 2015",
        }
    }

    /// Paths whose existence means this generation is installed.
    pub fn install_markers(&self) -> Vec<PathBuf> {
        let year = match self {
            VisualStudio::Vs2015 => {
                return vec![PathBuf::from(PROGRAM_FILES_X86)
                    .join("Microsoft Visual Studio 14.0")
                    .join("VC")
                    .join("vcvarsall.bat")];
            }
            VisualStudio::Vs2017 => "2017",
            VisualStudio::Vs2019 => "2019",
            VisualStudio::Vs2022 => "2022",
        };

        // 2022 is the first 64-bit release and moved out of Program Files (x86)
        let program_files = if *self == VisualStudio::Vs2022 {
            PROGRAM_FILES
        } else {
            PROGRAM_FILES_X86
        };

        EDITIONS
            .iter()
            .map(|edition| {
                PathBuf::from(program_files)
                    .join("Microsoft Visual Studio")
                    .join(year)
                    .join(edition)
                    .join("VC")
                    .join("Auxiliary")
                    .join("Build")
                    .join("vcvarsall.bat")
            })
            .collect()
    }
}

impl fmt::Display for VisualStudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

//! Host-facing build machinery.
//!
//! Detection of the host toolchain, the configuration matrix derived from
//! it, and the command shapes of the external tools the stages drive.

pub mod cmake;
pub mod conan;
pub mod ide;
pub mod invoker;
pub mod matrix;
pub mod toolchain;

pub use cmake::CMake;
pub use conan::Conan;
pub use ide::{find_project, launcher_for, IdeLauncher};
pub use invoker::ToolInvoker;
pub use matrix::build_matrix;
pub use toolchain::{detect, Host, SystemHost, ToolchainInfo, VisualStudio};

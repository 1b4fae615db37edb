//! Core data structures for Conductor.
//!
//! - Build modes and their tool-facing labels
//! - Build configurations and the configuration matrix
//! - Build directory naming
//! - The error taxonomy shared by every stage

pub mod build_mode;
pub mod configuration;
pub mod error;

pub use build_mode::BuildMode;
pub use configuration::{build_dir, BuildConfiguration, ConfigurationMatrix};
pub use error::{Error, Result, FATAL_EXIT_CODE};

//! High-level operations.
//!
//! This module contains the implementation of Conductor commands.

pub mod detect;
pub mod orchestrate;
pub mod stage;

pub use detect::{detect_report, format_report, DetectReport};
pub use orchestrate::{OrchestrateOptions, Orchestrator};
pub use stage::{Stage, Step};

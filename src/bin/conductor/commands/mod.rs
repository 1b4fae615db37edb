//! Command implementations

pub mod completions;
pub mod detect;
pub mod run;

//! Conductor - build-matrix orchestration for CMake + Conan projects
//!
//! This crate detects the host toolchain, derives the matrix of build
//! configurations it supports, and drives Conan, CMake and CTest through
//! the generate, build and test stages for every configuration.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Conductor unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a fake host for detection and a recording
/// process runner.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildConfiguration, BuildMode, ConfigurationMatrix, Error};
pub use ops::{Orchestrator, Stage};
pub use util::context::GlobalContext;

//! Common test utilities and infrastructure
//!
//! Shared fixtures and the installer builder used by the integration suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{CommandLog, InstallerBuilder, TestHelpers};

//! HomeHub installer library
//!
//! Checks host prerequisites, writes the default configuration and secret,
//! prepares data directories, optionally builds front-end assets, then
//! starts the HomeHub container and confirms it is running. All host access
//! goes through the traits in [`traits`] so the sequence can be tested with
//! mocks.

pub mod config;
pub mod context;
pub mod error;
pub mod installer;
pub mod report;
pub mod services;
pub mod state;
pub mod steps;
pub mod template;
pub mod traits;

// Re-export commonly used types
pub use config::InstallerConfig;
pub use context::InstallContext;
pub use error::{InstallerError, InstallerResult};
pub use installer::Installer;
pub use report::InstallReport;
pub use traits::{
    CommandOutput, CommandSpec, EntropySource, FileSystem, MockEntropySource, MockFileSystem, MockPortProbe,
    MockProcessRunner, MockSystemProbe, PortProbe, ProcessRunner, SystemProbe,
};

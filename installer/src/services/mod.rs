//! Service implementations
//!
//! This module contains real implementations of all capability traits.
//! These are the production implementations that touch the host.

pub mod entropy;
pub mod file_system;
pub mod port_probe;
pub mod process_runner;
pub mod system;

// Re-export all service implementations
pub use entropy::OsEntropySource;
pub use file_system::RealFileSystem;
pub use port_probe::RealPortProbe;
pub use process_runner::RealProcessRunner;
pub use system::RealSystemProbe;

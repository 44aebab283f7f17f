//! Shared types for the HomeHub installer
//!
//! Contains the stage model, check results and logging helpers used by the
//! installer library and its binary.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;

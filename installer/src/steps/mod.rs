//! Installation steps, in execution order

pub mod assets;
pub mod config_file;
pub mod directories;
pub mod launcher;
pub mod prereqs;
pub mod secret;

pub use assets::AssetOutcome;
pub use config_file::ConfigOutcome;
pub use secret::SecretOutcome;

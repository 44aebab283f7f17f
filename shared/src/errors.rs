//! Shared error types for the HomeHub installer

use thiserror::Error;

use crate::types::InstallStage;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid stage transition: {from} -> {to}")]
    InvalidStageTransition { from: InstallStage, to: InstallStage },

    #[error("Invalid log level: {value}")]
    InvalidLogLevel { value: String },

    #[error("Tracing initialization failed: {message}")]
    TracingInit { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

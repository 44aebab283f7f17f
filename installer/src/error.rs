//! Installer-specific error types

use std::path::PathBuf;
use thiserror::Error;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("Unsupported operating system: {detected} (this installer supports {expected})")]
    UnsupportedOs { detected: String, expected: String },

    #[error("{tool} is not installed")]
    MissingTool { tool: String, install_hint: String },

    #[error("Port {port} is already in use")]
    PortInUse { port: u16 },

    #[error("File system operation failed: {operation} on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed: `{command}` exited with {status}")]
    CommandFailed {
        step: String,
        command: String,
        status: String,
    },

    #[error("Could not run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{} not found in {}", path.display(), dir.display())]
    MissingDescriptor { path: PathBuf, dir: PathBuf },

    #[error("Service {service} is not running")]
    ServiceNotRunning { service: String, diagnostic: String },

    #[error("Secret generation failed: {message}")]
    Entropy { message: String },

    #[error("Configuration template error: {0}")]
    Template(#[from] serde_yaml::Error),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstallerError {
    pub fn file_system(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Follow-up suggestion printed after the diagnostic line
    pub fn hint(&self) -> Option<String> {
        match self {
            InstallerError::UnsupportedOs { .. } => None,
            InstallerError::MissingTool { install_hint, .. } => Some(install_hint.clone()),
            InstallerError::PortInUse { port } => Some(format!(
                "Stop the process using port {port} (see `lsof -i :{port}`) and re-run the installer"
            )),
            InstallerError::MissingDescriptor { .. } => {
                Some("Run the installer from the HomeHub project directory".to_string())
            }
            InstallerError::ServiceNotRunning { diagnostic, .. } => {
                Some(format!("Check the logs with: {diagnostic}"))
            }
            _ => None,
        }
    }
}

pub type InstallerResult<T> = Result<T, InstallerError>;

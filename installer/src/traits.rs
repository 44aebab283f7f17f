//! Capability traits with mockall annotations for testing
//!
//! Every effect the installer has on the host goes through one of these
//! traits. The real implementations live in `services`; tests inject the
//! generated mocks.

use std::path::{Path, PathBuf};

use crate::error::InstallerResult;

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    /// Directories prepended to the child's PATH
    pub path_prefix: Vec<PathBuf>,
    /// Extra environment variables for the child
    pub envs: Vec<(String, String)>,
    /// Stream output to the terminal instead of capturing it
    pub inherit_output: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, args: &[&str], current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            current_dir: current_dir.into(),
            path_prefix: Vec::new(),
            envs: Vec::new(),
            inherit_output: false,
        }
    }

    pub fn inherit_output(mut self) -> Self {
        self.inherit_output = true;
        self
    }

    /// Program file name without directories, e.g. `docker`
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Rendering used in diagnostics
    pub fn display(&self) -> String {
        let mut rendered = self.program_name();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }

    /// True if this runs `program` with exactly `args`
    pub fn is(&self, program: &str, args: &[&str]) -> bool {
        self.program_name() == program && self.args.iter().map(String::as_str).eq(args.iter().copied())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("status {code}"),
            None => "signal".to_string(),
        }
    }
}

/// Host identity and executable discovery
#[mockall::automock]
pub trait SystemProbe: Send + Sync {
    /// Operating system identifier, e.g. `macos` or `linux`
    fn os_name(&self) -> String;

    fn home_dir(&self) -> Option<PathBuf>;

    /// Locate `program` on the current executable search path
    fn find_in_path(&self, program: &str) -> Option<PathBuf>;

    /// Whether anything (file, socket, directory) exists at `path`
    fn path_exists(&self, path: &Path) -> bool;
}

/// External process execution
#[mockall::automock]
#[async_trait::async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command to completion
    ///
    /// A non-zero exit is reported through `CommandOutput::code`; only a
    /// failure to start the process is an error.
    async fn run(&self, spec: &CommandSpec) -> InstallerResult<CommandOutput>;
}

/// File system access for installer artifacts
#[mockall::automock]
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;

    async fn read_to_string(&self, path: &Path) -> InstallerResult<String>;

    /// Replace `path` with `content`; on failure the previous file is untouched
    async fn write(&self, path: &Path, content: &[u8]) -> InstallerResult<()>;

    /// Like `write`, but readable by the owner only
    async fn write_private(&self, path: &Path, content: &[u8]) -> InstallerResult<()>;

    async fn copy(&self, from: &Path, to: &Path) -> InstallerResult<()>;

    /// Create a directory and any missing parents, existing is success
    async fn create_dir_all(&self, path: &Path) -> InstallerResult<()>;
}

/// TCP port availability
#[mockall::automock]
#[async_trait::async_trait]
pub trait PortProbe: Send + Sync {
    /// True when another process already listens on `port`
    async fn is_in_use(&self, port: u16) -> InstallerResult<bool>;
}

/// Source of cryptographically secure random bytes
#[mockall::automock]
pub trait EntropySource: Send + Sync {
    fn random_bytes(&self, len: usize) -> InstallerResult<Vec<u8>>;
}

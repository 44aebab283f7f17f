//! Real process runner implementation
//!
//! Runs external commands with tokio, applying the PATH prefix and extra
//! environment recorded in the `CommandSpec` to the child only.

use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{InstallerError, InstallerResult};
use crate::traits::{CommandOutput, CommandSpec, ProcessRunner};
use tracing::debug;

/// Real process runner
#[derive(Debug, Default)]
pub struct RealProcessRunner;

impl RealProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// PATH for the child: prefix directories ahead of the inherited value
    fn child_path(spec: &CommandSpec) -> Option<OsString> {
        if spec.path_prefix.is_empty() {
            return None;
        }

        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = spec
            .path_prefix
            .iter()
            .cloned()
            .chain(std::env::split_paths(&inherited));
        std::env::join_paths(dirs).ok()
    }

    fn build_command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).current_dir(&spec.current_dir).stdin(Stdio::null());

        if let Some(path) = Self::child_path(spec) {
            cmd.env("PATH", path);
        }
        for (key, value) in &spec.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

#[async_trait]
impl ProcessRunner for RealProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> InstallerResult<CommandOutput> {
        debug!("⚙️  Running: {}", spec.display());

        let spawn_error = |e| InstallerError::CommandSpawn {
            command: spec.display(),
            source: e,
        };
        let mut cmd = Self::build_command(spec);

        // tokio's output() always pipes, so streamed commands only report status
        if spec.inherit_output {
            let status = cmd.status().await.map_err(spawn_error)?;
            return Ok(CommandOutput {
                code: status.code(),
                ..CommandOutput::default()
            });
        }

        let output = cmd.output().await.map_err(spawn_error)?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

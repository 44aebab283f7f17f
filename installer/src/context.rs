//! Explicit run context
//!
//! Discoveries made while checking prerequisites (where the container
//! runtime lives, which daemon socket to use, which optional tools exist)
//! are recorded here and applied to every later command. The installer never
//! mutates its own process environment.

use std::path::PathBuf;

use shared::{CheckResult, FeatureFlags};

use crate::traits::CommandSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContext {
    pub working_dir: PathBuf,
    /// Container runtime executable
    pub runtime: PathBuf,
    /// Front-end package manager, when present
    pub npm: Option<PathBuf>,
    /// Directories prepended to PATH for child processes
    pub path_prefix: Vec<PathBuf>,
    /// `DOCKER_HOST` value for child processes
    pub docker_host: Option<String>,
    pub features: FeatureFlags,
    pub checks: Vec<CheckResult>,
}

impl InstallContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            runtime: PathBuf::from("docker"),
            npm: None,
            path_prefix: Vec::new(),
            docker_host: None,
            features: FeatureFlags::default(),
            checks: Vec::new(),
        }
    }

    /// Command run in the working directory with the recorded environment
    pub fn command(&self, program: impl Into<PathBuf>, args: &[&str]) -> CommandSpec {
        let mut spec = CommandSpec::new(program, args, self.working_dir.clone());
        spec.path_prefix = self.path_prefix.clone();
        if let Some(host) = &self.docker_host {
            spec.envs.push(("DOCKER_HOST".to_string(), host.clone()));
        }
        spec
    }

    /// `docker compose <args>`
    pub fn compose(&self, args: &[&str]) -> CommandSpec {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push("compose");
        full.extend_from_slice(args);
        self.command(self.runtime.clone(), &full)
    }

    pub fn record(&mut self, check: CheckResult) {
        self.checks.push(check);
    }
}

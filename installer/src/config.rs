//! Installer configuration
//!
//! Every fixed value the installer depends on lives here so that each step
//! receives it explicitly instead of reading ambient process state.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Port the HomeHub service listens on
pub const DEFAULT_PORT: u16 = 5000;

/// Fixed installer settings
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Directory all relative paths resolve against
    pub working_dir: PathBuf,
    /// Operating system identifier the installer accepts
    pub supported_os: String,
    pub port: u16,
    pub config_file: PathBuf,
    pub config_backup: PathBuf,
    pub env_file: PathBuf,
    pub secret_key_name: String,
    /// Number of random bytes in the generated secret
    pub secret_bytes: usize,
    pub data_dirs: Vec<PathBuf>,
    pub compose_file: PathBuf,
    pub package_manifest: PathBuf,
    pub service_name: String,
    /// Locations checked for the container runtime when it is not on PATH
    pub runtime_search_dirs: Vec<PathBuf>,
    /// Daemon socket, relative to the home directory
    pub runtime_socket: PathBuf,
    /// Pause between `up` and the status query
    pub startup_grace: Duration,
}

impl InstallerConfig {
    /// Create configuration rooted at `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            supported_os: "macos".to_string(),
            port: DEFAULT_PORT,
            config_file: PathBuf::from("config.yml"),
            config_backup: PathBuf::from("config.yml.backup"),
            env_file: PathBuf::from(".env"),
            secret_key_name: "SECRET_KEY".to_string(),
            secret_bytes: 32,
            data_dirs: vec![
                PathBuf::from("data"),
                PathBuf::from("data/uploads"),
                PathBuf::from("data/backups"),
                PathBuf::from("logs"),
            ],
            compose_file: PathBuf::from("docker-compose.yml"),
            package_manifest: PathBuf::from("package.json"),
            service_name: "homehub".to_string(),
            runtime_search_dirs: vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/opt/homebrew/bin"),
                PathBuf::from("/Applications/Docker.app/Contents/Resources/bin"),
            ],
            runtime_socket: PathBuf::from(".docker/run/docker.sock"),
            startup_grace: Duration::from_secs(5),
        }
    }

    /// Configure supported OS (fluent API)
    pub fn with_supported_os(mut self, os: impl Into<String>) -> Self {
        self.supported_os = os.into();
        self
    }

    /// Configure service port (fluent API)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Configure startup pause (fluent API)
    pub fn with_startup_grace(mut self, grace: Duration) -> Self {
        self.startup_grace = grace;
        self
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.working_dir.join(relative)
    }

    pub fn config_path(&self) -> PathBuf {
        self.resolve(&self.config_file)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.resolve(&self.config_backup)
    }

    pub fn env_path(&self) -> PathBuf {
        self.resolve(&self.env_file)
    }

    pub fn compose_path(&self) -> PathBuf {
        self.resolve(&self.compose_file)
    }

    pub fn package_manifest_path(&self) -> PathBuf {
        self.resolve(&self.package_manifest)
    }

    pub fn data_dir_paths(&self) -> Vec<PathBuf> {
        self.data_dirs.iter().map(|d| self.resolve(d)).collect()
    }

    /// URL the service is reachable at once running
    pub fn service_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// Command suggested when the service fails to come up
    pub fn diagnostic_command(&self) -> String {
        format!("docker compose logs {}", self.service_name)
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

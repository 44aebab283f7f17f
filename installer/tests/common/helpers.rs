//! Test helpers and builder patterns for installer tests
//!
//! The builder wires mocks for host discovery, process execution and port
//! probing, while files are written for real into a temporary directory.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use installer::services::{OsEntropySource, RealFileSystem};
use installer::{CommandOutput, Installer, InstallerConfig, MockPortProbe, MockProcessRunner, MockSystemProbe};
use tempfile::TempDir;

use super::fixtures::TestFixtures;

/// Type alias for test installer with mocked host access
pub type TestInstaller = Installer<MockSystemProbe, MockProcessRunner, RealFileSystem, MockPortProbe, OsEntropySource>;

/// Commands the mocked runner was asked to execute, rendered as strings
#[derive(Clone, Default)]
pub struct CommandLog(Arc<Mutex<Vec<String>>>);

impl CommandLog {
    pub fn push(&self, command: String) {
        self.0.lock().unwrap().push(command);
    }

    pub fn commands(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands().iter().any(|c| c == command)
    }

    pub fn any_starting_with(&self, prefix: &str) -> bool {
        self.commands().iter().any(|c| c.starts_with(prefix))
    }
}

/// Builder for test installers with sensible defaults: macOS, every tool
/// present, port free, compose and package descriptors in place
pub struct InstallerBuilder {
    os: String,
    npm: bool,
    python: bool,
    port_in_use: bool,
    compose_file: bool,
    package_json: bool,
    existing_config: Option<String>,
    ps_output: String,
    failing_command: Option<String>,
}

impl InstallerBuilder {
    pub fn new() -> Self {
        Self {
            os: "macos".to_string(),
            npm: true,
            python: true,
            port_in_use: false,
            compose_file: true,
            package_json: true,
            existing_config: None,
            ps_output: TestFixtures::PS_RUNNING.to_string(),
            failing_command: None,
        }
    }

    pub fn with_os(mut self, os: &str) -> Self {
        self.os = os.to_string();
        self
    }

    pub fn without_npm(mut self) -> Self {
        self.npm = false;
        self
    }

    pub fn without_python(mut self) -> Self {
        self.python = false;
        self
    }

    pub fn with_port_in_use(mut self) -> Self {
        self.port_in_use = true;
        self
    }

    pub fn without_compose_file(mut self) -> Self {
        self.compose_file = false;
        self
    }

    pub fn with_existing_config(mut self, content: &str) -> Self {
        self.existing_config = Some(content.to_string());
        self
    }

    pub fn with_ps_output(mut self, output: &str) -> Self {
        self.ps_output = output.to_string();
        self
    }

    /// Make the command rendered as `command` exit with status 1
    pub fn with_failing_command(mut self, command: &str) -> Self {
        self.failing_command = Some(command.to_string());
        self
    }

    /// Prepare `dir` and build an installer rooted there
    pub fn build_in(self, dir: &Path) -> (TestInstaller, CommandLog) {
        if self.compose_file {
            std::fs::write(dir.join("docker-compose.yml"), TestFixtures::COMPOSE_FILE).unwrap();
        }
        if self.package_json {
            std::fs::write(dir.join("package.json"), TestFixtures::PACKAGE_JSON).unwrap();
        }
        if let Some(content) = &self.existing_config {
            std::fs::write(dir.join("config.yml"), content).unwrap();
        }

        let log = CommandLog::default();
        let config = InstallerConfig::new(dir).with_startup_grace(Duration::ZERO);

        let installer = Installer::new(
            config,
            self.probe(),
            self.runner(log.clone()),
            RealFileSystem::new(),
            self.ports(),
            OsEntropySource::new(),
        );
        (installer, log)
    }

    fn probe(&self) -> MockSystemProbe {
        let mut probe = MockSystemProbe::new();
        let os = self.os.clone();
        let (npm, python) = (self.npm, self.python);

        probe.expect_os_name().returning(move || os.clone());
        probe.expect_home_dir().returning(|| None);
        probe.expect_path_exists().returning(|_| false);
        probe.expect_find_in_path().returning(move |program| match program {
            "docker" => Some(PathBuf::from("/usr/local/bin/docker")),
            "npm" if npm => Some(PathBuf::from("/usr/local/bin/npm")),
            "python3" if python => Some(PathBuf::from("/usr/bin/python3")),
            _ => None,
        });
        probe
    }

    fn runner(&self, log: CommandLog) -> MockProcessRunner {
        let mut runner = MockProcessRunner::new();
        let ps_output = self.ps_output.clone();
        let failing = self.failing_command.clone();

        runner.expect_run().returning(move |spec| {
            let rendered = spec.display();
            log.push(rendered.clone());

            if failing.as_deref() == Some(rendered.as_str()) {
                return Ok(CommandOutput::failure(1, "simulated failure"));
            }

            let stdout = match rendered.as_str() {
                "docker --version" => TestFixtures::DOCKER_VERSION,
                "docker compose version" => TestFixtures::COMPOSE_VERSION,
                "python3 --version" => TestFixtures::PYTHON_VERSION,
                "docker compose ps --format json" => ps_output.as_str(),
                _ => "",
            };
            Ok(CommandOutput::success(stdout))
        });
        runner
    }

    fn ports(&self) -> MockPortProbe {
        let mut ports = MockPortProbe::new();
        let in_use = self.port_in_use;
        ports.expect_is_in_use().returning(move |_| Ok(in_use));
        ports
    }
}

impl Default for InstallerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    pub fn temp_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    pub fn read(dir: &Path, file: &str) -> String {
        std::fs::read_to_string(dir.join(file)).unwrap()
    }

    /// Value of SECRET_KEY in the directory's .env
    pub fn secret_key(dir: &Path) -> String {
        dotenv::from_path_iter(dir.join(".env"))
            .unwrap()
            .filter_map(Result::ok)
            .find(|(key, _)| key == "SECRET_KEY")
            .map(|(_, value)| value)
            .unwrap()
    }

    /// Names of the entries in `dir`, sorted
    pub fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn assert_data_dirs(dir: &Path) {
        for name in TestFixtures::DATA_DIRS {
            assert!(dir.join(name).is_dir(), "{name} should exist");
        }
    }
}

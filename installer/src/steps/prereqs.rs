//! Prerequisite checks
//!
//! Runs in a fixed order: operating system, container runtime, compose
//! plugin, front-end toolchain, scripting runtime, service port. Required
//! checks return an error; optional ones clear a feature flag and continue.

use std::path::PathBuf;

use shared::{CheckResult, InstallStage, logging, stage_debug};

use crate::config::InstallerConfig;
use crate::context::InstallContext;
use crate::error::{InstallerError, InstallerResult};
use crate::traits::{PortProbe, ProcessRunner, SystemProbe};

const STAGE: InstallStage = InstallStage::CheckingPrereqs;

const DOCKER_INSTALL_HINT: &str =
    "Install Docker Desktop from https://www.docker.com/products/docker-desktop and re-run the installer";
const COMPOSE_INSTALL_HINT: &str =
    "Update Docker Desktop (it bundles the compose plugin) and re-run the installer";

/// Run every prerequisite check and return the context later steps use
pub async fn check_prerequisites(
    config: &InstallerConfig,
    probe: &impl SystemProbe,
    runner: &impl ProcessRunner,
    ports: &impl PortProbe,
) -> InstallerResult<InstallContext> {
    let mut ctx = InstallContext::new(config.working_dir.clone());

    check_operating_system(config, probe, &mut ctx)?;
    locate_runtime(config, probe, &mut ctx)?;
    detect_runtime_socket(config, probe, &mut ctx);
    check_runtime_version(runner, &mut ctx).await?;
    check_compose(runner, &mut ctx).await?;
    check_npm(probe, &mut ctx);
    check_python(probe, runner, &mut ctx).await;
    check_port(config, ports, &mut ctx).await?;

    Ok(ctx)
}

fn check_operating_system(
    config: &InstallerConfig,
    probe: &impl SystemProbe,
    ctx: &mut InstallContext,
) -> InstallerResult<()> {
    let detected = probe.os_name();
    if detected != config.supported_os {
        return Err(InstallerError::UnsupportedOs {
            detected,
            expected: config.supported_os.clone(),
        });
    }

    logging::log_success(STAGE, &format!("Operating system: {detected}"));
    ctx.record(CheckResult::passed("os", detected));
    Ok(())
}

/// Find `docker` on PATH, falling back to well-known install locations
fn locate_runtime(
    config: &InstallerConfig,
    probe: &impl SystemProbe,
    ctx: &mut InstallContext,
) -> InstallerResult<()> {
    if let Some(path) = probe.find_in_path("docker") {
        ctx.runtime = path;
        return Ok(());
    }

    let found = config
        .runtime_search_dirs
        .iter()
        .map(|dir| (dir, dir.join("docker")))
        .find(|(_, candidate)| probe.path_exists(candidate));

    match found {
        Some((dir, candidate)) => {
            logging::log_progress(
                STAGE,
                "Docker found outside PATH",
                &format!("adding {} to PATH", dir.display()),
            );
            ctx.path_prefix.push(dir.clone());
            ctx.runtime = candidate;
            Ok(())
        }
        None => Err(InstallerError::MissingTool {
            tool: "Docker".to_string(),
            install_hint: DOCKER_INSTALL_HINT.to_string(),
        }),
    }
}

fn detect_runtime_socket(config: &InstallerConfig, probe: &impl SystemProbe, ctx: &mut InstallContext) {
    let Some(home) = probe.home_dir() else {
        return;
    };

    let socket: PathBuf = home.join(&config.runtime_socket);
    if probe.path_exists(&socket) {
        stage_debug!(STAGE, "🔌 Using Docker socket {}", socket.display());
        ctx.docker_host = Some(format!("unix://{}", socket.display()));
    }
}

async fn check_runtime_version(runner: &impl ProcessRunner, ctx: &mut InstallContext) -> InstallerResult<()> {
    let spec = ctx.command(ctx.runtime.clone(), &["--version"]);
    let version = match runner.run(&spec).await {
        Ok(output) if output.is_success() => first_line(&output.stdout),
        _ => {
            return Err(InstallerError::MissingTool {
                tool: "Docker".to_string(),
                install_hint: DOCKER_INSTALL_HINT.to_string(),
            });
        }
    };

    logging::log_success(STAGE, &format!("Docker: {version}"));
    ctx.record(CheckResult::passed("docker", version));
    Ok(())
}

async fn check_compose(runner: &impl ProcessRunner, ctx: &mut InstallContext) -> InstallerResult<()> {
    let spec = ctx.compose(&["version"]);
    let version = match runner.run(&spec).await {
        Ok(output) if output.is_success() => first_line(&output.stdout),
        _ => {
            return Err(InstallerError::MissingTool {
                tool: "Docker Compose".to_string(),
                install_hint: COMPOSE_INSTALL_HINT.to_string(),
            });
        }
    };

    logging::log_success(STAGE, &format!("Docker Compose: {version}"));
    ctx.record(CheckResult::passed("compose", version));
    Ok(())
}

fn check_npm(probe: &impl SystemProbe, ctx: &mut InstallContext) {
    match probe.find_in_path("npm") {
        Some(path) => {
            logging::log_success(STAGE, &format!("npm: {}", path.display()));
            ctx.record(CheckResult::passed("npm", path.display().to_string()));
            ctx.npm = Some(path);
        }
        None => {
            logging::log_warning(
                STAGE,
                "npm not found, skipping CSS build (the image ships pre-built assets)",
            );
            ctx.features.asset_build = false;
            ctx.record(CheckResult::degraded("npm", "not installed"));
        }
    }
}

/// Informational only: never fails the run
async fn check_python(probe: &impl SystemProbe, runner: &impl ProcessRunner, ctx: &mut InstallContext) {
    let Some(path) = probe.find_in_path("python3") else {
        logging::log_warning(STAGE, "python3 not found, helper scripts will be unavailable");
        ctx.features.python = false;
        ctx.record(CheckResult::degraded("python3", "not installed"));
        return;
    };

    let spec = ctx.command(path, &["--version"]);
    let version = match runner.run(&spec).await {
        // Older interpreters print the version to stderr
        Ok(output) if output.is_success() => {
            let line = first_line(&output.stdout);
            if line.is_empty() { first_line(&output.stderr) } else { line }
        }
        _ => "version unknown".to_string(),
    };

    logging::log_success(STAGE, &format!("Python: {version}"));
    ctx.record(CheckResult::passed("python3", version));
}

async fn check_port(
    config: &InstallerConfig,
    ports: &impl PortProbe,
    ctx: &mut InstallContext,
) -> InstallerResult<()> {
    if ports.is_in_use(config.port).await? {
        return Err(InstallerError::PortInUse { port: config.port });
    }

    logging::log_success(STAGE, &format!("Port {} is available", config.port));
    ctx.record(CheckResult::passed("port", config.port.to_string()));
    Ok(())
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{CommandOutput, MockPortProbe, MockProcessRunner, MockSystemProbe};
    use shared::CheckStatus;
    use std::path::Path;

    fn mac_probe(docker_on_path: bool, npm: bool) -> MockSystemProbe {
        let mut probe = MockSystemProbe::new();
        probe.expect_os_name().returning(|| "macos".to_string());
        probe.expect_home_dir().returning(|| Some(PathBuf::from("/Users/me")));
        probe.expect_find_in_path().returning(move |program| match program {
            "docker" if docker_on_path => Some(PathBuf::from("/usr/local/bin/docker")),
            "npm" if npm => Some(PathBuf::from("/usr/local/bin/npm")),
            "python3" => Some(PathBuf::from("/usr/bin/python3")),
            _ => None,
        });
        probe
    }

    fn healthy_runner() -> MockProcessRunner {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|spec| {
            if spec.is("docker", &["--version"]) {
                Ok(CommandOutput::success("Docker version 27.3.1, build ce12230\n"))
            } else if spec.is("docker", &["compose", "version"]) {
                Ok(CommandOutput::success("Docker Compose version v2.29.7\n"))
            } else if spec.is("python3", &["--version"]) {
                Ok(CommandOutput::success("Python 3.12.4\n"))
            } else {
                Ok(CommandOutput::failure(127, "unexpected command"))
            }
        });
        runner
    }

    fn free_port() -> MockPortProbe {
        let mut ports = MockPortProbe::new();
        ports.expect_is_in_use().returning(|_| Ok(false));
        ports
    }

    #[tokio::test]
    async fn test_all_prerequisites_present() {
        let config = InstallerConfig::new("/srv/homehub");
        let mut probe = mac_probe(true, true);
        probe.expect_path_exists().returning(|_| false);

        let ctx = check_prerequisites(&config, &probe, &healthy_runner(), &free_port())
            .await
            .unwrap();

        assert_eq!(ctx.runtime, PathBuf::from("/usr/local/bin/docker"));
        assert!(ctx.features.asset_build);
        assert!(ctx.features.python);
        assert!(ctx.path_prefix.is_empty());
        assert!(ctx.docker_host.is_none());
        assert!(ctx.checks.iter().all(|c| c.status == CheckStatus::Passed));
    }

    #[tokio::test]
    async fn test_runtime_found_in_app_bundle() {
        let config = InstallerConfig::new("/srv/homehub");
        let mut probe = mac_probe(false, true);
        probe.expect_path_exists().returning(|path: &Path| {
            path == Path::new("/Applications/Docker.app/Contents/Resources/bin/docker")
                || path == Path::new("/Users/me/.docker/run/docker.sock")
        });

        let ctx = check_prerequisites(&config, &probe, &healthy_runner(), &free_port())
            .await
            .unwrap();

        assert_eq!(
            ctx.path_prefix,
            vec![PathBuf::from("/Applications/Docker.app/Contents/Resources/bin")]
        );
        assert_eq!(
            ctx.docker_host.as_deref(),
            Some("unix:///Users/me/.docker/run/docker.sock")
        );
    }

    #[tokio::test]
    async fn test_missing_runtime_is_fatal() {
        let config = InstallerConfig::new("/srv/homehub");
        let mut probe = mac_probe(false, true);
        probe.expect_path_exists().returning(|_| false);

        let result = check_prerequisites(&config, &probe, &MockProcessRunner::new(), &MockPortProbe::new()).await;

        assert!(matches!(result, Err(InstallerError::MissingTool { ref tool, .. }) if tool == "Docker"));
    }

    #[tokio::test]
    async fn test_missing_compose_is_fatal() {
        let config = InstallerConfig::new("/srv/homehub");
        let mut probe = mac_probe(true, true);
        probe.expect_path_exists().returning(|_| false);
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|spec| {
            if spec.is("docker", &["--version"]) {
                Ok(CommandOutput::success("Docker version 20.10.0\n"))
            } else {
                Ok(CommandOutput::failure(1, "docker: 'compose' is not a docker command."))
            }
        });

        let result = check_prerequisites(&config, &probe, &runner, &MockPortProbe::new()).await;

        assert!(
            matches!(result, Err(InstallerError::MissingTool { ref tool, .. }) if tool == "Docker Compose")
        );
    }

    #[tokio::test]
    async fn test_missing_npm_degrades() {
        let config = InstallerConfig::new("/srv/homehub");
        let mut probe = mac_probe(true, false);
        probe.expect_path_exists().returning(|_| false);

        let ctx = check_prerequisites(&config, &probe, &healthy_runner(), &free_port())
            .await
            .unwrap();

        assert!(!ctx.features.asset_build);
        assert!(ctx.npm.is_none());
        assert!(
            ctx.checks
                .iter()
                .any(|c| c.name == "npm" && c.status == CheckStatus::Degraded)
        );
    }

    #[tokio::test]
    async fn test_occupied_port_is_fatal() {
        let config = InstallerConfig::new("/srv/homehub");
        let mut probe = mac_probe(true, true);
        probe.expect_path_exists().returning(|_| false);
        let mut ports = MockPortProbe::new();
        ports.expect_is_in_use().withf(|port| *port == 5000).returning(|_| Ok(true));

        let result = check_prerequisites(&config, &probe, &healthy_runner(), &ports).await;

        assert!(matches!(result, Err(InstallerError::PortInUse { port: 5000 })));
    }

    #[tokio::test]
    async fn test_wrong_os_stops_before_other_checks() {
        let config = InstallerConfig::new("/srv/homehub");
        let mut probe = MockSystemProbe::new();
        probe.expect_os_name().returning(|| "linux".to_string());
        probe.expect_find_in_path().never();

        let result = check_prerequisites(&config, &probe, &MockProcessRunner::new(), &MockPortProbe::new()).await;

        assert!(matches!(result, Err(InstallerError::UnsupportedOs { .. })));
    }
}

//! Service launcher
//!
//! Drives `docker compose` through pull, start and a status check. The
//! compose descriptor must be present in the working directory: having the
//! tool installed does not make the directory a deployment.

use serde::Deserialize;

use shared::{InstallStage, logging, stage_debug};

use crate::config::InstallerConfig;
use crate::context::InstallContext;
use crate::error::{InstallerError, InstallerResult};
use crate::traits::{FileSystem, ProcessRunner};

pub async fn ensure_descriptor(config: &InstallerConfig, fs: &impl FileSystem) -> InstallerResult<()> {
    if !fs.exists(&config.compose_path()).await {
        return Err(InstallerError::MissingDescriptor {
            path: config.compose_file.clone(),
            dir: config.working_dir.clone(),
        });
    }
    Ok(())
}

pub async fn pull_images(ctx: &InstallContext, runner: &impl ProcessRunner) -> InstallerResult<()> {
    let stage = InstallStage::PullingImage;
    let spec = ctx.compose(&["pull"]).inherit_output();
    let output = runner.run(&spec).await?;
    if !output.is_success() {
        return Err(InstallerError::CommandFailed {
            step: "Image pull".to_string(),
            command: spec.display(),
            status: output.status_label(),
        });
    }

    logging::log_success(stage, "Latest image pulled");
    Ok(())
}

pub async fn start_service(ctx: &InstallContext, runner: &impl ProcessRunner) -> InstallerResult<()> {
    let stage = InstallStage::StartingService;
    let spec = ctx.compose(&["up", "-d"]).inherit_output();
    let output = runner.run(&spec).await?;
    if !output.is_success() {
        return Err(InstallerError::CommandFailed {
            step: "Service start".to_string(),
            command: spec.display(),
            status: output.status_label(),
        });
    }

    logging::log_success(stage, "Service started in the background");
    Ok(())
}

/// Wait out the startup grace period, then require a running service
pub async fn verify_running(
    config: &InstallerConfig,
    ctx: &InstallContext,
    runner: &impl ProcessRunner,
) -> InstallerResult<Vec<String>> {
    let stage = InstallStage::VerifyingRunning;
    if !config.startup_grace.is_zero() {
        stage_debug!(stage, "⏳ Waiting {:?} for startup", config.startup_grace);
        tokio::time::sleep(config.startup_grace).await;
    }

    let not_running = || InstallerError::ServiceNotRunning {
        service: config.service_name.clone(),
        diagnostic: config.diagnostic_command(),
    };

    let output = runner.run(&ctx.compose(&["ps", "--format", "json"])).await?;
    if !output.is_success() {
        return Err(not_running());
    }

    let running = parse_running_services(&output.stdout);
    if running.is_empty() {
        return Err(not_running());
    }

    logging::log_success(stage, &format!("Running: {}", running.join(", ")));
    Ok(running)
}

/// One entry of `docker compose ps --format json`
#[derive(Debug, Deserialize)]
struct PsEntry {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Service", default)]
    service: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Status", default)]
    status: String,
}

impl PsEntry {
    fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running") || self.status.starts_with("Up")
    }

    fn label(self) -> String {
        if self.service.is_empty() { self.name } else { self.service }
    }
}

/// Names of running services from `docker compose ps` output
///
/// Accepts a JSON array (older compose), one JSON object per line (newer
/// compose) or the plain table.
pub fn parse_running_services(output: &str) -> Vec<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let entries: Vec<PsEntry> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).unwrap_or_default()
    } else {
        trimmed
            .lines()
            .filter_map(|line| serde_json::from_str(line.trim()).ok())
            .collect()
    };

    if !entries.is_empty() {
        return entries
            .into_iter()
            .filter(PsEntry::is_running)
            .map(PsEntry::label)
            .collect();
    }

    trimmed
        .lines()
        .filter(|line| {
            let lower = line.to_ascii_lowercase();
            lower.contains("running") || line.split_whitespace().any(|word| word == "Up")
        })
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

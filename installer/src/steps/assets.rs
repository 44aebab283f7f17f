//! Front-end asset build
//!
//! Only runs when npm was found. Once entered, any failure is fatal; there
//! is no fallback to the assets baked into the image.

use shared::{InstallStage, logging};

use crate::config::InstallerConfig;
use crate::context::InstallContext;
use crate::error::{InstallerError, InstallerResult};
use crate::traits::{CommandSpec, FileSystem, ProcessRunner};

const STAGE: InstallStage = InstallStage::BuildingAssets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOutcome {
    Built,
    /// Toolchain missing, the image's embedded assets are used
    Skipped,
}

pub async fn build_assets(
    config: &InstallerConfig,
    ctx: &InstallContext,
    fs: &impl FileSystem,
    runner: &impl ProcessRunner,
) -> InstallerResult<AssetOutcome> {
    let npm = match (&ctx.npm, ctx.features.asset_build) {
        (Some(npm), true) => npm.clone(),
        _ => return Ok(AssetOutcome::Skipped),
    };

    let manifest = config.package_manifest_path();
    if !fs.exists(&manifest).await {
        return Err(InstallerError::MissingDescriptor {
            path: config.package_manifest.clone(),
            dir: config.working_dir.clone(),
        });
    }

    logging::log_progress(STAGE, "Installing dependencies", "npm install");
    run_step(runner, "Dependency install", ctx.command(&npm, &["install"]).inherit_output()).await?;

    logging::log_progress(STAGE, "Building stylesheet", "npm run build:css");
    run_step(runner, "Asset build", ctx.command(&npm, &["run", "build:css"]).inherit_output()).await?;

    logging::log_success(STAGE, "Front-end assets built");
    Ok(AssetOutcome::Built)
}

async fn run_step(runner: &impl ProcessRunner, step: &str, spec: CommandSpec) -> InstallerResult<()> {
    let output = runner.run(&spec).await?;
    if !output.is_success() {
        return Err(InstallerError::CommandFailed {
            step: step.to_string(),
            command: spec.display(),
            status: output.status_label(),
        });
    }
    Ok(())
}

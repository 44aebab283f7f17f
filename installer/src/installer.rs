//! Main installer implementation
//!
//! Runs every step in order against injected services and stops at the
//! first error. Completed steps are never rolled back.

use shared::{InstallStage, logging};

use crate::{
    config::InstallerConfig,
    error::InstallerResult,
    report::InstallReport,
    state::InstallState,
    steps::{AssetOutcome, assets, config_file, directories, launcher, prereqs, secret},
    traits::{EntropySource, FileSystem, PortProbe, ProcessRunner, SystemProbe},
};

/// Installer that drives the full setup sequence
pub struct Installer<S, R, F, P, K>
where
    S: SystemProbe,
    R: ProcessRunner,
    F: FileSystem,
    P: PortProbe,
    K: EntropySource,
{
    config: InstallerConfig,
    state: InstallState,

    /// Injected services
    probe: S,
    runner: R,
    file_system: F,
    ports: P,
    entropy: K,
}

impl<S, R, F, P, K> Installer<S, R, F, P, K>
where
    S: SystemProbe,
    R: ProcessRunner,
    F: FileSystem,
    P: PortProbe,
    K: EntropySource,
{
    /// Create new installer with injected dependencies
    pub fn new(config: InstallerConfig, probe: S, runner: R, file_system: F, ports: P, entropy: K) -> Self {
        Self {
            config,
            state: InstallState::new(),
            probe,
            runner,
            file_system,
            ports,
            entropy,
        }
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    pub fn stage(&self) -> InstallStage {
        self.state.stage()
    }

    pub fn history(&self) -> &[InstallStage] {
        self.state.history()
    }

    /// Run the whole installation
    ///
    /// On error the installer is left in `InstallStage::Failed` and the
    /// error is returned unchanged for the caller to report.
    pub async fn run(&mut self) -> InstallerResult<InstallReport> {
        match self.run_stages().await {
            Ok(report) => Ok(report),
            Err(e) => {
                logging::log_error(self.state.stage(), self.state.stage().description(), &e);
                self.state.fail();
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self) -> InstallerResult<InstallReport> {
        logging::log_stage(InstallStage::CheckingPrereqs);
        let ctx = prereqs::check_prerequisites(&self.config, &self.probe, &self.runner, &self.ports).await?;
        self.state.set_build_assets(ctx.features.asset_build);

        self.advance(InstallStage::WritingConfig)?;
        let config = config_file::write_config(&self.config, &self.file_system).await?;

        self.advance(InstallStage::GeneratingSecret)?;
        let secret = secret::generate_secret(&self.config, &self.file_system, &self.entropy).await?;

        self.advance(InstallStage::ProvisioningDirs)?;
        let directories = directories::provision(&self.config, &self.file_system).await?;

        let assets = if ctx.features.asset_build {
            self.advance(InstallStage::BuildingAssets)?;
            assets::build_assets(&self.config, &ctx, &self.file_system, &self.runner).await?
        } else {
            AssetOutcome::Skipped
        };

        self.advance(InstallStage::PullingImage)?;
        launcher::ensure_descriptor(&self.config, &self.file_system).await?;
        launcher::pull_images(&ctx, &self.runner).await?;

        self.advance(InstallStage::StartingService)?;
        launcher::start_service(&ctx, &self.runner).await?;

        self.advance(InstallStage::VerifyingRunning)?;
        let running_services = launcher::verify_running(&self.config, &ctx, &self.runner).await?;

        self.advance(InstallStage::Done)?;

        Ok(InstallReport {
            service_url: self.config.service_url(),
            config,
            secret,
            directories,
            assets,
            running_services,
            checks: ctx.checks,
            stages: self.state.history().to_vec(),
        })
    }

    fn advance(&mut self, to: InstallStage) -> InstallerResult<()> {
        self.state.advance(to)?;
        if !to.is_terminal() {
            logging::log_stage(to);
        }
        Ok(())
    }
}

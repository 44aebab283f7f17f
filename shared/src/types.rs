//! Core shared types for the installer stage model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SharedError, SharedResult};

/// Stage of an installation run
///
/// Stages run strictly in declaration order. `BuildingAssets` is skipped when
/// the front-end toolchain is unavailable, and any non-terminal stage may
/// move straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallStage {
    CheckingPrereqs,
    WritingConfig,
    GeneratingSecret,
    ProvisioningDirs,
    BuildingAssets,
    PullingImage,
    StartingService,
    VerifyingRunning,
    Done,
    Failed,
}

impl InstallStage {
    /// Linear successor of this stage, `None` for terminal stages
    pub fn next(self, build_assets: bool) -> Option<InstallStage> {
        use InstallStage::*;
        match self {
            CheckingPrereqs => Some(WritingConfig),
            WritingConfig => Some(GeneratingSecret),
            GeneratingSecret => Some(ProvisioningDirs),
            ProvisioningDirs if build_assets => Some(BuildingAssets),
            ProvisioningDirs => Some(PullingImage),
            BuildingAssets => Some(PullingImage),
            PullingImage => Some(StartingService),
            StartingService => Some(VerifyingRunning),
            VerifyingRunning => Some(Done),
            Done | Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, InstallStage::Done | InstallStage::Failed)
    }

    /// Validate a transition from `self` to `to`
    pub fn transition(self, to: InstallStage, build_assets: bool) -> SharedResult<InstallStage> {
        let allowed = match to {
            InstallStage::Failed => !self.is_terminal(),
            _ => self.next(build_assets) == Some(to),
        };

        if allowed {
            Ok(to)
        } else {
            Err(SharedError::InvalidStageTransition { from: self, to })
        }
    }

    /// Human readable description used in progress output
    pub fn description(self) -> &'static str {
        match self {
            InstallStage::CheckingPrereqs => "Checking prerequisites",
            InstallStage::WritingConfig => "Writing configuration",
            InstallStage::GeneratingSecret => "Generating secret key",
            InstallStage::ProvisioningDirs => "Creating data directories",
            InstallStage::BuildingAssets => "Building front-end assets",
            InstallStage::PullingImage => "Pulling container image",
            InstallStage::StartingService => "Starting service",
            InstallStage::VerifyingRunning => "Verifying service",
            InstallStage::Done => "Installation complete",
            InstallStage::Failed => "Installation failed",
        }
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStage::CheckingPrereqs => "checking_prereqs",
            InstallStage::WritingConfig => "writing_config",
            InstallStage::GeneratingSecret => "generating_secret",
            InstallStage::ProvisioningDirs => "provisioning_dirs",
            InstallStage::BuildingAssets => "building_assets",
            InstallStage::PullingImage => "pulling_image",
            InstallStage::StartingService => "starting_service",
            InstallStage::VerifyingRunning => "verifying_running",
            InstallStage::Done => "done",
            InstallStage::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Optional capabilities that degrade instead of aborting when missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Front-end toolchain present, asset bundle will be built
    pub asset_build: bool,
    /// Scripting runtime present (informational only)
    pub python: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            asset_build: true,
            python: true,
        }
    }
}

/// Outcome of a single non-fatal prerequisite check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Passed,
    Degraded,
}

/// Recorded result of a prerequisite check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckResult {
    pub fn passed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Passed,
            detail: detail.into(),
        }
    }

    pub fn degraded(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Degraded,
            detail: detail.into(),
        }
    }
}

//! Installation state tracking

use shared::{InstallStage, SharedResult};

/// Current stage plus the path taken to reach it
#[derive(Debug, Clone)]
pub struct InstallState {
    stage: InstallStage,
    build_assets: bool,
    history: Vec<InstallStage>,
}

impl InstallState {
    pub fn new() -> Self {
        Self {
            stage: InstallStage::CheckingPrereqs,
            build_assets: true,
            history: vec![InstallStage::CheckingPrereqs],
        }
    }

    pub fn stage(&self) -> InstallStage {
        self.stage
    }

    pub fn history(&self) -> &[InstallStage] {
        &self.history
    }

    /// Whether the asset stage is part of this run
    pub fn set_build_assets(&mut self, build_assets: bool) {
        self.build_assets = build_assets;
    }

    pub fn advance(&mut self, to: InstallStage) -> SharedResult<()> {
        self.stage = self.stage.transition(to, self.build_assets)?;
        self.history.push(to);
        Ok(())
    }

    /// Move to `Failed`; a no-op once terminal
    pub fn fail(&mut self) {
        if !self.stage.is_terminal() {
            self.stage = InstallStage::Failed;
            self.history.push(InstallStage::Failed);
        }
    }
}

impl Default for InstallState {
    fn default() -> Self {
        Self::new()
    }
}

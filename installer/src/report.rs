//! Summary of a completed installation

use std::path::PathBuf;

use serde::Serialize;
use shared::{CheckResult, InstallStage, logging};
use tracing::info;

use crate::steps::{AssetOutcome, ConfigOutcome, SecretOutcome};

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub service_url: String,
    pub config: ConfigOutcome,
    pub secret: SecretOutcome,
    pub directories: Vec<PathBuf>,
    pub assets: AssetOutcome,
    pub running_services: Vec<String>,
    pub checks: Vec<CheckResult>,
    pub stages: Vec<InstallStage>,
}

/// Machine-friendly view of the report, written at debug level
#[derive(Debug, Serialize)]
struct ReportSummary<'a> {
    service_url: &'a str,
    config_backup: Option<String>,
    secret_replaced: bool,
    assets_built: bool,
    running_services: &'a [String],
    checks: &'a [CheckResult],
    stages: &'a [InstallStage],
}

impl InstallReport {
    pub fn config_backup(&self) -> Option<&PathBuf> {
        match &self.config {
            ConfigOutcome::Replaced { backup, .. } => Some(backup),
            ConfigOutcome::Created { .. } => None,
        }
    }

    /// Lines printed once the service is up
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("HomeHub is running at {}", self.service_url)];

        if let Some(backup) = self.config_backup() {
            lines.push(format!("Previous configuration saved to {}", backup.display()));
        }
        if self.assets == AssetOutcome::Skipped {
            lines.push("CSS build skipped; using assets bundled in the image".to_string());
        }
        lines.push("View logs:  docker compose logs -f".to_string());
        lines.push("Stop:       docker compose down".to_string());
        lines
    }

    pub fn log(&self) {
        let stage = InstallStage::Done;
        logging::log_success(stage, "Installation complete");
        for line in self.summary_lines() {
            info!("   {}", line);
        }
        logging::log_warning(
            stage,
            "config.yml contains a default plaintext password; change it before exposing HomeHub",
        );

        let summary = ReportSummary {
            service_url: &self.service_url,
            config_backup: self.config_backup().map(|p| p.display().to_string()),
            secret_replaced: self.secret.replaced_existing,
            assets_built: self.assets == AssetOutcome::Built,
            running_services: &self.running_services,
            checks: &self.checks,
            stages: &self.stages,
        };
        if let Ok(json) = serde_json::to_string(&summary) {
            tracing::debug!(report = %json, "Install report");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(config: ConfigOutcome, assets: AssetOutcome) -> InstallReport {
        InstallReport {
            service_url: "http://localhost:5000".to_string(),
            config,
            secret: SecretOutcome {
                path: PathBuf::from(".env"),
                replaced_existing: false,
            },
            directories: Vec::new(),
            assets,
            running_services: vec!["homehub".to_string()],
            checks: Vec::new(),
            stages: vec![InstallStage::CheckingPrereqs, InstallStage::Done],
        }
    }

    #[test]
    fn test_summary_mentions_backup_and_skipped_assets() {
        let report = report(
            ConfigOutcome::Replaced {
                path: PathBuf::from("config.yml"),
                backup: PathBuf::from("config.yml.backup"),
            },
            AssetOutcome::Skipped,
        );

        let lines = report.summary_lines();

        assert_eq!(lines[0], "HomeHub is running at http://localhost:5000");
        assert!(lines.iter().any(|l| l.contains("config.yml.backup")));
        assert!(lines.iter().any(|l| l.contains("CSS build skipped")));
    }

    #[test]
    fn test_summary_for_fresh_install() {
        let report = report(
            ConfigOutcome::Created {
                path: PathBuf::from("config.yml"),
            },
            AssetOutcome::Built,
        );

        assert!(report.config_backup().is_none());
        assert_eq!(report.summary_lines().len(), 3);
    }
}

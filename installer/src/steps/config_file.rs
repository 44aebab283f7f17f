//! Configuration materializer
//!
//! Writes the fixed template. An existing file is copied to the single
//! backup slot first, replacing any older backup.

use std::path::PathBuf;

use shared::{InstallStage, logging};

use crate::config::InstallerConfig;
use crate::error::InstallerResult;
use crate::template;
use crate::traits::FileSystem;

const STAGE: InstallStage = InstallStage::WritingConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOutcome {
    Created { path: PathBuf },
    Replaced { path: PathBuf, backup: PathBuf },
}

pub async fn write_config(config: &InstallerConfig, fs: &impl FileSystem) -> InstallerResult<ConfigOutcome> {
    // Render before touching disk so a template error leaves the old file alone
    let document = template::default_document()?;
    let path = config.config_path();

    let outcome = if fs.exists(&path).await {
        let backup = config.backup_path();
        fs.copy(&path, &backup).await?;
        logging::log_progress(STAGE, "Backed up existing configuration", &backup.display().to_string());
        ConfigOutcome::Replaced {
            path: path.clone(),
            backup,
        }
    } else {
        ConfigOutcome::Created { path: path.clone() }
    };

    fs.write(&path, document.as_bytes()).await?;
    logging::log_success(STAGE, &format!("Wrote {}", path.display()));
    Ok(outcome)
}

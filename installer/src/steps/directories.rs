//! Data directory provisioning

use std::path::PathBuf;

use shared::{InstallStage, logging};

use crate::config::InstallerConfig;
use crate::error::InstallerResult;
use crate::traits::FileSystem;

/// Ensure every data directory exists; existing directories are left as-is
pub async fn provision(config: &InstallerConfig, fs: &impl FileSystem) -> InstallerResult<Vec<PathBuf>> {
    let dirs = config.data_dir_paths();
    for dir in &dirs {
        fs.create_dir_all(dir).await?;
    }

    let names: Vec<String> = config.data_dirs.iter().map(|d| d.display().to_string()).collect();
    logging::log_success(
        InstallStage::ProvisioningDirs,
        &format!("Directories ready: {}", names.join(", ")),
    );
    Ok(dirs)
}

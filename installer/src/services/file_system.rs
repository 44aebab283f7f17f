//! Real file system service implementation
//!
//! Writes installer artifacts with tokio's file APIs. Files are replaced by
//! writing a temporary sibling and renaming it over the target, so a failed
//! write never leaves a truncated file behind. Every failure carries the
//! operation and path so the diagnostic names what could not be written.

use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::fs;

use crate::error::{InstallerError, InstallerResult};
use crate::traits::FileSystem;
use tracing::debug;

const PUBLIC_MODE: u32 = 0o644;
const PRIVATE_MODE: u32 = 0o600;

/// Real file system implementation
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }

    async fn replace(path: &Path, content: &[u8], mode: u32) -> InstallerResult<()> {
        let target = path.to_path_buf();
        let bytes = content.to_vec();

        let result = match tokio::task::spawn_blocking(move || replace_file(&target, &bytes, mode)).await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::other(e)),
        };
        result.map_err(|e| InstallerError::file_system("write", path, e))?;

        debug!("📝 Wrote file: {} ({:o})", path.display(), mode);
        Ok(())
    }
}

/// Write a temporary file next to `path`, then rename it into place
#[cfg_attr(not(unix), allow(unused_variables))]
fn replace_file(path: &Path, content: &[u8], mode: u32) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(std::fs::Permissions::from_mode(mode))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> InstallerResult<String> {
        fs::read_to_string(path)
            .await
            .map_err(|e| InstallerError::file_system("read", path, e))
    }

    async fn write(&self, path: &Path, content: &[u8]) -> InstallerResult<()> {
        Self::replace(path, content, PUBLIC_MODE).await
    }

    async fn write_private(&self, path: &Path, content: &[u8]) -> InstallerResult<()> {
        Self::replace(path, content, PRIVATE_MODE).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> InstallerResult<()> {
        fs::copy(from, to)
            .await
            .map_err(|e| InstallerError::file_system("copy", from, e))?;
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> InstallerResult<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| InstallerError::file_system("create directory", path, e))?;

        debug!("📁 Ensured directory: {}", path.display());
        Ok(())
    }
}

//! Secret key generation
//!
//! Every run writes a fresh key and discards the previous one. Sessions
//! signed with the old key stop validating once the service restarts.

use std::path::{Path, PathBuf};

use shared::{InstallStage, logging, stage_debug};

use crate::config::InstallerConfig;
use crate::error::{InstallerError, InstallerResult};
use crate::traits::{EntropySource, FileSystem};

const STAGE: InstallStage = InstallStage::GeneratingSecret;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretOutcome {
    pub path: PathBuf,
    /// A previous key was overwritten
    pub replaced_existing: bool,
}

/// Lowercase hexadecimal rendering
pub fn encode_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        out.push(DIGITS[usize::from(b >> 4)] as char);
        out.push(DIGITS[usize::from(b & 0x0f)] as char);
        out
    })
}

pub async fn generate_secret(
    config: &InstallerConfig,
    fs: &impl FileSystem,
    entropy: &impl EntropySource,
) -> InstallerResult<SecretOutcome> {
    let path = config.env_path();
    let replaced_existing = has_existing_key(config, fs, &path).await;

    let bytes = entropy.random_bytes(config.secret_bytes)?;
    if bytes.len() != config.secret_bytes {
        return Err(InstallerError::Entropy {
            message: format!("expected {} bytes, got {}", config.secret_bytes, bytes.len()),
        });
    }

    let line = format!("{}={}\n", config.secret_key_name, encode_hex(&bytes));
    fs.write_private(&path, line.as_bytes()).await?;

    if replaced_existing {
        logging::log_warning(
            STAGE,
            &format!(
                "Replaced existing {}; existing sessions will be signed out",
                config.secret_key_name
            ),
        );
    }
    logging::log_success(STAGE, &format!("Generated {} in {}", config.secret_key_name, path.display()));

    Ok(SecretOutcome {
        path,
        replaced_existing,
    })
}

/// Whether the env file already defines the secret key
async fn has_existing_key(config: &InstallerConfig, fs: &impl FileSystem, path: &Path) -> bool {
    if !fs.exists(path).await {
        return false;
    }

    match dotenv::from_path_iter(path) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .any(|(key, _)| key == config.secret_key_name),
        Err(e) => {
            stage_debug!(STAGE, "Could not read previous {}: {}", path.display(), e);
            false
        }
    }
}

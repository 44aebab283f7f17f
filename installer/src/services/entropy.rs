//! Operating system CSPRNG

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{InstallerError, InstallerResult};
use crate::traits::EntropySource;

/// Entropy source reading from the operating system generator
#[derive(Debug, Default)]
pub struct OsEntropySource;

impl OsEntropySource {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropySource {
    fn random_bytes(&self, len: usize) -> InstallerResult<Vec<u8>> {
        let mut bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| InstallerError::Entropy { message: e.to_string() })?;
        Ok(bytes)
    }
}

//! Real host probe backed by the running process

use std::path::{Path, PathBuf};

use crate::traits::SystemProbe;

/// Host probe reading the current process environment
#[derive(Debug, Default)]
pub struct RealSystemProbe;

impl RealSystemProbe {
    pub fn new() -> Self {
        Self
    }
}

impl SystemProbe for RealSystemProbe {
    fn os_name(&self) -> String {
        std::env::consts::OS.to_string()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn find_in_path(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

//! Main entry point for the HomeHub installer binary
//!
//! Wires the real service implementations into the installer and maps the
//! outcome to the process exit status.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use installer::{
    services::{OsEntropySource, RealFileSystem, RealPortProbe, RealProcessRunner, RealSystemProbe},
    Installer, InstallerConfig,
};
use shared::logging;

/// Install and start a self-hosted HomeHub instance
#[derive(Parser)]
#[command(name = "homehub-install")]
#[command(about = "Checks prerequisites, writes configuration and starts HomeHub with Docker Compose")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// HomeHub project directory (defaults to the current directory)
    #[arg(long)]
    pub workdir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_tracing_with_level(&args.log_level) {
        eprintln!("❌ {e}");
        return ExitCode::FAILURE;
    }

    let working_dir = match args.workdir {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("❌ Cannot determine working directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    logging::log_startup(&format!("HomeHub installer in {}", working_dir.display()));

    let mut installer = Installer::new(
        InstallerConfig::new(working_dir),
        RealSystemProbe::new(),
        RealProcessRunner::new(),
        RealFileSystem::new(),
        RealPortProbe::new(),
        OsEntropySource::new(),
    );

    match installer.run().await {
        Ok(report) => {
            report.log();
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(hint) = e.hint() {
                eprintln!("💡 {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

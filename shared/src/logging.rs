//! Shared logging utilities for consistent stage-aware tracing

use crate::errors::{SharedError, SharedResult};
use crate::types::InstallStage;
use chrono::{DateTime, Local};
use tracing::info;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Build the env-filter directive for the installer crates
pub fn filter_directive(log_level: &str) -> SharedResult<String> {
    let level = log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(SharedError::InvalidLogLevel {
            value: log_level.to_string(),
        });
    }
    Ok(format!("installer={level},shared={level}"))
}

/// Initialize the stdout tracing subscriber with the given level
pub fn init_tracing_with_level(log_level: &str) -> SharedResult<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let directive = filter_directive(log_level)?;

    fmt()
        .with_env_filter(EnvFilter::new(&directive))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .try_init()
        .map_err(|e| SharedError::TracingInit {
            message: e.to_string(),
        })
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Local> = Local::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for stage-aware info logging
#[macro_export]
macro_rules! stage_info {
    ($stage:expr, $($arg:tt)*) => {
        tracing::info!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware warning logging
#[macro_export]
macro_rules! stage_warn {
    ($stage:expr, $($arg:tt)*) => {
        tracing::warn!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware error logging
#[macro_export]
macro_rules! stage_error {
    ($stage:expr, $($arg:tt)*) => {
        tracing::error!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware debug logging
#[macro_export]
macro_rules! stage_debug {
    ($stage:expr, $($arg:tt)*) => {
        tracing::debug!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = format_timestamp(), "🏠 Starting {}", details);
}

/// Contextual logging helper for entering a stage
pub fn log_stage(stage: InstallStage) {
    stage_info!(stage, "📋 {}...", stage.description());
}

/// Contextual logging helper for error conditions
pub fn log_error(stage: InstallStage, context: &str, error: &dyn std::fmt::Display) {
    stage_error!(stage, error = %error, "❌ {} failed: {}", context, error);
}

/// Contextual logging helper for degraded-but-continuing conditions
pub fn log_warning(stage: InstallStage, message: &str) {
    stage_warn!(stage, "⚠️  {}", message);
}

/// Contextual logging helper for success conditions
pub fn log_success(stage: InstallStage, message: &str) {
    stage_info!(stage, "✅ {}", message);
}

/// Contextual logging helper for progress updates
pub fn log_progress(stage: InstallStage, action: &str, details: &str) {
    stage_info!(stage, "📋 {}: {}", action, details);
}

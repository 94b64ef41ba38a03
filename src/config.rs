use std::path::PathBuf;

use crate::cli::Cli;

/// Log filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Resolved runtime settings handed to the command handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub storage_path: PathBuf,
    pub user_id: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_path: cli.data.clone(),
            storage_path: cli.storage.clone(),
            user_id: cli.user.clone().filter(|u| !u.trim().is_empty()),
            log_level: cli.log_level.clone().filter(|l| !l.trim().is_empty()),
        }
    }

    /// Filter directive: the explicit flag, else `RUST_LOG`, else the default.
    pub fn log_directive(&self, rust_log: Option<String>) -> String {
        self.log_level
            .clone()
            .or(rust_log.filter(|l| !l.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

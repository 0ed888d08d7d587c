use crate::tracker::config;
use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

pub const MODES: &[&str] = &["once", "watch", "json"];

/// Application configuration handler
pub struct AppConfig {
    pub mode: String,
    pub snapshot_path: String,
    pub refresh: Duration,
    pub max_cycles: Option<usize>,
}

impl AppConfig {
    /// Create new configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            mode: config::get_execution_mode(),
            snapshot_path: config::get_snapshot_path(),
            refresh: config::get_refresh_interval(),
            max_cycles: config::get_max_cycles(),
        }
    }

    /// Print the settings the run will use
    pub fn log_config(&self) {
        println!("{} Mode: {}", "→".cyan(), self.mode.yellow());
        println!("{} Snapshot: {}", "→".cyan(), self.snapshot_path.yellow());
        if self.mode == "watch" {
            println!("{} Refresh: {}s", "→".cyan(), self.refresh.as_secs());
            if let Some(max) = self.max_cycles {
                println!("{} Max cycles: {}", "→".cyan(), max);
            }
        }
        println!();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !MODES.contains(&self.mode.as_str()) {
            bail!(
                "Invalid mode '{}'. Use one of: {}",
                self.mode,
                MODES.join(", ")
            );
        }
        if !Path::new(&self.snapshot_path).exists() {
            bail!("Snapshot file not found: {}", self.snapshot_path);
        }
        Ok(())
    }
}

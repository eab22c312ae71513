//! # Command Line Interface
//!
//! Every flag is optional; with none given the run uses the configured defaults.

use crate::config::TrackerConfig;
use crate::error::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

/// Daily fantasy points snapshot and delta report
#[derive(Parser, Debug)]
#[command(name = "fantasy-tracker")]
#[command(about = "Fetch season stats, score fantasy points and diff against yesterday", version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for snapshots and reports
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Run as if the current time were this RFC 3339 instant
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// League entries file for standings
    #[arg(long)]
    pub entries: Option<PathBuf>,

    /// Treat a missing baseline snapshot as empty instead of failing
    #[arg(long)]
    pub allow_missing_baseline: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Rows to print in the summary table
    #[arg(long, default_value = "10")]
    pub top: usize,
}

impl Cli {
    /// Apply flags on top of file and environment configuration
    pub fn apply(&self, config: &mut TrackerConfig) {
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(entries) = &self.entries {
            config.league.entries_file = Some(entries.clone());
        }
        if self.allow_missing_baseline {
            config.output.require_baseline = false;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }

    /// File, then environment, then flags; validated before it is returned
    pub fn load_config(&self) -> Result<TrackerConfig> {
        let mut config = TrackerConfig::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// The instant the run is evaluated at
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["fantasy-tracker"]).unwrap();
        let mut config = TrackerConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.output.dir, PathBuf::from("daily-outputs"));
        assert!(config.output.require_baseline);
        assert_eq!(cli.top, 10);
        assert!(cli.now.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "fantasy-tracker",
            "--output-dir",
            "/tmp/out",
            "--now",
            "2025-01-15T13:30:00Z",
            "--entries",
            "entries.json",
            "--allow-missing-baseline",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut config = TrackerConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.output.dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.league.entries_file, Some(PathBuf::from("entries.json")));
        assert!(!config.output.require_baseline);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(cli.now(), Utc.with_ymd_and_hms(2025, 1, 15, 13, 30, 0).unwrap());
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        assert!(Cli::try_parse_from(["fantasy-tracker", "--now", "yesterday"]).is_err());
    }

    #[test]
    fn test_load_config_reports_unreadable_file() {
        let cli = Cli::try_parse_from(["fantasy-tracker", "--config", "/nonexistent/tracker.toml"])
            .unwrap();
        assert!(matches!(cli.load_config(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_load_config_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracker.toml");
        fs::write(&path, "[schedule]\ncutoff_hour = 24\n").unwrap();

        let cli = Cli::try_parse_from(["fantasy-tracker", "--config", path.to_str().unwrap()])
            .unwrap();
        assert!(matches!(cli.load_config(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_load_config_applies_flags() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracker.toml");
        fs::write(&path, "[output]\ndir = \"from-file\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "fantasy-tracker",
            "--config",
            path.to_str().unwrap(),
            "--allow-missing-baseline",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        assert!(!config.output.require_baseline);
    }
}

use crate::error::{Result, TrackerError};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the fantasy tracker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Stats API configuration
    pub stats: StatsApiConfig,

    /// Business date configuration
    pub schedule: ScheduleConfig,

    /// Where artifacts are written
    pub output: OutputConfig,

    /// Fantasy league configuration
    pub league: LeagueConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsApiConfig {
    /// Stats table endpoint
    pub base_url: String,

    /// Optional request timeout in seconds (no timeout when unset)
    pub timeout_secs: Option<u64>,

    /// Query sent with every request
    pub query: StatsQuery,
}

/// Query parameters for the season stats table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsQuery {
    pub split: String,
    pub level: String,
    pub teams: String,
    pub category: String,
    pub section: String,
    pub conference: String,
    pub seasons: String,
    pub view: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub limit: u32,
    pub order_by: String,
    pub order: String,
    pub qualifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA time zone the business date is resolved in
    pub timezone: String,

    /// Local hour before which the previous calendar day is used
    pub cutoff_hour: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding the daily snapshots and reports
    pub dir: PathBuf,

    /// Fail when yesterday's snapshot is missing
    pub require_baseline: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// League entries file; standings are skipped when unset
    pub entries_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json)
    pub format: String,
}

impl Default for StatsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://engage-api.boostsport.ai/api/sport/wbb/stats/table".to_string(),
            timeout_secs: None,
            query: StatsQuery::default(),
        }
    }
}

impl Default for StatsQuery {
    fn default() -> Self {
        Self {
            split: "all".to_string(),
            level: "season".to_string(),
            teams: "all".to_string(),
            category: "player".to_string(),
            section: "totals".to_string(),
            conference: "Big Ten".to_string(),
            seasons: "2025".to_string(),
            view: "table".to_string(),
            kind: "player".to_string(),
            limit: 5000,
            order_by: "default_rank".to_string(),
            order: "asc".to_string(),
            qualifier: "default_qualifier".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { timezone: "America/New_York".to_string(), cutoff_hour: 9 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("daily-outputs"), require_baseline: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl StatsQuery {
    /// Query pairs in the order the stats API documents them
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("split", self.split.clone()),
            ("level", self.level.clone()),
            ("teams", self.teams.clone()),
            ("category", self.category.clone()),
            ("section", self.section.clone()),
            ("conference", self.conference.clone()),
            ("seasons", self.seasons.clone()),
            ("view", self.view.clone()),
            ("type", self.kind.clone()),
            ("limit", self.limit.to_string()),
            ("orderBy", self.order_by.clone()),
            ("order", self.order.clone()),
            ("qualifier", self.qualifier.clone()),
        ]
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Parse a TOML configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| TrackerError::config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Override fields from `FANTASY_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(dir) = std::env::var("FANTASY_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        if let Ok(url) = std::env::var("FANTASY_STATS_URL") {
            self.stats.base_url = url;
        }

        if let Ok(conference) = std::env::var("FANTASY_CONFERENCE") {
            self.stats.query.conference = conference;
        }

        if let Ok(season) = std::env::var("FANTASY_SEASON") {
            self.stats.query.seasons = season;
        }

        if let Ok(hour) = std::env::var("FANTASY_CUTOFF_HOUR") {
            self.schedule.cutoff_hour = hour
                .parse()
                .map_err(|_| TrackerError::config(format!("Invalid FANTASY_CUTOFF_HOUR: {hour}")))?;
        }

        if let Ok(tz) = std::env::var("FANTASY_TIMEZONE") {
            self.schedule.timezone = tz;
        }

        if let Ok(entries) = std::env::var("FANTASY_ENTRIES_FILE") {
            self.league.entries_file = Some(PathBuf::from(entries));
        }

        if let Ok(required) = std::env::var("FANTASY_REQUIRE_BASELINE") {
            self.output.require_baseline = required.parse().map_err(|_| {
                TrackerError::config(format!("Invalid FANTASY_REQUIRE_BASELINE: {required}"))
            })?;
        }

        if let Ok(level) = std::env::var("FANTASY_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.schedule.cutoff_hour > 23 {
            return Err(TrackerError::config(format!(
                "Invalid cutoff hour: {}",
                self.schedule.cutoff_hour
            )));
        }

        self.timezone()?;

        if self.stats.base_url.is_empty() {
            return Err(TrackerError::config("Stats API URL is empty"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(TrackerError::config(format!(
                    "Invalid log level: {}",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(TrackerError::config(format!(
                    "Invalid log format: {}",
                    self.logging.format
                )))
            }
        }

        Ok(())
    }

    /// Parsed business time zone
    pub fn timezone(&self) -> Result<Tz> {
        self.schedule
            .timezone
            .parse::<Tz>()
            .map_err(|_| TrackerError::config(format!("Unknown time zone: {}", self.schedule.timezone)))
    }
}

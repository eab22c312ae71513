//! The daily run: fetch, score, snapshot, diff against yesterday, standings.

use crate::config::TrackerConfig;
use crate::dates::BusinessDates;
use crate::delta::{Baseline, DeltaReport};
use crate::error::{Result, TrackerError};
use crate::extractor::{extract_players, player_entries};
use crate::fetcher::StatsFetcher;
use crate::scoring::score_all;
use crate::snapshot::Snapshot;
use crate::standings::{load_entries, Standings};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub dates: BusinessDates,
    pub snapshot: Snapshot,
    pub skipped_sentinels: usize,
    pub snapshot_path: PathBuf,
    pub delta_path: PathBuf,
    pub standings_path: Option<PathBuf>,
}

impl RunSummary {
    /// Number of players in today's snapshot
    pub fn player_count(&self) -> usize {
        self.snapshot.len()
    }
}

/// Runs the daily stages in order
pub struct Pipeline {
    config: TrackerConfig,
    fetcher: StatsFetcher,
    tz: Tz,
}

impl Pipeline {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        let tz = config.timezone()?;
        let fetcher = StatsFetcher::new(config.stats.clone())?;
        Ok(Self { config, fetcher, tz })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Business dates for `now` under the configured zone and cutoff
    pub fn resolve_dates(&self, now: DateTime<Utc>) -> BusinessDates {
        BusinessDates::resolve(now, self.tz, self.config.schedule.cutoff_hour)
    }

    /// Full run for the business date containing `now`
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunSummary> {
        let dates = self.resolve_dates(now);
        info!(
            "Running for business date {} (baseline {})",
            dates.today_key(),
            dates.yesterday_key()
        );

        let response = self.fetcher.fetch_stats_table().await?;
        self.process(dates, &response)
    }

    /// Everything after the fetch; no network access
    pub fn process(&self, dates: BusinessDates, response: &Value) -> Result<RunSummary> {
        let entries = player_entries(response)?;
        let extraction = extract_players(entries)?;
        info!(
            "Extracted {} players from {} entries",
            extraction.players.len(),
            entries.len()
        );

        let snapshot = Snapshot::build(dates.today, score_all(extraction.players));
        let output_dir = &self.config.output.dir;
        let snapshot_path = snapshot.save(output_dir)?;

        let baseline = match Baseline::load(output_dir, dates.yesterday) {
            Ok(baseline) => baseline,
            Err(TrackerError::BaselineMissing(path)) if !self.config.output.require_baseline => {
                warn!("No baseline at {}, treating every player as new", path.display());
                Baseline::empty()
            }
            Err(e) => return Err(e),
        };

        let delta_path = DeltaReport::compute(&snapshot, &baseline).save(output_dir)?;

        let standings_path = match &self.config.league.entries_file {
            Some(entries_file) => match load_entries(entries_file)? {
                Some(league) => Some(Standings::compute(&snapshot, &league).save(output_dir)?),
                None => None,
            },
            None => None,
        };

        Ok(RunSummary {
            dates,
            snapshot,
            skipped_sentinels: extraction.skipped,
            snapshot_path,
            delta_path,
            standings_path,
        })
    }
}

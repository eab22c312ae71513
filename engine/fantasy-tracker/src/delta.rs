//! Day-over-day delta report.
//!
//! Today's snapshot is left-joined onto yesterday's persisted snapshot by
//! (name, team). Players missing from yesterday count as having had zero
//! points, so their whole total shows up as today's gain.

use crate::dates::date_key;
use crate::error::{Result, TrackerError};
use crate::models::DeltaRecord;
use crate::snapshot::{snapshot_path, Snapshot};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

/// The columns of a persisted snapshot the delta report needs
#[derive(Debug, Deserialize)]
struct BaselineRow {
    name: String,
    team: String,
    // Kept as text: older snapshots may carry the total as a float.
    fantasy_points: String,
}

/// Yesterday's fantasy points keyed by (name, team)
#[derive(Debug, Clone, Default)]
pub struct Baseline {
    points: HashMap<(String, String), u64>,
}

impl Baseline {
    /// A baseline with no players (first run of a season)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `<dir>/<date>.csv`
    pub fn load(dir: &Path, date: NaiveDate) -> Result<Self> {
        let path = snapshot_path(dir, date);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TrackerError::BaselineMissing(path));
            }
            Err(e) => return Err(e.into()),
        };

        let baseline = Self::from_reader(file, &path)?;
        info!("Loaded baseline of {} players from {}", baseline.len(), path.display());
        Ok(baseline)
    }

    /// Parse snapshot CSV; `path` is only used in error messages
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut points = HashMap::new();

        for (index, row) in reader.deserialize::<BaselineRow>().enumerate() {
            let row = row.map_err(|e| TrackerError::baseline_malformed(path, e))?;
            let fantasy_points = to_points(&row.fantasy_points).ok_or_else(|| {
                TrackerError::baseline_malformed(
                    path,
                    format!("row {}: invalid fantasy_points {}", index + 1, row.fantasy_points),
                )
            })?;
            // first row wins on a duplicated key
            points.entry((row.name, row.team)).or_insert(fantasy_points);
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Yesterday's points for a player, if they were in the snapshot
    pub fn get(&self, name: &str, team: &str) -> Option<u64> {
        self.points.get(&(name.to_string(), team.to_string())).copied()
    }
}

/// Largest total a baseline row may carry; keeps `daily_points` within `i64`
const MAX_BASELINE_POINTS: u64 = i64::MAX as u64;

/// Parse a persisted total; integers first so large values are not rounded
fn to_points(text: &str) -> Option<u64> {
    let text = text.trim();
    let points = match text.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            let value = text.parse::<f64>().ok()?;
            // 2^63 is the first float past i64::MAX
            if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= i64::MAX as f64 {
                return None;
            }
            value as u64
        }
    };
    (points <= MAX_BASELINE_POINTS).then_some(points)
}

/// Today's total minus yesterday's, saturating at the `i64` bounds
fn daily_points(today: u64, past: u64) -> i64 {
    let today = i64::try_from(today).unwrap_or(i64::MAX);
    let past = i64::try_from(past).unwrap_or(i64::MAX);
    today.saturating_sub(past)
}

/// Per-player point changes since the previous business date
#[derive(Debug, Clone)]
pub struct DeltaReport {
    pub date: NaiveDate,
    pub records: Vec<DeltaRecord>,
}

impl DeltaReport {
    /// Left-join today's snapshot onto the baseline and sort by daily points
    pub fn compute(today: &Snapshot, baseline: &Baseline) -> Self {
        let mut records: Vec<DeltaRecord> = today
            .players
            .iter()
            .map(|player| {
                let past_points = baseline.get(&player.name, &player.team).unwrap_or(0);
                DeltaRecord {
                    name: player.name.clone(),
                    team: player.team.clone(),
                    fantasy_points: player.fantasy_points,
                    past_points,
                    daily_points: daily_points(player.fantasy_points, past_points),
                }
            })
            .collect();

        records.sort_by(|a, b| b.daily_points.cmp(&a.daily_points));

        Self { date: today.date, records }
    }

    /// Persist to `<dir>/<date>_daily.json` as an indented array of records
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = delta_path(dir, self.date);

        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&path, json)?;

        info!("Saved delta report of {} players to {}", self.records.len(), path.display());
        Ok(path)
    }
}

/// Location of the delta report for `date`
pub fn delta_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}_daily.json", date_key(date)))
}

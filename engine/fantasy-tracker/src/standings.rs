//! Fantasy league standings.
//!
//! A league entry is a fantasy team with a roster of up to ten player names,
//! stored as `p1`..`p10` fields. A team's score is the sum of its players'
//! fantasy points in today's snapshot.

use crate::dates::date_key;
use crate::error::{Result, TrackerError};
use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Roster slots per league entry
pub const ROSTER_SIZE: usize = 10;

/// One fantasy team and the players it drafted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueEntry {
    pub team: String,
    pub players: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawLeagueEntry {
    team: String,
    #[serde(flatten)]
    slots: Map<String, Value>,
}

impl LeagueEntry {
    fn from_raw(raw: RawLeagueEntry) -> std::result::Result<Self, String> {
        let mut players = Vec::with_capacity(ROSTER_SIZE);
        for slot in 1..=ROSTER_SIZE {
            let key = format!("p{slot}");
            match raw.slots.get(&key) {
                None | Some(Value::Null) => {}
                Some(Value::String(name)) if name.trim().is_empty() => {}
                Some(Value::String(name)) => players.push(name.clone()),
                Some(other) => {
                    return Err(format!("team `{}`: `{key}` must be a name, got {other}", raw.team))
                }
            }
        }
        Ok(Self { team: raw.team, players })
    }
}

/// Parse a league entries JSON array; `path` is only used in error messages
pub fn parse_entries(json: &str, path: &Path) -> Result<Vec<LeagueEntry>> {
    let raw: Vec<RawLeagueEntry> =
        serde_json::from_str(json).map_err(|e| TrackerError::entries(path, e))?;
    raw.into_iter()
        .map(|entry| LeagueEntry::from_raw(entry).map_err(|reason| TrackerError::entries(path, reason)))
        .collect()
}

/// Load league entries; `Ok(None)` when the file does not exist
pub fn load_entries(path: &Path) -> Result<Option<Vec<LeagueEntry>>> {
    if !path.exists() {
        warn!("League entries file {} not found, skipping standings", path.display());
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    parse_entries(&json, path).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSlot {
    pub name: String,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRecord {
    pub rank: u32,
    pub team: String,
    pub players: Vec<RosterSlot>,
    pub total_score: u64,
}

/// League table for one business date
#[derive(Debug, Clone)]
pub struct Standings {
    pub date: NaiveDate,
    pub records: Vec<StandingRecord>,
}

impl Standings {
    /// Score every entry against the snapshot and rank by total score
    pub fn compute(snapshot: &Snapshot, entries: &[LeagueEntry]) -> Self {
        let points = snapshot.points_by_name();

        let mut records: Vec<StandingRecord> = entries
            .iter()
            .map(|entry| {
                let players: Vec<RosterSlot> = entry
                    .players
                    .iter()
                    .map(|name| RosterSlot {
                        name: name.clone(),
                        points: points.get(name.as_str()).copied().unwrap_or(0),
                    })
                    .collect();
                let total_score = players.iter().map(|slot| slot.points).sum();
                StandingRecord { rank: 0, team: entry.team.clone(), players, total_score }
            })
            .collect();

        records.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        for (index, record) in records.iter_mut().enumerate() {
            record.rank = (index + 1) as u32;
        }

        Self { date: snapshot.date, records }
    }

    /// Persist to `<dir>/<date>_standings.json`
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}_standings.json", date_key(self.date)));

        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&path, json)?;

        info!("Saved standings for {} league entries to {}", self.records.len(), path.display());
        Ok(path)
    }
}

//! Daily snapshot: the full ranked player table for one business date.

use crate::dates::date_key;
use crate::error::Result;
use crate::models::{PlayerRecord, StatLine};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ranked player table for one business date
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub players: Vec<PlayerRecord>,
}

impl Snapshot {
    /// Sort descending by fantasy points, drop duplicate rows and assign ranks
    pub fn build(date: NaiveDate, players: Vec<PlayerRecord>) -> Self {
        let mut snapshot = Self { date, players };
        snapshot.sort_and_rank();
        snapshot
    }

    fn sort_and_rank(&mut self) {
        // Stable: ties keep the order the API returned them in.
        self.players.sort_by(|a, b| b.fantasy_points.cmp(&a.fantasy_points));

        // Derived columns follow from the raw ones, so the raw ones identify a row.
        let before = self.players.len();
        let mut seen: HashSet<(String, String, StatLine)> = HashSet::with_capacity(before);
        self.players
            .retain(|p| seen.insert((p.name.clone(), p.team.clone(), p.stat_line())));
        if before != self.players.len() {
            debug!("Dropped {} duplicate rows", before - self.players.len());
        }

        for (index, player) in self.players.iter_mut().enumerate() {
            player.rank = Some((index + 1) as u32);
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Get top N players by fantasy points
    pub fn top_players(&self, limit: usize) -> &[PlayerRecord] {
        &self.players[..limit.min(self.players.len())]
    }

    /// Fantasy points by player name; on a name clash the last row in table
    /// order (the lowest-ranked one) wins
    pub fn points_by_name(&self) -> HashMap<&str, u64> {
        self.players.iter().map(|p| (p.name.as_str(), p.fantasy_points)).collect()
    }

    /// Write the table as CSV with a header row
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for player in &self.players {
            writer.serialize(player)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Persist to `<dir>/<date>.csv`, creating the directory if needed
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = snapshot_path(dir, self.date);

        let file = File::create(&path)?;
        self.write_csv_to(file)?;

        info!("Saved snapshot of {} players to {}", self.players.len(), path.display());
        Ok(path)
    }
}

/// Location of the snapshot for `date`
pub fn snapshot_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.csv", date_key(date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerLine;
    use crate::scoring::score;

    fn player(name: &str, team: &str, points: u32, games: u32) -> PlayerRecord {
        score(PlayerLine {
            name: name.to_string(),
            team: team.to_string(),
            stats: StatLine { points, games, ..StatLine::default() },
        })
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_sort_and_rank() {
        let snapshot = Snapshot::build(
            date(),
            vec![player("Player A", "Iowa", 20, 2), player("Player B", "UCLA", 30, 2)],
        );

        assert_eq!(snapshot.players[0].name, "Player B");
        assert_eq!(snapshot.players[0].rank, Some(1));
        assert_eq!(snapshot.players[1].name, "Player A");
        assert_eq!(snapshot.players[1].rank, Some(2));
    }

    #[test]
    fn test_identical_rows_collapse_but_near_duplicates_stay() {
        let snapshot = Snapshot::build(
            date(),
            vec![
                player("Player A", "Iowa", 20, 2),
                player("Player C", "USC", 20, 3),
                player("Player A", "Iowa", 20, 2),
                player("Player A", "Iowa", 20, 3),
            ],
        );

        assert_eq!(snapshot.len(), 3);
        let ranks: Vec<_> = snapshot.players.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
        // stable order among ties
        assert_eq!(snapshot.players[0].name, "Player A");
        assert_eq!(snapshot.players[1].name, "Player C");
    }

    #[test]
    fn test_sorted_descending() {
        let points = [5, 40, 12, 40, 0, 33];
        let players = points
            .iter()
            .enumerate()
            .map(|(i, &p)| player(&format!("P{i}"), "Team", p, 1))
            .collect();
        let snapshot = Snapshot::build(date(), players);

        assert!(snapshot.players.windows(2).all(|w| w[0].fantasy_points >= w[1].fantasy_points));
    }

    #[test]
    fn test_csv_layout() {
        let snapshot = Snapshot::build(
            date(),
            vec![player("Player A", "Iowa", 24, 4), player("Zero, Games", "Iowa", 3, 0)],
        );

        let mut buf = Vec::new();
        snapshot.write_csv_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "name,team,minutes,games,points,rebounds,assists,blocks,steals,threes,fantasy_points,fpg"
        );
        assert_eq!(lines[1], "Player A,Iowa,0,4,24,0,0,0,0,0,24,6.0");
        assert_eq!(lines[2], "\"Zero, Games\",Iowa,0,0,3,0,0,0,0,0,3,");
    }

    #[test]
    fn test_save_creates_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let out = temp_dir.path().join("daily-outputs");

        let snapshot = Snapshot::build(date(), vec![player("Player A", "Iowa", 24, 4)]);
        let path = snapshot.save(&out).unwrap();

        assert_eq!(path, out.join("2025-01-15.csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_points_by_name_last_row_wins() {
        let snapshot = Snapshot::build(
            date(),
            vec![player("Same Name", "Iowa", 10, 1), player("Same Name", "Indiana", 30, 1)],
        );
        assert_eq!(snapshot.players[1].team, "Iowa");
        assert_eq!(snapshot.points_by_name().get("Same Name"), Some(&10));
        assert_eq!(snapshot.top_players(10).len(), 2);
    }
}

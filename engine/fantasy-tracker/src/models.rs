use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder row the stats feed injects; never a real player
pub const SENTINEL_PLAYER_NAME: &str = "DoNot Use";

/// One player's entry in the stats table response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerStatBlock {
    pub full_name: String,

    pub team_market: String,

    /// Single-key category mappings, e.g. `{"pts": "412"}`
    #[serde(rename = "data")]
    pub stats: Vec<Map<String, Value>>,
}

/// Stat categories the tracker reads from a player's stat list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Minutes,
    GamesPlayed,
    Points,
    Rebounds,
    Assists,
    Blocks,
    Steals,
    ThreesMade,
}

impl StatCategory {
    pub const ALL: [StatCategory; 8] = [
        StatCategory::Minutes,
        StatCategory::GamesPlayed,
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Blocks,
        StatCategory::Steals,
        StatCategory::ThreesMade,
    ];

    /// Key used by the stats API
    pub fn key(self) -> &'static str {
        match self {
            StatCategory::Minutes => "minutes",
            StatCategory::GamesPlayed => "gp",
            StatCategory::Points => "pts",
            StatCategory::Rebounds => "reb",
            StatCategory::Assists => "ast",
            StatCategory::Blocks => "blk",
            StatCategory::Steals => "stl",
            StatCategory::ThreesMade => "fg3m",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

/// Season totals for the tracked categories; absent categories are 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatLine {
    pub minutes: u32,
    pub games: u32,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub blocks: u32,
    pub steals: u32,
    pub threes: u32,
}

impl StatLine {
    pub fn get(&self, category: StatCategory) -> u32 {
        match category {
            StatCategory::Minutes => self.minutes,
            StatCategory::GamesPlayed => self.games,
            StatCategory::Points => self.points,
            StatCategory::Rebounds => self.rebounds,
            StatCategory::Assists => self.assists,
            StatCategory::Blocks => self.blocks,
            StatCategory::Steals => self.steals,
            StatCategory::ThreesMade => self.threes,
        }
    }

    pub fn set(&mut self, category: StatCategory, value: u32) {
        let slot = match category {
            StatCategory::Minutes => &mut self.minutes,
            StatCategory::GamesPlayed => &mut self.games,
            StatCategory::Points => &mut self.points,
            StatCategory::Rebounds => &mut self.rebounds,
            StatCategory::Assists => &mut self.assists,
            StatCategory::Blocks => &mut self.blocks,
            StatCategory::Steals => &mut self.steals,
            StatCategory::ThreesMade => &mut self.threes,
        };
        *slot = value;
    }
}

/// Flattened player row before scoring
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerLine {
    pub name: String,
    pub team: String,
    pub stats: StatLine,
}

/// Scored player row, one line of the daily snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub minutes: u32,
    pub games: u32,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub blocks: u32,
    pub steals: u32,
    pub threes: u32,
    pub fantasy_points: u64,
    /// Fantasy points per game; `None` for players without a game played
    pub fpg: Option<f64>,
    /// Position in the snapshot (assigned after sorting)
    #[serde(skip)]
    pub rank: Option<u32>,
}

impl PlayerRecord {
    /// Raw stats this record was scored from
    pub fn stat_line(&self) -> StatLine {
        StatLine {
            minutes: self.minutes,
            games: self.games,
            points: self.points,
            rebounds: self.rebounds,
            assists: self.assists,
            blocks: self.blocks,
            steals: self.steals,
            threes: self.threes,
        }
    }
}

/// Day-over-day change for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaRecord {
    pub name: String,
    pub team: String,
    pub fantasy_points: u64,
    pub past_points: u64,
    pub daily_points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_round_trip() {
        for category in StatCategory::ALL {
            assert_eq!(StatCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(StatCategory::from_key("fga"), None);
        assert_eq!(StatCategory::from_key("PTS"), None);
    }

    #[test]
    fn test_stat_line_set_and_get() {
        let mut line = StatLine::default();
        for (value, category) in StatCategory::ALL.into_iter().enumerate() {
            line.set(category, value as u32 + 1);
        }
        assert_eq!(line.minutes, 1);
        assert_eq!(line.threes, 8);
        assert_eq!(line.get(StatCategory::Steals), 7);
    }

    #[test]
    fn test_player_stat_block_deserializes() {
        let block: PlayerStatBlock = serde_json::from_value(serde_json::json!({
            "full_name": "Caitlin Clark",
            "team_market": "Iowa",
            "data": [{"gp": 30}, {"pts": "950"}]
        }))
        .unwrap();

        assert_eq!(block.full_name, "Caitlin Clark");
        assert_eq!(block.team_market, "Iowa");
        assert_eq!(block.stats.len(), 2);
    }
}

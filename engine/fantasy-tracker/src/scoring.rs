use crate::models::{PlayerLine, PlayerRecord, StatLine};

/// Weight applied to steals and blocks
pub const DEFENSIVE_WEIGHT: u64 = 2;

/// Fantasy points = pts + 3PM + reb + ast + 2*stl + 2*blk
pub fn fantasy_points(stats: &StatLine) -> u64 {
    u64::from(stats.points)
        + u64::from(stats.threes)
        + u64::from(stats.rebounds)
        + u64::from(stats.assists)
        + DEFENSIVE_WEIGHT * u64::from(stats.steals)
        + DEFENSIVE_WEIGHT * u64::from(stats.blocks)
}

/// Fantasy points per game, `None` when no games were played
pub fn points_per_game(fantasy_points: u64, games: u32) -> Option<f64> {
    if games == 0 {
        return None;
    }
    Some(fantasy_points as f64 / f64::from(games))
}

/// Score a flattened player line
pub fn score(player: PlayerLine) -> PlayerRecord {
    let stats = player.stats;
    let fantasy_points = fantasy_points(&stats);

    PlayerRecord {
        name: player.name,
        team: player.team,
        minutes: stats.minutes,
        games: stats.games,
        points: stats.points,
        rebounds: stats.rebounds,
        assists: stats.assists,
        blocks: stats.blocks,
        steals: stats.steals,
        threes: stats.threes,
        fantasy_points,
        fpg: points_per_game(fantasy_points, stats.games),
        rank: None,
    }
}

/// Score every line, preserving order
pub fn score_all(players: Vec<PlayerLine>) -> Vec<PlayerRecord> {
    players.into_iter().map(score).collect()
}

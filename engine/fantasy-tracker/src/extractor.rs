//! Flattens stats table entries into player lines.
//!
//! Each entry carries its statistics as a list of single-key mappings. The
//! extractor walks that list once, keeping the first value seen for each
//! tracked category and ignoring keys it does not track. Anything that does not
//! match the expected shape fails the run with the entry index and player name.

use crate::error::{Result, TrackerError};
use crate::models::{PlayerLine, PlayerStatBlock, StatCategory, StatLine, SENTINEL_PLAYER_NAME};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Player lines extracted from one response
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub players: Vec<PlayerLine>,
    /// Number of sentinel rows dropped
    pub skipped: usize,
}

/// Pull the player entry list out of a stats table response
pub fn player_entries(response: &Value) -> Result<&[Value]> {
    let object = response
        .as_object()
        .ok_or_else(|| TrackerError::shape("response is not a JSON object"))?;

    match object.get("data") {
        Some(Value::Array(entries)) => Ok(entries.as_slice()),
        Some(other) => Err(TrackerError::shape(format!(
            "`data` is {}, expected an array",
            json_type(other)
        ))),
        None => Err(TrackerError::shape("response has no `data` key")),
    }
}

/// Extract one player line per non-sentinel entry
pub fn extract_players(entries: &[Value]) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    for (index, entry) in entries.iter().enumerate() {
        match extract_entry(index, entry)? {
            Some(player) => extraction.players.push(player),
            None => extraction.skipped += 1,
        }
    }

    debug!(
        "Extracted {} players ({} sentinel rows skipped)",
        extraction.players.len(),
        extraction.skipped
    );
    Ok(extraction)
}

/// Extract a single entry; `Ok(None)` for the sentinel row
pub fn extract_entry(index: usize, entry: &Value) -> Result<Option<PlayerLine>> {
    // Checked on the raw value: the placeholder row need not be well formed.
    if entry.get("full_name").and_then(Value::as_str) == Some(SENTINEL_PLAYER_NAME) {
        debug!("Skipping sentinel row at index {}", index);
        return Ok(None);
    }

    let block: PlayerStatBlock = serde_json::from_value(entry.clone())
        .map_err(|e| TrackerError::shape(format!("entry {index}: {e}")))?;

    let stats = build_stat_line(&block.stats).map_err(|reason| {
        TrackerError::shape(format!("entry {index} ({}): {reason}", block.full_name))
    })?;

    Ok(Some(PlayerLine { name: block.full_name, team: block.team_market, stats }))
}

/// Single pass over the stat list; first occurrence of a category wins
pub fn build_stat_line(stats: &[Map<String, Value>]) -> std::result::Result<StatLine, String> {
    let mut line = StatLine::default();
    let mut seen: HashSet<StatCategory> = HashSet::with_capacity(StatCategory::ALL.len());

    for mapping in stats {
        for (key, value) in mapping {
            let Some(category) = StatCategory::from_key(key) else {
                continue;
            };
            if !seen.insert(category) {
                continue;
            }
            let parsed = coerce_stat(value)
                .ok_or_else(|| format!("invalid value for `{key}`: {value}"))?;
            line.set(category, parsed);
        }
    }

    Ok(line)
}

/// Coerce a stat value to a non-negative integer.
///
/// Accepts JSON integers, JSON floats (truncated toward zero) and strings
/// holding either. Negative, non-finite and out-of-range values are rejected.
pub fn coerce_stat(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                u32::try_from(n).ok()
            } else if number.is_i64() {
                None
            } else {
                number.as_f64().and_then(truncate_float)
            }
        }
        Value::String(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<u64>() {
                u32::try_from(n).ok()
            } else {
                text.parse::<f64>().ok().and_then(truncate_float)
            }
        }
        _ => None,
    }
}

fn truncate_float(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let truncated = value.trunc();
    if truncated > u32::MAX as f64 {
        return None;
    }
    Some(truncated as u32)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// All matches from one player's data file, keyed by match id.
pub type MatchStore = BTreeMap<String, Match>;

pub const UNKNOWN_MAP: &str = "Unknown";

// One player file entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub match_timestamp: Option<String>,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub is_win: bool,
    #[serde(default)]
    pub match_details: Vec<PlayerMatchRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_same_team: bool,
    #[serde(default)]
    pub rank_delta: i64,
    #[serde(default)]
    pub heroes: Vec<String>,
}

impl PlayerMatchRecord {
    pub fn played(&self, hero: &str) -> bool {
        self.heroes.iter().any(|h| h == hero)
    }
}

impl Match {
    /// The first record belonging to `player`, if they appear in this match.
    pub fn record_for(&self, player: &str) -> Option<&PlayerMatchRecord> {
        self.match_details.iter().find(|r| r.name == player)
    }

    /// The player's record, only when they played `hero` in this match.
    pub fn record_on_hero(&self, player: &str, hero: &str) -> Option<&PlayerMatchRecord> {
        self.record_for(player).filter(|r| r.played(hero))
    }

    pub fn map_name(&self) -> &str {
        self.map.as_deref().unwrap_or(UNKNOWN_MAP)
    }

    pub fn local_time(&self, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.match_timestamp
            .as_deref()
            .and_then(|ts| parse_timestamp(ts, offset))
    }
}

/// Parses `2025-01-31T18:04:11+00:00` and shifts it into `offset`.
pub fn parse_timestamp(raw: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let parsed = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%:z")
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"));

    match parsed {
        Ok(time) => Some(time.with_timezone(offset)),
        Err(e) => {
            warn!(timestamp = raw, error = %e, "Could not parse match timestamp");
            None
        }
    }
}

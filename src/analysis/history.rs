use crate::data::{Match, MatchStore, PlayerMatchRecord};
use chrono::{DateTime, FixedOffset};
use std::cmp::Reverse;

#[derive(Debug, Clone)]
pub struct GameSummary<'a> {
    pub played_at: Option<DateTime<FixedOffset>>,
    pub map: &'a str,
    pub is_win: bool,
    pub details: &'a [PlayerMatchRecord],
}

impl GameSummary<'_> {
    pub fn local_time_label(&self) -> String {
        self.played_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S %:z").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn record_for(&self, player: &str) -> Option<&PlayerMatchRecord> {
        self.details.iter().find(|r| r.name == player)
    }
}

/// Most recent first. Matches with no usable timestamp sort last.
pub fn latest_games<'a>(matches: &[&'a Match], count: usize, offset: &FixedOffset) -> Vec<GameSummary<'a>> {
    let mut games: Vec<GameSummary<'a>> = matches
        .iter()
        .map(|m| GameSummary {
            played_at: m.local_time(offset),
            map: m.map_name(),
            is_win: m.is_win,
            details: &m.match_details,
        })
        .collect();

    // None < Some, so reversing puts missing timestamps at the end
    games.sort_by_key(|g| Reverse(g.played_at));
    games.truncate(count);
    games
}

/// Newest parseable timestamp across every player's matches.
pub fn latest_update<'a>(
    stores: impl IntoIterator<Item = &'a MatchStore>,
    offset: &FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    stores
        .into_iter()
        .flat_map(|store| store.values())
        .filter_map(|m| m.local_time(offset))
        .max()
}

pub fn latest_update_label(latest: Option<DateTime<FixedOffset>>) -> String {
    match latest {
        Some(time) => format!("Last data update: {}", time.format("%Y-%m-%d %I:%M:%S %p %:z")),
        None => "Last data update: N/A".to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub net_delta: i64,
}

impl RecordSummary {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

pub fn record_summary(matches: &[&Match], player: &str) -> RecordSummary {
    let wins = matches.iter().filter(|m| m.is_win).count();
    let net_delta = matches
        .iter()
        .filter_map(|m| m.record_for(player))
        .map(|r| r.rank_delta)
        .sum();

    RecordSummary {
        games: matches.len(),
        wins,
        losses: matches.len() - wins,
        net_delta,
    }
}

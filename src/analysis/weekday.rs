use super::aggregate::{Mode, Ranking, Tally};
use crate::data::Match;
use chrono::{Datelike, FixedOffset};

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One tally per weekday, Monday first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekdayPerformance {
    days: [Tally; 7],
}

impl WeekdayPerformance {
    pub fn day(&self, name: &str) -> Option<&Tally> {
        DAYS.iter().position(|d| *d == name).map(|i| &self.days[i])
    }

    /// Always seven entries in calendar order; game-less days are 0.
    pub fn ranking(&self, mode: Mode) -> Ranking {
        let entries = DAYS
            .iter()
            .zip(self.days.iter())
            .map(|(name, tally)| (name.to_string(), tally.value(mode).unwrap_or(0.0)))
            .collect();
        Ranking::ordered(entries)
    }

    pub fn totals(&self) -> Ranking {
        self.ranking(Mode::Total)
    }

    pub fn averages(&self) -> Ranking {
        self.ranking(Mode::Average)
    }

    pub fn games(&self) -> u32 {
        self.days.iter().map(|t| t.games).sum()
    }
}

/// Buckets each match once by its local weekday. Matches without a usable
/// timestamp are left out here but not elsewhere.
pub fn weekday_performance(matches: &[&Match], player: &str, offset: &FixedOffset) -> WeekdayPerformance {
    let mut perf = WeekdayPerformance::default();
    for m in matches {
        let Some(local) = m.local_time(offset) else {
            continue;
        };
        if let Some(record) = m.record_for(player) {
            let index = local.weekday().num_days_from_monday() as usize;
            perf.days[index].record(record.rank_delta);
        }
    }
    perf
}

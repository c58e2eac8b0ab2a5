pub mod aggregate;
pub mod filter;
pub mod heroes;
pub mod history;
pub mod maps;
pub mod matchups;
pub mod weekday;

pub use aggregate::{Mode, Ranking, Tallies, Tally};
pub use filter::{filter_matches, is_friend_game};
pub use heroes::{hero_performance, hero_tallies};
pub use maps::{map_performance, map_type_performance, MapBreakdown, MapGrouping};
pub use matchups::{matchup_performance, matchup_tallies, MatchupQuery, Side};
pub use weekday::{weekday_performance, WeekdayPerformance, DAYS};

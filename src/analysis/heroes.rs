use super::aggregate::{Mode, Ranking, Tallies};
use crate::data::Match;

/// Every hero in the player's own record gets the match's full delta, so a
/// match with two heroes counts as one game for each.
pub fn hero_tallies(matches: &[&Match], player: &str) -> Tallies {
    let mut tallies = Tallies::new();
    for m in matches {
        for record in m.match_details.iter().filter(|r| r.name == player) {
            for hero in &record.heroes {
                tallies.record(hero, record.rank_delta);
            }
        }
    }
    tallies
}

/// Heroes with fewer than `min_games` games are dropped in both modes.
pub fn hero_performance(matches: &[&Match], player: &str, mode: Mode, min_games: u32) -> Ranking {
    hero_tallies(matches, player).reduce(mode, min_games)
}

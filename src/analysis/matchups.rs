use super::aggregate::{Mode, Ranking, Tallies};
use crate::data::Match;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Teammates,
    Opponents,
}

impl Side {
    pub fn is_same_team(&self) -> bool {
        matches!(self, Side::Teammates)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchupQuery<'a> {
    pub player: &'a str,
    pub hero: &'a str,
    pub side: Side,
    /// Restricts teammates to this set. Ignored for opponents.
    pub friends_only: Option<&'a HashSet<String>>,
}

impl<'a> MatchupQuery<'a> {
    pub fn new(player: &'a str, hero: &'a str, side: Side) -> Self {
        MatchupQuery {
            player,
            hero,
            side,
            friends_only: None,
        }
    }

    pub fn with_friends(mut self, friends: Option<&'a HashSet<String>>) -> Self {
        self.friends_only = friends;
        self
    }
}

/// Keys are the heroes on the other side (or own team); values accumulate the
/// querying player's own delta, not the target's.
pub fn matchup_tallies(matches: &[&Match], query: &MatchupQuery<'_>) -> Tallies {
    let mut tallies = Tallies::new();
    let friends = match query.side {
        Side::Teammates => query.friends_only,
        Side::Opponents => None,
    };

    for m in matches {
        let Some(me) = m.record_on_hero(query.player, query.hero) else {
            continue;
        };

        let targets = m.match_details.iter().filter(|r| {
            r.name != query.player
                && r.is_same_team == query.side.is_same_team()
                && friends.map_or(true, |f| f.contains(&r.name))
        });

        for target in targets {
            for hero in &target.heroes {
                tallies.record(hero, me.rank_delta);
            }
        }
    }

    tallies
}

/// No minimum-games floor here, unlike the hero breakdown.
pub fn matchup_performance(matches: &[&Match], query: &MatchupQuery<'_>, mode: Mode) -> Ranking {
    matchup_tallies(matches, query).reduce(mode, 0)
}

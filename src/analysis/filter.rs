use crate::data::Match;
use std::collections::HashSet;

/// True when a teammate other than `player` is in `friends`.
pub fn is_friend_game(m: &Match, player: &str, friends: &HashSet<String>) -> bool {
    m.match_details
        .iter()
        .filter(|r| r.is_same_team && r.name != player)
        .any(|r| friends.contains(&r.name))
}

/// Passes every match through when `only_friend_games` is off.
pub fn filter_matches<'a, I>(
    matches: I,
    only_friend_games: bool,
    player: &str,
    friends: &HashSet<String>,
) -> Vec<&'a Match>
where
    I: IntoIterator<Item = &'a Match>,
{
    matches
        .into_iter()
        .filter(|m| !only_friend_games || is_friend_game(m, player, friends))
        .collect()
}

use super::aggregate::{Mode, Ranking, Tallies};
use crate::data::Match;
use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MapGrouping {
    Map,
    MapType,
}

impl MapGrouping {
    pub fn label(&self) -> &'static str {
        match self {
            MapGrouping::Map => "Map",
            MapGrouping::MapType => "Map Type",
        }
    }
}

/// Total delta and game count per map (or map type) for one hero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapBreakdown {
    tallies: Tallies,
}

impl MapBreakdown {
    pub fn totals(&self) -> BTreeMap<String, i64> {
        self.tallies.totals()
    }

    pub fn games(&self) -> BTreeMap<String, u32> {
        self.tallies.games()
    }

    pub fn average(&self, key: &str) -> Option<f64> {
        self.tallies.get(key).and_then(|t| t.average())
    }

    pub fn ranking(&self, mode: Mode) -> Ranking {
        self.tallies.reduce(mode, 0)
    }

    /// Highest total, or highest average with game-less keys ranked last.
    pub fn best(&self, mode: Mode) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (key, tally) in self.tallies.iter() {
            let score = tally.value(mode).unwrap_or(f64::NEG_INFINITY);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((key, score));
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}

fn breakdown_by<F>(matches: &[&Match], player: &str, hero: &str, mut key_of: F) -> AppResult<MapBreakdown>
where
    F: FnMut(&Match) -> AppResult<String>,
{
    let mut tallies = Tallies::new();
    for &m in matches {
        let key = key_of(m)?;
        if let Some(record) = m.record_on_hero(player, hero) {
            tallies.record(&key, record.rank_delta);
        }
    }
    Ok(MapBreakdown { tallies })
}

/// Matches without a map are grouped under "Unknown".
pub fn map_performance(matches: &[&Match], player: &str, hero: &str) -> MapBreakdown {
    breakdown_by(matches, player, hero, |m| Ok(m.map_name().to_string())).unwrap_or_default()
}

/// Every match's map must be present in `map_types`, even matches the hero
/// was not played in; there is no fallback bucket.
pub fn map_type_performance(
    matches: &[&Match],
    player: &str,
    hero: &str,
    map_types: &HashMap<String, String>,
) -> AppResult<MapBreakdown> {
    breakdown_by(matches, player, hero, |m| {
        map_types
            .get(m.map_name())
            .cloned()
            .ok_or_else(|| AppError::UnknownMap(m.map_name().to_string()))
    })
}

pub fn performance_by(
    grouping: MapGrouping,
    matches: &[&Match],
    player: &str,
    hero: &str,
    map_types: &HashMap<String, String>,
) -> AppResult<MapBreakdown> {
    match grouping {
        MapGrouping::Map => Ok(map_performance(matches, player, hero)),
        MapGrouping::MapType => map_type_performance(matches, player, hero, map_types),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PlayerMatchRecord;

    fn game(map: &str, delta: i64, hero: &str) -> Match {
        Match {
            map: Some(map.to_string()),
            match_details: vec![PlayerMatchRecord {
                name: "P".to_string(),
                is_same_team: true,
                rank_delta: delta,
                heroes: vec![hero.to_string()],
            }],
            ..Default::default()
        }
    }

    fn map_types() -> HashMap<String, String> {
        [("Krakoa", "Domination"), ("Midtown", "Convoy"), ("Arakko", "Convoy")]
            .into_iter()
            .map(|(m, t)| (m.to_string(), t.to_string()))
            .collect()
    }

    fn games() -> Vec<Match> {
        vec![
            game("Krakoa", 20, "Namor"),
            game("Krakoa", -10, "Namor"),
            game("Midtown", 8, "Namor"),
            game("Arakko", -2, "Namor"),
            game("Arakko", 50, "Storm"),
        ]
    }

    #[test]
    fn test_map_totals_and_counts() {
        let games = games();
        let refs: Vec<&Match> = games.iter().collect();
        let breakdown = map_performance(&refs, "P", "Namor");

        assert_eq!(breakdown.totals()["Krakoa"], 10);
        assert_eq!(breakdown.games()["Krakoa"], 2);
        assert_eq!(breakdown.totals()["Arakko"], -2);
        assert_eq!(breakdown.average("Krakoa"), Some(5.0));
        assert_eq!(breakdown.best(Mode::Total), Some(("Krakoa", 10.0)));
        assert_eq!(breakdown.best(Mode::Average), Some(("Midtown", 8.0)));
    }

    #[test]
    fn test_map_type_grouping() {
        let games = games();
        let refs: Vec<&Match> = games.iter().collect();
        let breakdown = map_type_performance(&refs, "P", "Namor", &map_types()).unwrap();

        assert_eq!(breakdown.totals()["Convoy"], 6);
        assert_eq!(breakdown.games()["Convoy"], 2);
        assert_eq!(breakdown.totals()["Domination"], 10);
        assert_eq!(
            breakdown.ranking(Mode::Total).keys().collect::<Vec<_>>(),
            vec!["Domination", "Convoy"]
        );
    }

    #[test]
    fn test_unmapped_map_is_hard_error() {
        let mut games = games();
        games.push(game("Tokyo 2099", 5, "Storm"));
        let refs: Vec<&Match> = games.iter().collect();

        let result = map_type_performance(&refs, "P", "Namor", &map_types());
        assert!(matches!(result, Err(AppError::UnknownMap(name)) if name == "Tokyo 2099"));
    }

    #[test]
    fn test_missing_map_field_groups_as_unknown() {
        let mut m = game("x", 3, "Namor");
        m.map = None;
        let refs = vec![&m];
        let breakdown = performance_by(MapGrouping::Map, &refs, "P", "Namor", &map_types()).unwrap();
        assert_eq!(breakdown.totals()["Unknown"], 3);
    }
}

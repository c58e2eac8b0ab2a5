use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How a category's games are reduced to one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Total,
    Average,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Total => "Total",
            Mode::Average => "Average",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: i64,
    pub games: u32,
}

impl Tally {
    pub fn record(&mut self, delta: i64) {
        self.total += delta;
        self.games += 1;
    }

    pub fn average(&self) -> Option<f64> {
        if self.games == 0 {
            None
        } else {
            Some(self.total as f64 / self.games as f64)
        }
    }

    pub fn value(&self, mode: Mode) -> Option<f64> {
        match mode {
            Mode::Total => Some(self.total as f64),
            Mode::Average => self.average(),
        }
    }
}

/// Per-category running totals. Absent keys mean "no games", never zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tallies {
    by_key: BTreeMap<String, Tally>,
}

impl Tallies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str, delta: i64) {
        self.by_key.entry(key.to_string()).or_default().record(delta);
    }

    pub fn get(&self, key: &str) -> Option<&Tally> {
        self.by_key.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tally)> {
        self.by_key.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn totals(&self) -> BTreeMap<String, i64> {
        self.iter().map(|(k, t)| (k.to_string(), t.total)).collect()
    }

    pub fn games(&self) -> BTreeMap<String, u32> {
        self.iter().map(|(k, t)| (k.to_string(), t.games)).collect()
    }

    /// Reduces every category with at least `min_games` games and sorts the
    /// result by value, highest first.
    pub fn reduce(&self, mode: Mode, min_games: u32) -> Ranking {
        let entries = self
            .iter()
            .filter(|(_, t)| t.games >= min_games)
            .filter_map(|(k, t)| t.value(mode).map(|v| (k.to_string(), v)))
            .collect();
        Ranking::sorted(entries)
    }
}

/// Category values in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    entries: Vec<(String, f64)>,
}

impl Ranking {
    /// Sorts descending by value; ties fall back to the category name.
    pub fn sorted(mut entries: Vec<(String, f64)>) -> Self {
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Ranking { entries }
    }

    /// Keeps the given order as-is.
    pub fn ordered(entries: Vec<(String, f64)>) -> Self {
        Ranking { entries }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn first(&self) -> Option<(&str, f64)> {
        self.entries.first().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn last(&self) -> Option<(&str, f64)> {
        self.entries.last().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Tallies {
        let mut tallies = Tallies::new();
        for delta in [10, 20, -5, 15, 10] {
            tallies.record("Namor", delta);
        }
        tallies.record("Storm", -30);
        tallies.record("Loki", 40);
        tallies.record("Loki", -40);
        tallies
    }

    #[test]
    fn test_record_accumulates_total_and_games() {
        let tallies = sample();
        let namor = tallies.get("Namor").unwrap();
        assert_eq!(namor.total, 50);
        assert_eq!(namor.games, 5);
        assert_eq!(namor.average(), Some(10.0));
        assert!(tallies.get("Hulk").is_none());
    }

    #[rstest]
    #[case(Mode::Total, 0, vec!["Namor", "Loki", "Storm"])]
    #[case(Mode::Average, 0, vec!["Namor", "Loki", "Storm"])]
    #[case(Mode::Total, 2, vec!["Namor", "Loki"])]
    #[case(Mode::Average, 5, vec!["Namor"])]
    #[case(Mode::Total, 6, vec![])]
    fn test_reduce_applies_floor_and_sorts(
        #[case] mode: Mode,
        #[case] min_games: u32,
        #[case] expected: Vec<&str>,
    ) {
        let ranking = sample().reduce(mode, min_games);
        assert_eq!(ranking.keys().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_ties_sort_by_name() {
        let ranking = Ranking::sorted(vec![
            ("b".to_string(), 1.0),
            ("a".to_string(), 1.0),
            ("c".to_string(), 2.0),
        ]);
        assert_eq!(ranking.keys().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(ranking.first(), Some(("c", 2.0)));
        assert_eq!(ranking.last(), Some(("b", 1.0)));
    }

    #[test]
    fn test_zero_game_tally_has_no_average() {
        assert_eq!(Tally::default().average(), None);
        assert_eq!(Tally::default().value(Mode::Total), Some(0.0));
    }

    #[test]
    fn test_parallel_totals_and_games() {
        let tallies = sample();
        assert_eq!(tallies.totals()["Loki"], 0);
        assert_eq!(tallies.games()["Loki"], 2);
        assert_eq!(tallies.len(), 3);
    }
}

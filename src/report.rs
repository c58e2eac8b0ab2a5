//! One player's full report: filter, aggregate, and build every chart for
//! the selected modes.

use crate::analysis::history::{latest_games, record_summary, GameSummary, RecordSummary};
use crate::analysis::{
    filter_matches, hero_performance, matchup_performance, weekday_performance, MapBreakdown,
    MapGrouping, MatchupQuery, Mode, Side,
};
use crate::analysis::maps::performance_by;
use crate::config::Config;
use crate::data::{Match, MatchStore};
use crate::display::captions;
use crate::display::chart::{self, ChartSpec};
use crate::error::AppResult;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub only_friend_games: bool,
    pub friend_teammates_only: bool,
    pub modes: Vec<Mode>,
    pub latest: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            only_friend_games: false,
            friend_teammates_only: false,
            modes: vec![Mode::Average, Mode::Total],
            latest: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub heading: String,
    pub caption: Option<String>,
    pub chart: Option<ChartSpec>,
    #[serde(skip)]
    pub empty_message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroReport {
    pub hero: String,
    pub teammates: Section,
    pub opponents: Section,
    pub maps: Section,
    pub map_types: Section,
}

impl HeroReport {
    pub fn sections(&self) -> [&Section; 4] {
        [&self.teammates, &self.opponents, &self.maps, &self.map_types]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeReport {
    pub mode: Mode,
    pub heroes_overview: Section,
    pub heroes: Vec<HeroReport>,
    pub weekday: Section,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport<'a> {
    pub player: String,
    pub total_games: usize,
    pub filtered_games: usize,
    pub filter_applied: bool,
    #[serde(skip)]
    pub summary: RecordSummary,
    pub modes: Vec<ModeReport>,
    #[serde(skip)]
    pub latest: Vec<GameSummary<'a>>,
}

impl PlayerReport<'_> {
    pub fn charts(&self) -> Vec<&ChartSpec> {
        self.modes
            .iter()
            .flat_map(|m| {
                std::iter::once(&m.heroes_overview)
                    .chain(m.heroes.iter().flat_map(|h| h.sections()))
                    .chain(std::iter::once(&m.weekday))
            })
            .filter_map(|s| s.chart.as_ref())
            .collect()
    }
}

pub fn build_player_report<'a>(
    config: &Config,
    player: &str,
    store: &'a MatchStore,
    options: &ReportOptions,
) -> AppResult<PlayerReport<'a>> {
    let matches = filter_matches(store.values(), options.only_friend_games, player, &config.friends);
    debug!(player, total = store.len(), filtered = matches.len(), "Filtered matches");

    let mut modes = Vec::new();
    if !matches.is_empty() {
        for &mode in &options.modes {
            modes.push(build_mode_report(config, player, &matches, mode, options)?);
        }
    }

    Ok(PlayerReport {
        player: player.to_string(),
        total_games: store.len(),
        filtered_games: matches.len(),
        filter_applied: options.only_friend_games,
        summary: record_summary(&matches, player),
        latest: latest_games(&matches, options.latest, &config.utc_offset),
        modes,
    })
}

/// Configured heroes for the player, otherwise every hero that clears the
/// per-game average floor.
pub fn relevant_heroes(config: &Config, player: &str, matches: &[&Match]) -> Vec<String> {
    match config.relevant_heroes(player) {
        Some(heroes) => heroes.to_vec(),
        None => hero_performance(matches, player, Mode::Average, config.min_hero_games)
            .keys()
            .map(str::to_string)
            .collect(),
    }
}

fn build_mode_report(
    config: &Config,
    player: &str,
    matches: &[&Match],
    mode: Mode,
    options: &ReportOptions,
) -> AppResult<ModeReport> {
    let label = mode.label();
    let suffix = match mode {
        Mode::Average => "(+/- per Game)",
        Mode::Total => "(Cumulative +/-)",
    };

    let heroes_ranking = hero_performance(matches, player, mode, config.min_hero_games);
    let heroes_overview = Section {
        heading: format!("{} Hero Performance {}", label, suffix),
        caption: Some(captions::hero_caption(mode, config.min_hero_games)),
        chart: chart::hero_chart(&heroes_ranking, player, mode),
        empty_message: format!(
            "No {} hero performance data available for the selected filters.",
            label.to_lowercase()
        ),
    };

    let friends = options.friend_teammates_only.then_some(&config.friends);
    let mut heroes = Vec::new();
    for hero in relevant_heroes(config, player, matches) {
        let teammates = matchup_section(matches, player, &hero, Side::Teammates, friends, mode);
        let opponents = matchup_section(matches, player, &hero, Side::Opponents, None, mode);

        let [maps, map_types] = [MapGrouping::Map, MapGrouping::MapType].map(|grouping| {
            performance_by(grouping, matches, player, &hero, &config.map_types)
                .map(|breakdown| map_section(&breakdown, &hero, grouping, mode))
        });
        let (maps, map_types) = (maps?, map_types?);

        heroes.push(HeroReport {
            hero,
            teammates,
            opponents,
            maps,
            map_types,
        });
    }

    let weekday_ranking = weekday_performance(matches, player, &config.utc_offset).ranking(mode);
    let weekday = Section {
        heading: format!("{} Performance by Day of Week", label),
        caption: Some(captions::weekday_caption(mode)),
        chart: chart::weekday_chart(&weekday_ranking, player, mode),
        empty_message: format!(
            "No {} performance data by day of week available for the selected filters.",
            label.to_lowercase()
        ),
    };

    Ok(ModeReport {
        mode,
        heroes_overview,
        heroes,
        weekday,
    })
}

fn matchup_section(
    matches: &[&Match],
    player: &str,
    hero: &str,
    side: Side,
    friends: Option<&HashSet<String>>,
    mode: Mode,
) -> Section {
    let query = MatchupQuery::new(player, hero, side).with_friends(friends);
    let ranking = matchup_performance(matches, &query, mode);
    let who = match side {
        Side::Teammates => "teammate",
        Side::Opponents => "opponent",
    };

    Section {
        heading: format!("{} matchups when playing {}", capitalize(who), hero),
        caption: captions::matchup_caption(&ranking, hero, side, mode),
        chart: chart::matchup_chart(&ranking, hero, side, mode),
        empty_message: format!(
            "No {} matchup data available for {} with the selected filters.",
            who, hero
        ),
    }
}

fn map_section(breakdown: &MapBreakdown, hero: &str, grouping: MapGrouping, mode: Mode) -> Section {
    Section {
        heading: format!("{} performance for {}", grouping.label(), hero),
        caption: captions::map_caption(breakdown, hero, grouping, mode),
        chart: chart::map_chart(breakdown, hero, grouping, mode),
        empty_message: format!(
            "No {} performance data available for {} with the selected filters.",
            grouping.label().to_lowercase(),
            hero
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

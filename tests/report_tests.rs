use rivals_report::analysis::Mode;
use rivals_report::cache::StoreCache;
use rivals_report::config::{Config, PlayerEntry};
use rivals_report::data::load_all_players;
use rivals_report::display::output::write_chart_export;
use rivals_report::error::AppError;
use rivals_report::report::{build_player_report, relevant_heroes, ReportOptions};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn match_json(id: usize, map: &str, delta: i64, hero: &str, teammate: &str) -> String {
    format!(
        r#""m{id}": {{
            "match_timestamp": "2025-01-{day:02}T18:00:00+00:00",
            "map": "{map}",
            "is_win": {win},
            "match_details": [
                {{"name": "Alpha", "is_same_team": true, "rank_delta": {delta}, "heroes": ["{hero}"]}},
                {{"name": "{teammate}", "is_same_team": true, "rank_delta": 3, "heroes": ["Groot"]}},
                {{"name": "Enemy", "is_same_team": false, "rank_delta": -3, "heroes": ["Hela"]}}
            ]
        }}"#,
        id = id,
        day = id + 1,
        map = map,
        win = delta > 0,
        delta = delta,
        hero = hero,
        teammate = teammate,
    )
}

fn setup(maps: &[&str]) -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();

    let entries: Vec<String> = maps
        .iter()
        .enumerate()
        .map(|(i, map)| {
            let teammate = if i % 2 == 0 { "Bravo" } else { "Stranger" };
            match_json(i, map, (i as i64 * 7) - 10, "Namor", teammate)
        })
        .collect();
    fs::write(
        dir.path().join("alpha.json"),
        format!("{{{}}}", entries.join(",")),
    )
    .unwrap();

    let config = Config {
        data_dir: dir.path().to_path_buf(),
        players: vec![PlayerEntry::new("alpha", "Alpha"), PlayerEntry::new("bravo", "Bravo")],
        friends: ["Alpha", "Bravo"].iter().map(|s| s.to_string()).collect(),
        relevant_heroes: HashMap::new(),
        ..Config::default()
    };

    (dir, config)
}

#[test]
fn test_full_report_for_player() {
    let (_dir, config) = setup(&["Krakoa", "Midtown", "Krakoa", "Arakko", "Central Park", "Krakoa"]);
    let mut cache = StoreCache::new();
    let data = load_all_players(&config, &mut cache, |_| {}).unwrap();
    let alpha = data.get("Alpha").unwrap();

    let report = build_player_report(&config, "Alpha", &alpha.matches, &ReportOptions::default()).unwrap();

    assert_eq!(report.total_games, 6);
    assert_eq!(report.filtered_games, 6);
    assert_eq!(report.modes.len(), 2);
    assert_eq!(report.modes[0].mode, Mode::Average);

    // Six Namor games clear the five-game floor, so Namor is the fallback hero
    let average = &report.modes[0];
    assert_eq!(average.heroes.len(), 1);
    assert_eq!(average.heroes[0].hero, "Namor");
    assert!(average.heroes_overview.chart.is_some());
    assert!(average.heroes[0].map_types.chart.is_some());
    assert!(average.weekday.chart.is_some());

    let opponents = average.heroes[0].opponents.chart.as_ref().unwrap();
    assert_eq!(opponents.labels(), vec!["Hela"]);
    assert_eq!(report.latest.len(), 6);
    assert_eq!(report.summary.games, 6);
}

#[test]
fn test_friends_only_filter() {
    let (_dir, config) = setup(&["Krakoa", "Midtown", "Krakoa", "Arakko"]);
    let mut cache = StoreCache::new();
    let data = load_all_players(&config, &mut cache, |_| {}).unwrap();
    let alpha = data.get("Alpha").unwrap();

    let options = ReportOptions {
        only_friend_games: true,
        ..ReportOptions::default()
    };
    let report = build_player_report(&config, "Alpha", &alpha.matches, &options).unwrap();

    assert!(report.filter_applied);
    assert_eq!(report.filtered_games, 2);
    // Under the five-game floor with no configured heroes there is nothing to break down
    assert!(report.modes[0].heroes.is_empty());
    assert!(report.modes[0].heroes_overview.chart.is_none());
}

#[test]
fn test_no_matching_games_builds_no_sections() {
    let (_dir, mut config) = setup(&["Krakoa"]);
    config.friends.clear();
    let mut cache = StoreCache::new();
    let data = load_all_players(&config, &mut cache, |_| {}).unwrap();

    let options = ReportOptions {
        only_friend_games: true,
        ..ReportOptions::default()
    };
    let report = build_player_report(&config, "Alpha", &data.get("Alpha").unwrap().matches, &options).unwrap();

    assert_eq!(report.filtered_games, 0);
    assert!(report.modes.is_empty());
    assert!(report.charts().is_empty());
}

#[test]
fn test_unknown_map_fails_report() {
    let (_dir, mut config) = setup(&["Krakoa", "Tokyo 2099"]);
    config
        .relevant_heroes
        .insert("Alpha".to_string(), vec!["Namor".to_string()]);
    let mut cache = StoreCache::new();
    let data = load_all_players(&config, &mut cache, |_| {}).unwrap();

    let result = build_player_report(
        &config,
        "Alpha",
        &data.get("Alpha").unwrap().matches,
        &ReportOptions::default(),
    );
    assert!(matches!(result, Err(AppError::UnknownMap(map)) if map == "Tokyo 2099"));
}

#[test]
fn test_configured_heroes_override_fallback() {
    let (_dir, mut config) = setup(&["Krakoa"]);
    config
        .relevant_heroes
        .insert("Alpha".to_string(), vec!["Storm".to_string(), "Namor".to_string()]);

    assert_eq!(relevant_heroes(&config, "Alpha", &[]), vec!["Storm", "Namor"]);
    assert!(relevant_heroes(&config, "Bravo", &[]).is_empty());
}

#[test]
fn test_export_writes_chart_specs() {
    let (dir, config) = setup(&["Krakoa", "Midtown", "Krakoa", "Arakko", "Central Park"]);
    let mut cache = StoreCache::new();
    let data = load_all_players(&config, &mut cache, |_| {}).unwrap();
    let report = build_player_report(
        &config,
        "Alpha",
        &data.get("Alpha").unwrap().matches,
        &ReportOptions {
            modes: vec![Mode::Total],
            ..ReportOptions::default()
        },
    )
    .unwrap();

    let path = dir.path().join("charts.json");
    write_chart_export(&path, &[report]).unwrap();

    let exported: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let first_mode = &exported["reports"][0]["modes"][0];
    assert_eq!(first_mode["mode"], "Total");
    assert_eq!(
        first_mode["heroes_overview"]["chart"]["y_label"],
        "Total Cumulative Rank Delta"
    );
    assert_eq!(first_mode["heroes_overview"]["chart"]["bars"][0]["color"], "positive");
}

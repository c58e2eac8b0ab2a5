use super::models::MatchStore;
use crate::cache::StoreCache;
use crate::config::{Config, PlayerEntry};
use crate::error::{AppError, AppResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

pub fn load_player_file(path: &Path) -> AppResult<MatchStore> {
    let content = fs::read_to_string(path)?;
    let store: MatchStore = serde_json::from_str(&content)?;
    Ok(store)
}

#[derive(Debug, Clone)]
pub struct LoadedPlayer {
    pub entry: PlayerEntry,
    pub path: PathBuf,
    pub matches: Arc<MatchStore>,
}

/// Every player whose data file could be read, in configured order.
#[derive(Debug, Clone, Default)]
pub struct PlayerData {
    players: Vec<LoadedPlayer>,
}

impl PlayerData {
    pub fn available(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.entry.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&LoadedPlayer> {
        self.players.iter().find(|p| p.entry.name == name)
    }

    pub fn first(&self) -> Option<&LoadedPlayer> {
        self.players.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedPlayer> {
        self.players.iter()
    }

    pub fn stores(&self) -> impl Iterator<Item = &MatchStore> {
        self.players.iter().map(|p| p.matches.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }
}

/// Loads each configured player through `cache`. A missing or malformed file
/// skips that player; only an empty result is an error.
pub fn load_all_players(
    config: &Config,
    cache: &mut StoreCache,
    mut on_player: impl FnMut(&PlayerEntry),
) -> AppResult<PlayerData> {
    let mut players = Vec::new();

    for entry in &config.players {
        let path = config.player_file(entry);
        match cache.get_or_load(&path) {
            Ok(matches) => {
                info!(player = %entry.name, matches = matches.len(), "Loaded player data");
                players.push(LoadedPlayer {
                    entry: entry.clone(),
                    path,
                    matches,
                });
            }
            Err(AppError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Data file not found for {}: {}. Skipping player.",
                    entry.name,
                    path.display()
                );
            }
            Err(AppError::Json(e)) => {
                error!(
                    "Error decoding JSON for {} from {}: {}. Skipping player.",
                    entry.name,
                    path.display(),
                    e
                );
            }
            Err(e) => {
                error!("Failed to load {} from {}: {}", entry.name, path.display(), e);
            }
        }
        on_player(entry);
    }

    if players.is_empty() {
        return Err(AppError::NoPlayerData);
    }

    Ok(PlayerData { players })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ONE_MATCH: &str = r#"{
        "m1": {
            "match_timestamp": "2025-01-14T03:00:00+00:00",
            "map": "Krakoa",
            "is_win": true,
            "match_details": [
                {"name": "Alpha", "is_same_team": true, "rank_delta": 12, "heroes": ["Namor"]}
            ]
        }
    }"#;

    fn config_for(dir: &TempDir) -> Config {
        Config {
            data_dir: dir.path().to_path_buf(),
            players: vec![
                PlayerEntry::new("alpha", "Alpha"),
                PlayerEntry::new("bravo", "Bravo"),
                PlayerEntry::new("charlie", "Charlie"),
            ],
            ..Config::default()
        }
    }

    #[test]
    fn test_load_player_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alpha.json");
        fs::write(&path, ONE_MATCH).unwrap();

        let store = load_player_file(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store["m1"].match_details[0].rank_delta, 12);
    }

    #[test]
    fn test_missing_and_malformed_players_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alpha.json"), ONE_MATCH).unwrap();
        fs::write(dir.path().join("charlie.json"), "{ not json").unwrap();

        let config = config_for(&dir);
        let mut cache = StoreCache::new();
        let mut visited = Vec::new();
        let data = load_all_players(&config, &mut cache, |p| visited.push(p.handle.clone())).unwrap();

        assert_eq!(data.available(), vec!["Alpha"]);
        assert_eq!(visited, vec!["alpha", "bravo", "charlie"]);
        assert!(data.get("Bravo").is_none());
    }

    #[test]
    fn test_no_loadable_players_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let mut cache = StoreCache::new();

        let result = load_all_players(&config, &mut cache, |_| {});
        assert!(matches!(result, Err(AppError::NoPlayerData)));
    }
}

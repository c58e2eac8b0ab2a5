use crate::error::{AppError, AppResult};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_UTC_OFFSET_HOURS: i32 = -8;
const DEFAULT_MIN_HERO_GAMES: u32 = 5;

/// One tracked player: the data file handle and the in-game name used in match details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerEntry {
    pub handle: String,
    pub name: String,
}

impl PlayerEntry {
    pub fn new(handle: &str, name: &str) -> Self {
        PlayerEntry {
            handle: handle.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub utc_offset: FixedOffset,
    pub players: Vec<PlayerEntry>,
    pub friends: HashSet<String>,
    pub relevant_heroes: HashMap<String, Vec<String>>,
    pub map_types: HashMap<String, String>,
    pub min_hero_games: u32,
}

/// Overrides read from a JSON config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub utc_offset_hours: Option<i32>,
    pub players: Option<Vec<PlayerEntry>>,
    pub friends: Option<Vec<String>>,
    pub relevant_heroes: Option<HashMap<String, Vec<String>>>,
    pub map_types: Option<HashMap<String, String>>,
    pub min_hero_games: Option<u32>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let players = vec![
            PlayerEntry::new("glacial_spark", "glacial_spark"),
            PlayerEntry::new("lunatoemuncher", "LunaToeMuncher"),
            PlayerEntry::new("liquidussnake1", "LiquidusSnake1"),
        ];
        let friends = players.iter().map(|p| p.name.clone()).collect();

        let relevant_heroes = HashMap::from([
            (
                "glacial_spark".to_string(),
                strings(&["Rocket Raccoon", "Doctor Strange", "Mister Fantastic", "Namor"]),
            ),
            (
                "LunaToeMuncher".to_string(),
                strings(&[
                    "Cloak & Dagger",
                    "Scarlet Witch",
                    "Peni Parker",
                    "Mister Fantastic",
                    "Squirrel Girl",
                ]),
            ),
        ]);

        let map_types = [
            ("Spider-Islands", "Convoy"),
            ("Krakoa", "Domination"),
            ("Yggdrasill Path", "Convoy"),
            ("Birnin T'Challa", "Domination"),
            ("Central Park", "Convergence"),
            ("Symbiotic Surface", "Convergence"),
            ("Hell's Heaven", "Domination"),
            ("Midtown", "Convoy"),
            ("Hall Of Djalia", "Convergence"),
            ("Arakko", "Convoy"),
        ]
        .into_iter()
        .map(|(map, kind)| (map.to_string(), kind.to_string()))
        .collect();

        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            utc_offset: offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|_| Utc.fix()),
            players,
            friends,
            relevant_heroes,
            map_types,
            min_hero_games: DEFAULT_MIN_HERO_GAMES,
        }
    }
}

impl Config {
    /// Built-in tables, then the config file (`config_path`, `RIVALS_CONFIG`,
    /// or `~/.rivals_report/config.json`), then environment variables.
    pub fn from_env(config_path: Option<&Path>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        let file_path = config_path
            .map(Path::to_path_buf)
            .or_else(|| env::var("RIVALS_CONFIG").ok().map(PathBuf::from))
            .or_else(|| Some(default_config_path()).filter(|p| p.exists()));
        if let Some(path) = file_path {
            config.apply_file(ConfigFile::load(&path)?)?;
        }

        if let Ok(dir) = env::var("RIVALS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = env::var("RIVALS_UTC_OFFSET_HOURS") {
            let hours: i32 = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("RIVALS_UTC_OFFSET_HOURS is not an integer: {}", raw))
            })?;
            config.utc_offset = offset_from_hours(hours)?;
        }

        Ok(config)
    }

    pub fn apply_file(&mut self, file: ConfigFile) -> AppResult<()> {
        if let Some(dir) = file.data_dir {
            self.data_dir = dir;
        }
        if let Some(hours) = file.utc_offset_hours {
            self.utc_offset = offset_from_hours(hours)?;
        }
        if let Some(players) = file.players {
            self.players = players;
            // Friends follow the player list unless set explicitly below.
            self.friends = self.players.iter().map(|p| p.name.clone()).collect();
        }
        if let Some(friends) = file.friends {
            self.friends = friends.into_iter().collect();
        }
        if let Some(relevant) = file.relevant_heroes {
            self.relevant_heroes = relevant;
        }
        if let Some(map_types) = file.map_types {
            self.map_types = map_types;
        }
        if let Some(min_games) = file.min_hero_games {
            self.min_hero_games = min_games;
        }
        Ok(())
    }

    pub fn set_utc_offset_hours(&mut self, hours: i32) -> AppResult<()> {
        self.utc_offset = offset_from_hours(hours)?;
        Ok(())
    }

    pub fn player_file(&self, player: &PlayerEntry) -> PathBuf {
        self.data_dir.join(format!("{}.json", player.handle))
    }

    /// Looks a player up by in-game name or file handle, ignoring case.
    pub fn find_player(&self, query: &str) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| {
            p.name.eq_ignore_ascii_case(query) || p.handle.eq_ignore_ascii_case(query)
        })
    }

    pub fn relevant_heroes(&self, player: &str) -> Option<&[String]> {
        self.relevant_heroes.get(player).map(Vec::as_slice)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rivals_report")
        .join("config.json")
}

fn offset_from_hours(hours: i32) -> AppResult<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::Config(format!("UTC offset out of range: {} hours", hours)))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

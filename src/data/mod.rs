pub mod loader;
pub mod models;

pub use loader::{load_all_players, load_player_file, LoadedPlayer, PlayerData};
pub use models::{parse_timestamp, Match, MatchStore, PlayerMatchRecord};

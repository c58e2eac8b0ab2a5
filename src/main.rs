use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use rivals_report::analysis::history::{latest_update, latest_update_label};
use rivals_report::analysis::Mode;
use rivals_report::cache::StoreCache;
use rivals_report::config::Config;
use rivals_report::data::{load_all_players, LoadedPlayer, PlayerData};
use rivals_report::display::output::{
    display_error, display_info, display_player_report, display_success, write_chart_export,
};
use rivals_report::error::AppError;
use rivals_report::report::{build_player_report, ReportOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Average,
    Total,
    Both,
}

impl ModeArg {
    fn modes(self) -> Vec<Mode> {
        match self {
            ModeArg::Average => vec![Mode::Average],
            ModeArg::Total => vec![Mode::Total],
            ModeArg::Both => vec![Mode::Average, Mode::Total],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Rivals Report")]
#[command(about = "Rank delta breakdowns by hero, matchup, map and day of week", long_about = None)]
struct Args {
    /// Player to report on, by in-game name or file handle (default: first available)
    #[arg(short, long)]
    player: Option<String>,

    /// Report on every player whose data loaded
    #[arg(long, conflicts_with = "player")]
    all_players: bool,

    /// Only include games with a friend on your team
    #[arg(long)]
    friends_only: bool,

    /// Restrict same-team matchup charts to heroes played by friends
    #[arg(long)]
    friend_teammates: bool,

    /// Which aggregations to show
    #[arg(short, long, value_enum, default_value = "both")]
    mode: ModeArg,

    /// Number of most recent games to list (default: 10)
    #[arg(short, long, default_value = "10")]
    latest: usize,

    /// Write every chart spec to this JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Directory holding <handle>.json player files (overrides RIVALS_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON file overriding players, friends, relevant heroes and map types
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local UTC offset in hours for day-of-week bucketing (default: -8)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rivals_report=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(hours) = args.utc_offset {
        config.set_utc_offset_hours(hours)?;
    }

    display_info(&format!(
        "Loading match data from {}",
        config.data_dir.display()
    ));

    let mut cache = StoreCache::new();
    let pb = ProgressBar::new(config.players.len() as u64);
    pb.set_message("Loading player files");
    let data = load_all_players(&config, &mut cache, |_| pb.inc(1));
    pb.finish_and_clear();
    let data = data?;

    display_success(&format!(
        "Loaded {} of {} players",
        data.len(),
        config.players.len()
    ));
    display_info(&latest_update_label(latest_update(
        data.stores(),
        &config.utc_offset,
    )));

    let options = ReportOptions {
        only_friend_games: args.friends_only,
        friend_teammates_only: args.friend_teammates,
        modes: args.mode.modes(),
        latest: args.latest,
    };

    let selected = select_players(&config, &data, args.player.as_deref(), args.all_players)?;

    let mut reports = Vec::new();
    for loaded in selected {
        let report = build_player_report(&config, &loaded.entry.name, &loaded.matches, &options)
            .with_context(|| format!("Failed to build report for {}", loaded.entry.name))?;
        display_player_report(&report);
        reports.push(report);
    }

    if let Some(path) = args.export {
        write_chart_export(&path, &reports)
            .with_context(|| format!("Failed to write chart export to {}", path.display()))?;
        display_success(&format!("Chart specs written to {}", path.display()));
    }

    Ok(())
}

fn select_players<'a>(
    config: &Config,
    data: &'a PlayerData,
    query: Option<&str>,
    all: bool,
) -> Result<Vec<&'a LoadedPlayer>, AppError> {
    if all {
        return Ok(data.iter().collect());
    }

    let chosen = match query {
        Some(q) => {
            let name = config.find_player(q).map(|p| p.name.as_str()).unwrap_or(q);
            data.get(name)
                .ok_or_else(|| AppError::PlayerNotFound(format!("{} (available: {})", q, data.available().join(", "))))?
        }
        None => data.first().ok_or(AppError::NoPlayerData)?,
    };

    Ok(vec![chosen])
}

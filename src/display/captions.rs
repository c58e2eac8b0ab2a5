use crate::analysis::{MapBreakdown, MapGrouping, Mode, Ranking, Side};

fn per_game(mode: Mode) -> &'static str {
    match mode {
        Mode::Average => "average (per game)",
        Mode::Total => "total",
    }
}

pub fn hero_caption(mode: Mode, min_games: u32) -> String {
    let lead = match mode {
        Mode::Average => "the average (per game) elo plus/minus for each hero",
        Mode::Total => "the total elo plus/minus of each hero",
    };
    format!(
        "This next chart shows {} you've played in competitive play. Only heroes played in at least {} games are included.",
        lead, min_games
    )
}

/// Names the best teammate hero (first bar) or the worst opponent hero (last bar).
pub fn matchup_caption(ranking: &Ranking, hero: &str, side: Side, mode: Mode) -> Option<String> {
    let text = match side {
        Side::Teammates => {
            let (teammate, _) = ranking.first()?;
            format!(
                "This next chart shows the {} elo plus/minus based on what heroes played with you. For example, when you play {}, if your team has a {}, you perform relatively well.",
                per_game(mode),
                hero,
                teammate
            )
        }
        Side::Opponents => {
            let (opponent, _) = ranking.last()?;
            format!(
                "This next chart shows the {} elo plus/minus based on what heroes played against you. For example, when you play {}, if the opposing team has a {}, you perform relatively poorly.",
                per_game(mode),
                hero,
                opponent
            )
        }
    };
    Some(text)
}

pub fn map_caption(breakdown: &MapBreakdown, hero: &str, grouping: MapGrouping, mode: Mode) -> Option<String> {
    let (best, _) = breakdown.best(mode)?;
    let subject = match grouping {
        MapGrouping::Map => "map",
        MapGrouping::MapType => "map type",
    };
    Some(format!(
        "This next chart shows the {} elo plus/minus for each {} you've played in competitive play. For example, if you play {} on {}, you perform relatively well.",
        per_game(mode),
        subject,
        hero,
        best
    ))
}

pub fn weekday_caption(mode: Mode) -> String {
    format!(
        "This next chart shows your {} elo plus/minus for each day of the week.",
        per_game(mode)
    )
}

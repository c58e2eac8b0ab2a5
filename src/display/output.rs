use super::chart::{BarColor, ChartSpec};
use crate::analysis::history::GameSummary;
use crate::error::AppResult;
use crate::report::{PlayerReport, Section};
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "#")]
    rank: String,
    category: String,
    value: String,
    bar: String,
}

#[derive(Tabled)]
struct GameRow {
    #[tabled(rename = "Played (local)")]
    played: String,
    map: String,
    result: String,
    heroes: String,
    delta: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message.yellow());
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:+}", value as i64)
    } else {
        format!("{:+.2}", value)
    }
}

fn render_bar(value: f64, max: f64, color: BarColor) -> String {
    let len = if max > 0.0 {
        ((value.abs() / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    let bar = "█".repeat(len.max(if value != 0.0 { 1 } else { 0 }));
    match color {
        BarColor::Positive => bar.blue().to_string(),
        BarColor::Negative => bar.red().to_string(),
    }
}

pub fn display_chart(chart: &ChartSpec) {
    println!("\n{}", chart.title.bold());

    let max = chart.max_magnitude();
    let rows: Vec<BarRow> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(idx, bar)| BarRow {
            rank: format!("{}", idx + 1),
            category: bar.label.clone(),
            value: format_value(bar.value),
            bar: render_bar(bar.value, max, bar.color),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!(
        "{}",
        format!("x: {} · y: {}", chart.x_label, chart.y_label).dimmed()
    );
}

fn display_section(section: &Section, level: usize) {
    let marker = "#".repeat(level);
    println!("\n{} {}", marker.cyan(), section.heading.bold().cyan());

    match &section.chart {
        Some(chart) => {
            if let Some(caption) = &section.caption {
                println!("{}", caption);
            }
            display_chart(chart);
        }
        None => display_info(&section.empty_message),
    }
}

pub fn display_player_report(report: &PlayerReport<'_>) {
    println!(
        "\n{}",
        format!("🎮 Player: {}", report.player).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let games = if report.filter_applied {
        format!(
            "{} / {} (Filter applied)",
            report.filtered_games, report.total_games
        )
    } else {
        format!("{} (No filter)", report.total_games)
    };
    println!("{} {}", "📈 Total Games Analyzed:".bold(), games);

    if report.filtered_games == 0 {
        display_warning("No games match the current filter settings.");
        return;
    }

    let summary = &report.summary;
    println!(
        "{} {} W / {} L ({:.1}% WR), net {}",
        "📊 Record:".bold(),
        summary.wins.to_string().green(),
        summary.losses.to_string().red(),
        summary.win_rate() * 100.0,
        format_value(summary.net_delta as f64)
    );

    for mode_report in &report.modes {
        println!(
            "\n{}",
            format!("━━ {}s ━━", mode_report.mode.label()).bold().yellow()
        );
        display_section(&mode_report.heroes_overview, 2);

        if mode_report.heroes.is_empty() {
            display_warning("No relevant characters found for matchup analysis with current filters.");
        }
        for hero in &mode_report.heroes {
            println!(
                "\n{}",
                format!("Matchups When Playing: {}", hero.hero).bold().magenta()
            );
            for section in hero.sections() {
                display_section(section, 4);
            }
            println!("{}", "-".repeat(60).dimmed());
        }

        display_section(&mode_report.weekday, 2);
    }

    display_latest_games(&report.latest, &report.player);
}

pub fn display_latest_games(games: &[GameSummary<'_>], player: &str) {
    if games.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("🕒 LATEST GAMES (Last {})", games.len()).bold().cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    let rows: Vec<GameRow> = games
        .iter()
        .map(|game| {
            let record = game.record_for(player);
            GameRow {
                played: game.local_time_label(),
                map: game.map.to_string(),
                result: if game.is_win {
                    "WIN".green().to_string()
                } else {
                    "LOSS".red().to_string()
                },
                heroes: record.map(|r| r.heroes.join(", ")).unwrap_or_default(),
                delta: record
                    .map(|r| format_value(r.rank_delta as f64))
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

#[derive(Serialize)]
struct ChartExport<'a> {
    reports: &'a [PlayerReport<'a>],
}

/// Writes every report's sections, chart specs included, as pretty JSON.
pub fn write_chart_export(path: &Path, reports: &[PlayerReport<'_>]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(&ChartExport { reports })?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_signs() {
        assert_eq!(format_value(8.0), "+8");
        assert_eq!(format_value(-2.5), "-2.50");
        assert_eq!(format_value(0.0), "+0");
    }

    #[test]
    fn test_bar_scales_to_max() {
        colored::control::set_override(false);
        assert_eq!(render_bar(10.0, 10.0, BarColor::Positive).chars().count(), BAR_WIDTH);
        assert_eq!(render_bar(-5.0, 10.0, BarColor::Negative).chars().count(), BAR_WIDTH / 2);
        assert_eq!(render_bar(0.01, 10.0, BarColor::Positive).chars().count(), 1);
        assert_eq!(render_bar(0.0, 0.0, BarColor::Positive), "");
    }
}

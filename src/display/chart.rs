//! Bar chart specifications.
//!
//! A `ChartSpec` is the hand-off to whatever renders it: the terminal
//! renderer in `output`, or an external plotting tool via the JSON export.

use crate::analysis::{MapBreakdown, MapGrouping, Mode, Ranking, Side};
use serde::Serialize;

const AVERAGE_AXIS: &str = "Average Rank Delta per Game";
const TOTAL_AXIS: &str = "Total Cumulative Rank Delta";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Positive,
    Negative,
}

impl BarColor {
    pub fn for_value(value: f64) -> Self {
        if value >= 0.0 {
            BarColor::Positive
        } else {
            BarColor::Negative
        }
    }

    pub fn css(&self) -> &'static str {
        match self {
            BarColor::Positive => "blue",
            BarColor::Negative => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: BarColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl ChartSpec {
    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn max_magnitude(&self) -> f64 {
        self.bars.iter().map(|b| b.value.abs()).fold(0.0, f64::max)
    }
}

fn y_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Average => AVERAGE_AXIS,
        Mode::Total => TOTAL_AXIS,
    }
}

/// Bars sorted by value, highest first. `None` when there is nothing to plot.
pub fn bar_chart(ranking: &Ranking, title: String, x_label: &str, y_label: &str) -> Option<ChartSpec> {
    if ranking.is_empty() {
        return None;
    }

    let sorted = Ranking::sorted(ranking.iter().map(|(k, v)| (k.to_string(), v)).collect());
    let bars = sorted
        .iter()
        .map(|(label, value)| Bar {
            label: label.to_string(),
            value,
            color: BarColor::for_value(value),
        })
        .collect();

    Some(ChartSpec {
        title,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        bars,
    })
}

pub fn hero_chart(ranking: &Ranking, player: &str, mode: Mode) -> Option<ChartSpec> {
    let title = match mode {
        Mode::Average => format!("Average Hero Performance for {} (+/- per Game)", player),
        Mode::Total => format!("Total Hero Performance for {} (Cumulative +/-)", player),
    };
    bar_chart(ranking, title, "Hero", y_label(mode))
}

pub fn matchup_chart(ranking: &Ranking, hero: &str, side: Side, mode: Mode) -> Option<ChartSpec> {
    let (x_label, relation) = match side {
        Side::Teammates => ("Teammate Hero", "With Teammate"),
        Side::Opponents => ("Opponent Hero", "Against Opponent"),
    };
    let title = match mode {
        Mode::Average => format!("Average Rank Delta {} (When Playing {})", relation, hero),
        Mode::Total => format!("Total Cumulative Rank Delta {} (When Playing {})", relation, hero),
    };
    bar_chart(ranking, title, x_label, y_label(mode))
}

pub fn map_chart(breakdown: &MapBreakdown, hero: &str, grouping: MapGrouping, mode: Mode) -> Option<ChartSpec> {
    let title = match mode {
        Mode::Average => format!(
            "Average {} Performance for {} (Avg +/- per Game)",
            grouping.label(),
            hero
        ),
        Mode::Total => format!(
            "Total {} Performance for {} (Cumulative +/-)",
            grouping.label(),
            hero
        ),
    };
    bar_chart(&breakdown.ranking(mode), title, grouping.label(), y_label(mode))
}

/// Also `None` when every day is exactly zero.
pub fn weekday_chart(ranking: &Ranking, player: &str, mode: Mode) -> Option<ChartSpec> {
    if ranking.values().all(|v| v == 0.0) {
        return None;
    }
    let suffix = match mode {
        Mode::Average => "Average (+/- per Game)",
        Mode::Total => "Total (Cumulative +/-)",
    };
    let title = format!("Performance by Day of Week for {} - {}", player, suffix);
    bar_chart(ranking, title, "Day of the Week", y_label(mode))
}

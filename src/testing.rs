//! Testing helpers.

use assert_float_eq::*;
use strum::IntoEnumIterator;

use crate::domain::{
    Average, AverageField, MatchStatRow, Percentage, PercentageField, Schema, StatTable, StatValue,
};

/// A row with every statistic populated from `seed`, as raw ratios and averages.
pub fn stat_row(
    home_team: &str,
    away_team: &str,
    league: &str,
    total_games: u32,
    seed: f64,
) -> MatchStatRow {
    let mut row = MatchStatRow::new(home_team, away_team, league, total_games);
    for (index, field) in PercentageField::iter().enumerate() {
        let ratio = (seed + index as f64 * 0.037) % 1.0;
        row.set_percentage(field, Some(Percentage::Ratio(ratio)));
    }
    for (index, field) in AverageField::iter().enumerate() {
        row.set_average(field, Some(Average::Raw(seed * 3.0 + index as f64 * 0.125)));
    }
    row
}

pub fn sample_rows() -> Vec<MatchStatRow> {
    vec![
        stat_row("Liverpool", "Everton", "Premiership", 24, 0.612),
        stat_row("Arsenal", "Chelsea", "Premiership", 18, 0.4375),
        stat_row("Leeds", "Hull", "Championship", 9, 0.281),
        stat_row("Chelsea", "Arsenal", "Premiership", 17, 0.5),
        stat_row("Arsenal", "Tottenham", "Premiership", 22, 0.3333),
        stat_row("Burnley", "Arsenal", "Premiership", 6, 0.75),
    ]
}

pub fn full_table(rows: Vec<MatchStatRow>) -> StatTable {
    StatTable::new(Schema::full(), rows).unwrap()
}

pub fn pairs<R: AsRef<MatchStatRow>>(rows: &[R]) -> Vec<(&str, &str)> {
    rows.iter()
        .map(AsRef::as_ref)
        .map(|row| (row.home_team.as_str(), row.away_team.as_str()))
        .collect()
}

pub fn assert_stat_near(expected: f64, actual: Option<StatValue>) {
    let actual = actual.unwrap_or_else(|| panic!("expected {expected}, got no value"));
    assert_float_absolute_eq!(expected, actual.numeric(), 1e-9);
}

//! Console tables for statistics views, ranked pairings and stake recommendations.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::{Column, MatchStatRow, PairStat, Schema, StatField};
use crate::stake::StakeRecommendation;
use crate::table_io::cell_text;

fn column_style(column: &Column) -> Styles {
    match column {
        Column::HomeTeam | Column::AwayTeam | Column::League => {
            Styles::default().with(MinWidth(12)).with(Left)
        }
        _ => Styles::default().with(MinWidth(8)).with(HAlign::Right),
    }
}

/// Tabulates `rows` over the columns of `schema`, leaving out those in `omit`.
pub fn tabulate_rows<R: AsRef<MatchStatRow>>(
    schema: &Schema,
    rows: &[R],
    omit: &[Column],
) -> Table {
    let columns: Vec<_> = schema
        .columns()
        .iter()
        .filter(|column| !omit.contains(column))
        .collect();
    let mut table = Table::default()
        .with_cols(columns.iter().map(|column| Col::new(column_style(column))).collect())
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            columns.iter().map(|column| column.to_string().into()).collect(),
        ));
    for row in rows {
        let row = row.as_ref();
        table.push_row(Row::new(
            Styles::default(),
            columns.iter().map(|column| cell_text(row, column).into()).collect(),
        ));
    }
    table
}

pub fn tabulate_pair_stats(field: &StatField, rows: &[PairStat]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                Column::HomeTeam.to_string().into(),
                Column::AwayTeam.to_string().into(),
                field.to_string().into(),
            ],
        ));
    for row in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                row.home_team.clone().into(),
                row.away_team.clone().into(),
                row.value.map(|value| value.to_string()).unwrap_or_default().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_stake(
    bankroll: f64,
    decimal_odds: f64,
    win_probability_percent: f64,
    rec: &StakeRecommendation,
) -> Table {
    let rows = [
        ("Bankroll", format!("{bankroll:.2}")),
        ("Decimal odds", format!("{decimal_odds:.3}")),
        ("Win probability", format!("{win_probability_percent:.2}%")),
        ("Fraction", format!("{:.2}%", rec.fraction * 100.0)),
        ("Stake", format!("{:.2}", rec.stake)),
    ];
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(16)).with(Left).with(Separator(true))),
        Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
    ]);
    for (label, value) in rows {
        table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
    }
    table
}

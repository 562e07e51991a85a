use super::*;
use crate::catalog::{Country, LeagueCatalog};
use crate::domain::{
    Average, AverageField, Column, FixtureRow, MatchStatRow, Percentage, PercentageField, StatValue,
};
use crate::format::format_all;
use crate::merge::merge;
use crate::testing::{assert_stat_near, full_table, pairs, sample_rows};

fn pair_names(stats: &[PairStat]) -> Vec<(&str, &str)> {
    stats
        .iter()
        .map(|stat| (stat.home_team.as_str(), stat.away_team.as_str()))
        .collect()
}

fn england() -> LeagueCatalog {
    LeagueCatalog::new(vec![Country {
        name: "England".into(),
        leagues: vec![],
        table: full_table(sample_rows()),
    }])
}

#[test]
fn small_samples_are_excluded() {
    let rows = vec![
        MatchStatRow::new("A", "B", "League", 10)
            .with_percentage(PercentageField::HomeWin, Percentage::Ratio(0.5)),
        MatchStatRow::new("C", "D", "League", 5),
    ];
    let schema = Schema::full();
    let top = top_n(&schema, &rows, DEFAULT_MIN_GAMES, "Home Win %", DEFAULT_TOP_N).unwrap();
    assert_eq!(vec![("A", "B")], pair_names(&top));
    assert_eq!(
        Some(StatValue::Percentage(Percentage::Ratio(0.5))),
        top[0].value
    );
}

#[test]
fn sorted_descending_by_total_games() {
    let table = full_table(sample_rows());
    let top = top_n(table.schema(), table.rows(), 10, "Total Games", 3).unwrap();
    assert_eq!(
        vec![("Liverpool", "Everton"), ("Arsenal", "Tottenham"), ("Arsenal", "Chelsea")],
        pair_names(&top)
    );
    assert_eq!(Some(StatValue::Count(24)), top[0].value);
}

#[test]
fn fewer_qualifying_than_requested() {
    let table = format_all(&full_table(sample_rows()));
    let top = top_n(table.schema(), table.rows(), 10, "BTTS %", 10).unwrap();
    assert_eq!(
        vec![
            ("Liverpool", "Everton"),
            ("Chelsea", "Arsenal"),
            ("Arsenal", "Chelsea"),
            ("Arsenal", "Tottenham"),
        ],
        pair_names(&top)
    );
    assert_stat_near(72.3, top[0].value);
}

#[test]
fn ranking_properties_hold_for_every_field() {
    let table = full_table(sample_rows());
    for min_games in [0, 10, 20, 30] {
        let qualifying = table.rows().iter().filter(|row| row.total_games >= min_games).count();
        for field in StatField::iter() {
            for n in [0, 1, 3, 10] {
                let top = rank(table.rows(), min_games, &field, n);
                assert_eq!(n.min(qualifying), top.len());
                let values: Vec<_> = top.iter().map(|stat| stat.value.unwrap().numeric()).collect();
                assert!(values.windows(2).all(|pair| pair[0] >= pair[1]), "{field}: {values:?}");
                for stat in &top {
                    let row = table
                        .rows()
                        .iter()
                        .find(|row| row.is_pair(&stat.home_team, &stat.away_team))
                        .unwrap();
                    assert!(row.total_games >= min_games);
                }
            }
        }
    }
}

#[test]
fn percentages_compare_numerically() {
    let rows: Vec<_> = [("A", 9.0), ("B", 100.0), ("C", 10.0)]
        .into_iter()
        .map(|(home, percent)| {
            MatchStatRow::new(home, "Z", "League", 12)
                .with_percentage(PercentageField::Over2_5, Percentage::Formatted(percent))
        })
        .collect();
    let top = rank(&rows, 10, &StatField::Percentage(PercentageField::Over2_5), 5);
    assert_eq!(vec![("B", "Z"), ("C", "Z"), ("A", "Z")], pair_names(&top));
}

#[test]
fn ties_keep_input_order_and_missing_values_sort_last() {
    let field = AverageField::GoalsForHome;
    let rows = vec![
        MatchStatRow::new("A", "Z", "League", 12),
        MatchStatRow::new("B", "Z", "League", 12).with_average(field, Average::Formatted(1.5)),
        MatchStatRow::new("C", "Z", "League", 12).with_average(field, Average::Raw(2.25)),
        MatchStatRow::new("D", "Z", "League", 12).with_average(field, Average::Formatted(1.5)),
    ];
    let top = rank(&rows, 0, &StatField::Average(field), 4);
    assert_eq!(vec![("C", "Z"), ("B", "Z"), ("D", "Z"), ("A", "Z")], pair_names(&top));
    assert_eq!(None, top[3].value);
}

#[test]
fn unknown_or_absent_field_is_invalid() {
    let table = full_table(sample_rows());
    assert_eq!(
        InvalidField("Corners".into()),
        top_n(table.schema(), table.rows(), 10, "Corners", 5).unwrap_err()
    );
    assert_eq!(
        InvalidField("Home Team".into()),
        top_n(table.schema(), table.rows(), 10, "Home Team", 5).unwrap_err()
    );
    let narrow = Schema::new(Column::REQUIRED);
    assert!(top_n(&narrow, table.rows(), 10, "Draw %", 5).is_err());
}

#[test]
fn empty_join_ranks_to_nothing() {
    let catalog = england();
    let merged = merge(&[FixtureRow::new("Ajax", "PSV")], &catalog);
    assert!(merged.is_empty());
    assert_eq!(
        Ok(vec![]),
        top_n(&merged.schema, &merged.rows, 10, "BTTS %", 5)
    );
    assert_eq!(
        InvalidField("Corners".into()),
        top_n(&merged.schema, &merged.rows, 10, "Corners", 5).unwrap_err()
    );
}

#[test]
fn ranks_merged_rows() {
    let catalog = england();
    let fixtures = vec![
        FixtureRow::new("Burnley", "Arsenal"),
        FixtureRow::new("Arsenal", "Chelsea"),
        FixtureRow::new("Liverpool", "Everton"),
    ];
    let merged = merge(&fixtures, &catalog);
    assert_eq!(3, pairs(&merged.rows).len());
    let top = top_n(&merged.schema, &merged.rows, 10, "Total Games", 5).unwrap();
    assert_eq!(vec![("Liverpool", "Everton"), ("Arsenal", "Chelsea")], pair_names(&top));
}

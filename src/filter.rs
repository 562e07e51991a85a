//! League and team views over a statistics table.

use std::collections::BTreeSet;

use crate::domain::{MatchStatRow, PairStat, Schema, StatField, StatTable};
use crate::error::InvalidField;

/// Rows of `league`, ordered by home team. Rows sharing a home team keep their table
/// order.
pub fn by_league(table: &StatTable, league: &str) -> StatTable {
    let mut rows: Vec<_> = table
        .rows()
        .iter()
        .filter(|row| row.league == league)
        .cloned()
        .collect();
    rows.sort_by(|a, b| a.home_team.cmp(&b.home_team));
    table.with_rows(rows)
}

/// Home fixtures of `team` ordered by opponent, followed by its away fixtures ordered by
/// opponent. An unknown team yields an empty table.
pub fn by_team(table: &StatTable, team: &str) -> StatTable {
    let mut home: Vec<_> = table
        .rows()
        .iter()
        .filter(|row| row.home_team == team)
        .cloned()
        .collect();
    home.sort_by(|a, b| a.away_team.cmp(&b.away_team));

    let mut away: Vec<_> = table
        .rows()
        .iter()
        .filter(|row| row.away_team == team)
        .cloned()
        .collect();
    away.sort_by(|a, b| a.home_team.cmp(&b.home_team));

    home.append(&mut away);
    table.with_rows(home)
}

/// Every team named in `table`, home or away, sorted and without repeats.
pub fn teams(table: &StatTable) -> Vec<String> {
    let names: BTreeSet<_> = table
        .rows()
        .iter()
        .flat_map(|row| [row.home_team.as_str(), row.away_team.as_str()])
        .collect();
    names.into_iter().map(ToString::to_string).collect()
}

/// The first `n` rows.
pub fn head(table: &StatTable, n: usize) -> StatTable {
    table.with_rows(table.rows().iter().take(n).cloned().collect())
}

/// Projects one named statistic out of every row.
pub fn stat_column<R: AsRef<MatchStatRow>>(
    schema: &Schema,
    rows: &[R],
    name: &str,
) -> Result<Vec<PairStat>, InvalidField> {
    let field = StatField::resolve(schema, name)?;
    Ok(rows
        .iter()
        .map(|row| PairStat::of(row.as_ref(), &field))
        .collect())
}

/// The statistics `schema` can be ranked or projected by, in display order.
pub fn rankable_fields(schema: &Schema) -> Vec<StatField> {
    StatField::iter()
        .filter(|field| schema.contains(&field.column()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, PercentageField, StatValue};
    use crate::testing::{full_table, pairs, sample_rows, stat_row};

    #[test]
    fn by_league_sorts_by_home_team() {
        let view = by_league(&full_table(sample_rows()), "Premiership");
        assert_eq!(
            vec![
                ("Arsenal", "Chelsea"),
                ("Arsenal", "Tottenham"),
                ("Burnley", "Arsenal"),
                ("Chelsea", "Arsenal"),
                ("Liverpool", "Everton"),
            ],
            pairs(view.rows())
        );
    }

    #[test]
    fn by_league_is_stable() {
        let rows = vec![
            stat_row("Arsenal", "Wolves", "Premiership", 5, 0.1),
            stat_row("Arsenal", "Brentford", "Premiership", 5, 0.2),
        ];
        let view = by_league(&full_table(rows), "Premiership");
        assert_eq!(vec![("Arsenal", "Wolves"), ("Arsenal", "Brentford")], pairs(view.rows()));
    }

    #[test]
    fn by_league_unknown_is_empty() {
        assert!(by_league(&full_table(sample_rows()), "La Liga").is_empty());
    }

    #[test]
    fn by_team_lists_home_then_away() {
        let view = by_team(&full_table(sample_rows()), "Arsenal");
        assert_eq!(
            vec![
                ("Arsenal", "Chelsea"),
                ("Arsenal", "Tottenham"),
                ("Burnley", "Arsenal"),
                ("Chelsea", "Arsenal"),
            ],
            pairs(view.rows())
        );
    }

    #[test]
    fn by_team_unknown_is_empty() {
        let view = by_team(&full_table(sample_rows()), "Real Madrid");
        assert!(view.is_empty());
        assert_eq!(&Schema::full(), view.schema());
    }

    #[test]
    fn by_team_keeps_source_intact() {
        let table = full_table(sample_rows());
        let before = table.clone();
        let mut view = by_team(&table, "Arsenal").into_rows();
        view[0].home_team = "Gunners".into();
        assert_eq!(before, table);
    }

    #[test]
    fn teams_are_sorted_and_unique() {
        assert_eq!(
            vec![
                "Arsenal",
                "Burnley",
                "Chelsea",
                "Everton",
                "Hull",
                "Leeds",
                "Liverpool",
                "Tottenham",
            ],
            teams(&full_table(sample_rows()))
        );
    }

    #[test]
    fn head_limits_rows() {
        let table = full_table(sample_rows());
        assert_eq!(2, head(&table, 2).len());
        assert_eq!(6, head(&table, 10).len());
    }

    #[test]
    fn stat_column_projects_values() {
        let table = full_table(sample_rows());
        let column = stat_column(table.schema(), table.rows(), "Total Games").unwrap();
        assert_eq!(6, column.len());
        assert_eq!(Some(StatValue::Count(24)), column[0].value);
        assert_eq!("Liverpool", column[0].home_team);
    }

    #[test]
    fn stat_column_rejects_unknown_and_absent() {
        let table = full_table(sample_rows());
        assert_eq!(
            InvalidField("Corners".into()),
            stat_column(table.schema(), table.rows(), "Corners").unwrap_err()
        );
        let narrow = StatTable::new(Schema::required(), vec![]).unwrap();
        assert!(stat_column(narrow.schema(), narrow.rows(), "BTTS %").is_err());
    }

    #[test]
    fn rankable_fields_follow_schema() {
        assert_eq!(16, rankable_fields(&Schema::full()).len());
        let over = Column::Percentage(PercentageField::Over2_5);
        let schema = Schema::new(Column::REQUIRED.into_iter().chain([over]));
        assert_eq!(
            vec![StatField::TotalGames, StatField::Percentage(PercentageField::Over2_5)],
            rankable_fields(&schema)
        );
    }
}

//! Leaderboards of fixture pairings by a single statistic.

use std::cmp::Ordering;

use crate::domain::{MatchStatRow, PairStat, Schema, StatField};
use crate::error::InvalidField;

/// Smallest head-to-head sample a pairing needs to be ranked.
pub const DEFAULT_MIN_GAMES: u32 = 10;

pub const DEFAULT_TOP_N: usize = 5;

/// The `n` pairings with the highest value of the statistic named `stat_field`, among rows
/// with at least `min_games` games.
pub fn top_n<R: AsRef<MatchStatRow>>(
    schema: &Schema,
    rows: &[R],
    min_games: u32,
    stat_field: &str,
    n: usize,
) -> Result<Vec<PairStat>, InvalidField> {
    let field = StatField::resolve(schema, stat_field)?;
    Ok(rank(rows, min_games, &field, n))
}

/// Ranks `rows` by `field` in descending order. Rows with equal values keep their input
/// order and rows without a value come last.
pub fn rank<R: AsRef<MatchStatRow>>(
    rows: &[R],
    min_games: u32,
    field: &StatField,
    n: usize,
) -> Vec<PairStat> {
    let mut qualifying: Vec<_> = rows
        .iter()
        .map(AsRef::as_ref)
        .filter(|row| row.total_games >= min_games)
        .map(|row| PairStat::of(row, field))
        .collect();
    qualifying.sort_by(|a, b| descending(a, b));
    qualifying.truncate(n);
    qualifying
}

fn descending(a: &PairStat, b: &PairStat) -> Ordering {
    match (&a.value, &b.value) {
        (Some(a), Some(b)) => b.numeric().total_cmp(&a.numeric()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests;

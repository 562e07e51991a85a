//! Joins a fixture feed with every table in the catalog.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::catalog::LeagueCatalog;
use crate::domain::{FixtureRow, MatchStatRow, MergedMatchRow, MergedTable, Schema, StatTable};
use crate::format::format_all;

/// Inner-joins `fixtures` with each formatted country table on home and away team, then
/// orders the result by league, home team and away team.
///
/// Fixtures without statistics are dropped. A fixture repeated in the feed, or a pairing
/// present in several tables, yields one row per match. The merged schema carries every
/// column of every catalog table, whether or not any of its rows joined.
pub fn merge(fixtures: &[FixtureRow], catalog: &LeagueCatalog) -> MergedTable {
    let mut schema = Schema::required();
    let mut rows = vec![];
    for country in catalog.countries() {
        let table = format_all(&country.table);
        let joined = join(fixtures, &table, &country.name);
        debug!(
            "{}: {} rows joined from {} fixtures",
            country.name,
            joined.len(),
            fixtures.len()
        );
        schema = schema.union(table.schema());
        rows.extend(joined);
    }

    rows.sort_by(|a: &MergedMatchRow, b: &MergedMatchRow| {
        let (a, b) = (&a.stats, &b.stats);
        a.league
            .cmp(&b.league)
            .then_with(|| a.home_team.cmp(&b.home_team))
            .then_with(|| a.away_team.cmp(&b.away_team))
    });
    MergedTable { schema, rows }
}

fn join(fixtures: &[FixtureRow], table: &StatTable, country: &str) -> Vec<MergedMatchRow> {
    let mut index: FxHashMap<(&str, &str), Vec<&MatchStatRow>> = FxHashMap::default();
    for row in table.rows() {
        index
            .entry((row.home_team.as_str(), row.away_team.as_str()))
            .or_default()
            .push(row);
    }

    let mut joined = vec![];
    for fixture in fixtures {
        let key = (fixture.home_team.as_str(), fixture.away_team.as_str());
        if let Some(matches) = index.get(&key) {
            joined.extend(matches.iter().map(|&stats| MergedMatchRow {
                country: country.to_string(),
                stats: stats.clone(),
            }));
        }
    }
    joined
}

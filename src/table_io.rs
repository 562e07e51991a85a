//! Statistics tables, fixture feeds and ranked views in CSV form.
//!
//! Written tables start with a header of column names in schema order. Formatted tables
//! read back into the identical formatted representation.

use std::io;
use std::io::{Read, Write};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::csv::{CsvReader, CsvWriter};
use crate::domain::{
    Average, Column, FixtureRow, MatchStatRow, MergedTable, PairStat, Percentage, Schema,
    StatField, StatTable,
};
use crate::error::{BttsError, MalformedCell};

/// Reads a statistics table. Unknown columns are ignored; blank statistic cells are
/// read as absent values.
pub fn read_stat_table(reader: impl Read) -> Result<StatTable, BttsError> {
    let mut records = CsvReader::new(reader);
    let layout = match records.next().transpose()? {
        None => vec![],
        Some(header) => parse_header(&header.fields),
    };
    let schema = Schema::new(layout.iter().flatten().copied());
    schema.require(&Column::REQUIRED)?;

    let mut rows = vec![];
    for record in records {
        let record = record?;
        if is_blank(&record.fields) {
            continue;
        }
        rows.push(parse_stat_row(&layout, &record.fields, record.line)?);
    }
    Ok(StatTable::new(schema, rows)?)
}

/// Reads a fixture feed. Only the `Home Team` and `Away Team` columns are used.
pub fn read_fixtures(reader: impl Read) -> Result<Vec<FixtureRow>, BttsError> {
    let mut records = CsvReader::new(reader);
    let layout = match records.next().transpose()? {
        None => vec![],
        Some(header) => parse_header(&header.fields),
    };
    Schema::new(layout.iter().flatten().copied()).require(&Column::JOIN_KEYS)?;
    let position = |wanted: Column| {
        layout
            .iter()
            .position(|column| *column == Some(wanted))
            .unwrap_or_default()
    };
    let (home_position, away_position) = (position(Column::HomeTeam), position(Column::AwayTeam));

    let mut fixtures = vec![];
    for record in records {
        let record = record?;
        if is_blank(&record.fields) {
            continue;
        }
        let (fields, line) = (&record.fields, record.line);
        let home_team = required_text(cell(fields, home_position), &Column::HomeTeam, line)?;
        let away_team = required_text(cell(fields, away_position), &Column::AwayTeam, line)?;
        fixtures.push(FixtureRow { home_team, away_team });
    }
    debug!("read {} fixtures", fixtures.len());
    Ok(fixtures)
}

/// Maps each header position to its column. Unknown and repeated columns map to `None`.
/// A leading byte order mark is ignored.
fn parse_header(header: &[String]) -> Vec<Option<Column>> {
    let mut layout: Vec<Option<Column>> = Vec::with_capacity(header.len());
    for (position, name) in header.iter().enumerate() {
        let name = if position == 0 {
            name.trim_start_matches('\u{feff}')
        } else {
            name.as_str()
        };
        match Column::from_str(name) {
            Ok(column) if layout.contains(&Some(column)) => {
                warn!("ignoring repeated column '{column}'");
                layout.push(None);
            }
            Ok(column) => layout.push(Some(column)),
            Err(_) => {
                debug!("ignoring unknown column '{}'", name.trim());
                layout.push(None);
            }
        }
    }
    layout
}

fn is_blank(record: &[String]) -> bool {
    record.iter().all(|datum| datum.trim().is_empty())
}

fn cell(record: &[String], position: usize) -> &str {
    record.get(position).map(|datum| datum.trim()).unwrap_or("")
}

fn malformed(text: &str, column: &Column, line: usize) -> MalformedCell {
    MalformedCell {
        line,
        column: column.to_string(),
        value: text.to_string(),
    }
}

fn required_text(text: &str, column: &Column, line: usize) -> Result<String, MalformedCell> {
    if text.is_empty() {
        Err(malformed(text, column, line))
    } else {
        Ok(text.to_string())
    }
}

fn parse_cell<T: FromStr>(text: &str, column: &Column, line: usize) -> Result<T, MalformedCell> {
    text.parse().map_err(|_| malformed(text, column, line))
}

fn parse_stat_row(
    layout: &[Option<Column>],
    record: &[String],
    line: usize,
) -> Result<MatchStatRow, MalformedCell> {
    let mut row = MatchStatRow::new("", "", "", 0);
    for (position, column) in layout.iter().enumerate() {
        let Some(column) = column else { continue };
        let text = cell(record, position);
        match column {
            Column::HomeTeam => row.home_team = required_text(text, column, line)?,
            Column::AwayTeam => row.away_team = required_text(text, column, line)?,
            Column::League => row.league = required_text(text, column, line)?,
            Column::TotalGames => row.total_games = parse_cell(text, column, line)?,
            Column::Percentage(field) => {
                if !text.is_empty() {
                    let value: Percentage = parse_cell(text, column, line)?;
                    if !value.percent().is_finite() {
                        return Err(malformed(text, column, line));
                    }
                    row.set_percentage(*field, Some(value));
                }
            }
            Column::Average(field) => {
                if !text.is_empty() {
                    let value: Average = parse_cell(text, column, line)?;
                    if !value.value().is_finite() {
                        return Err(malformed(text, column, line));
                    }
                    row.set_average(*field, Some(value));
                }
            }
        }
    }
    Ok(row)
}

/// Renders one cell of `row`. Absent statistics render as an empty string.
pub fn cell_text(row: &MatchStatRow, column: &Column) -> String {
    match column {
        Column::HomeTeam => row.home_team.clone(),
        Column::AwayTeam => row.away_team.clone(),
        Column::League => row.league.clone(),
        Column::TotalGames => row.total_games.to_string(),
        Column::Percentage(field) => row
            .percentage(*field)
            .map(|value| value.to_string())
            .unwrap_or_default(),
        Column::Average(field) => row
            .average(*field)
            .map(|value| value.to_string())
            .unwrap_or_default(),
    }
}

pub fn write_rows<R: AsRef<MatchStatRow>>(
    writer: impl Write,
    schema: &Schema,
    rows: &[R],
) -> Result<(), io::Error> {
    let mut csv = CsvWriter::new(writer);
    csv.append(schema.columns().iter().map(ToString::to_string))?;
    for row in rows {
        let row = row.as_ref();
        csv.append(schema.columns().iter().map(|column| cell_text(row, column)))?;
    }
    csv.flush()
}

pub fn write_stat_table(writer: impl Write, table: &StatTable) -> Result<(), io::Error> {
    write_rows(writer, table.schema(), table.rows())
}

pub fn write_merged(writer: impl Write, merged: &MergedTable) -> Result<(), io::Error> {
    write_rows(writer, &merged.schema, &merged.rows)
}

/// Writes `Home Team`, `Away Team` and the statistic's own column.
pub fn write_pair_stats(
    writer: impl Write,
    field: &StatField,
    rows: &[PairStat],
) -> Result<(), io::Error> {
    let mut csv = CsvWriter::new(writer);
    csv.append([Column::HomeTeam.to_string(), Column::AwayTeam.to_string(), field.to_string()])?;
    for row in rows {
        csv.append([
            row.home_team.clone(),
            row.away_team.clone(),
            row.value.map(|value| value.to_string()).unwrap_or_default(),
        ])?;
    }
    csv.flush()
}

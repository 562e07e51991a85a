//! Head-to-head statistics model: columns, cell values, rows and table schemas.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use ordinalizer::Ordinal;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

use crate::error::{InvalidField, SchemaMismatch};

pub const HOME_TEAM: &str = "Home Team";
pub const AWAY_TEAM: &str = "Away Team";
pub const LEAGUE: &str = "League";
pub const TOTAL_GAMES: &str = "Total Games";

pub const PERCENTAGE_FIELDS: usize = <PercentageField as strum::EnumCount>::COUNT;
pub const AVERAGE_FIELDS: usize = <AverageField as strum::EnumCount>::COUNT;

/// Percentage statistics, named by their column headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Ordinal, EnumCount, EnumIter, EnumString, Display)]
pub enum PercentageField {
    #[strum(serialize = "Home Win %")]
    HomeWin,
    #[strum(serialize = "Draw %")]
    Draw,
    #[strum(serialize = "Away Win %")]
    AwayWin,
    #[strum(serialize = "BTTS %")]
    Btts,
    #[strum(serialize = "BTTS Home Win %")]
    BttsHomeWin,
    #[strum(serialize = "BTTS Away Win %")]
    BttsAwayWin,
    #[strum(serialize = "BTTS Draw %")]
    BttsDraw,
    #[strum(serialize = "BTTS No Draw %")]
    BttsNoDraw,
    #[strum(serialize = "Over 0.5 Goals %")]
    Over0_5,
    #[strum(serialize = "Over 1.5 Goals %")]
    Over1_5,
    #[strum(serialize = "Over 2.5 Goals %")]
    Over2_5,
    #[strum(serialize = "Over 3.5 Goals %")]
    Over3_5,
    #[strum(serialize = "Over 4.5 Goals %")]
    Over4_5,
}

/// Average goals statistics, named by their column headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Ordinal, EnumCount, EnumIter, EnumString, Display)]
pub enum AverageField {
    #[strum(serialize = "Average Goals For Home")]
    GoalsForHome,
    #[strum(serialize = "Average Goals For Away")]
    GoalsForAway,
}

/// Every column a statistics table or fixture feed may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    HomeTeam,
    AwayTeam,
    League,
    TotalGames,
    Percentage(PercentageField),
    Average(AverageField),
}
impl Column {
    /// Columns every statistics table must carry.
    pub const REQUIRED: [Column; 4] = [
        Column::HomeTeam,
        Column::AwayTeam,
        Column::League,
        Column::TotalGames,
    ];

    /// Columns every fixture feed must carry.
    pub const JOIN_KEYS: [Column; 2] = [Column::HomeTeam, Column::AwayTeam];

    /// All known columns in canonical order.
    pub fn all() -> impl Iterator<Item = Column> {
        Self::REQUIRED
            .into_iter()
            .chain(PercentageField::iter().map(Column::Percentage))
            .chain(AverageField::iter().map(Column::Average))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::HomeTeam => write!(f, "{HOME_TEAM}"),
            Column::AwayTeam => write!(f, "{AWAY_TEAM}"),
            Column::League => write!(f, "{LEAGUE}"),
            Column::TotalGames => write!(f, "{TOTAL_GAMES}"),
            Column::Percentage(field) => write!(f, "{field}"),
            Column::Average(field) => write!(f, "{field}"),
        }
    }
}

impl FromStr for Column {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            HOME_TEAM => Ok(Column::HomeTeam),
            AWAY_TEAM => Ok(Column::AwayTeam),
            LEAGUE => Ok(Column::League),
            TOTAL_GAMES => Ok(Column::TotalGames),
            _ => PercentageField::from_str(s)
                .map(Column::Percentage)
                .or_else(|_| AverageField::from_str(s).map(Column::Average))
                .map_err(|_| InvalidField(s.to_string())),
        }
    }
}

/// A statistic that rows can be ranked or projected by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    TotalGames,
    Percentage(PercentageField),
    Average(AverageField),
}
impl StatField {
    /// Rankable statistics in display order: sample size, averages, then percentages.
    pub fn iter() -> impl Iterator<Item = StatField> {
        [StatField::TotalGames]
            .into_iter()
            .chain(AverageField::iter().map(StatField::Average))
            .chain(PercentageField::iter().map(StatField::Percentage))
    }

    pub fn column(&self) -> Column {
        match self {
            StatField::TotalGames => Column::TotalGames,
            StatField::Percentage(field) => Column::Percentage(*field),
            StatField::Average(field) => Column::Average(*field),
        }
    }

    /// Resolves a statistic by column name, requiring it to be present in `schema`.
    pub fn resolve(schema: &Schema, name: &str) -> Result<StatField, InvalidField> {
        let field = StatField::from_str(name)?;
        if schema.contains(&field.column()) {
            Ok(field)
        } else {
            Err(InvalidField(name.trim().to_string()))
        }
    }
}

impl TryFrom<Column> for StatField {
    type Error = InvalidField;

    fn try_from(column: Column) -> Result<Self, Self::Error> {
        match column {
            Column::TotalGames => Ok(StatField::TotalGames),
            Column::Percentage(field) => Ok(StatField::Percentage(field)),
            Column::Average(field) => Ok(StatField::Average(field)),
            other => Err(InvalidField(other.to_string())),
        }
    }
}

impl FromStr for StatField {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_str(s)?.try_into()
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// A percentage cell. Upstream sources supply either raw ratios or already-formatted
/// percentages; the variant records which.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    /// A ratio in `[0, 1]`.
    Ratio(f64),
    /// A percent-scale value, rendered as `"NN.NN%"`.
    Formatted(f64),
}
impl Percentage {
    /// The value on the percent scale, regardless of representation.
    pub fn percent(&self) -> f64 {
        match self {
            Percentage::Ratio(ratio) => ratio * 100.0,
            Percentage::Formatted(percent) => *percent,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Percentage::Formatted(_))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Ratio(ratio) => write!(f, "{ratio}"),
            Percentage::Formatted(percent) => write!(f, "{percent:.2}%"),
        }
    }
}

impl FromStr for Percentage {
    type Err = ParseFloatError;

    /// A trailing `%` marks a formatted percentage; anything else is a raw ratio.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_suffix('%') {
            Some(percent) => Ok(Percentage::Formatted(percent.trim_end().parse()?)),
            None => Ok(Percentage::Ratio(s.parse()?)),
        }
    }
}

/// An average goals cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    Raw(f64),
    /// Rendered with exactly two decimal places.
    Formatted(f64),
}
impl Average {
    pub fn value(&self) -> f64 {
        match self {
            Average::Raw(value) | Average::Formatted(value) => *value,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Average::Formatted(_))
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Raw(value) => write!(f, "{value}"),
            Average::Formatted(value) => write!(f, "{value:.2}"),
        }
    }
}

impl FromStr for Average {
    type Err = ParseFloatError;

    /// Text with exactly two decimal places reads back as [`Average::Formatted`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = s.parse()?;
        if has_decimal_places(s, 2) {
            Ok(Average::Formatted(value))
        } else {
            Ok(Average::Raw(value))
        }
    }
}

fn has_decimal_places(s: &str, places: usize) -> bool {
    s.split_once('.').map_or(false, |(_, fraction)| {
        fraction.len() == places && fraction.bytes().all(|b| b.is_ascii_digit())
    })
}

/// The value of a [`StatField`] in some row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Count(u32),
    Percentage(Percentage),
    Average(Average),
}
impl StatValue {
    /// Numeric view used for ordering. Percentages are on the percent scale.
    pub fn numeric(&self) -> f64 {
        match self {
            StatValue::Count(count) => *count as f64,
            StatValue::Percentage(percentage) => percentage.percent(),
            StatValue::Average(average) => average.value(),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(count) => write!(f, "{count}"),
            StatValue::Percentage(percentage) => write!(f, "{percentage}"),
            StatValue::Average(average) => write!(f, "{average}"),
        }
    }
}

/// Historical head-to-head aggregate for one home/away pairing in one league.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatRow {
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub total_games: u32,
    pub percentages: [Option<Percentage>; PERCENTAGE_FIELDS],
    pub averages: [Option<Average>; AVERAGE_FIELDS],
}
impl MatchStatRow {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        league: impl Into<String>,
        total_games: u32,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            league: league.into(),
            total_games,
            percentages: [None; PERCENTAGE_FIELDS],
            averages: [None; AVERAGE_FIELDS],
        }
    }

    pub fn with_percentage(mut self, field: PercentageField, value: Percentage) -> Self {
        self.set_percentage(field, Some(value));
        self
    }

    pub fn with_average(mut self, field: AverageField, value: Average) -> Self {
        self.set_average(field, Some(value));
        self
    }

    pub fn percentage(&self, field: PercentageField) -> Option<Percentage> {
        self.percentages[field.ordinal()]
    }

    pub fn set_percentage(&mut self, field: PercentageField, value: Option<Percentage>) {
        self.percentages[field.ordinal()] = value;
    }

    pub fn average(&self, field: AverageField) -> Option<Average> {
        self.averages[field.ordinal()]
    }

    pub fn set_average(&mut self, field: AverageField, value: Option<Average>) {
        self.averages[field.ordinal()] = value;
    }

    pub fn stat(&self, field: &StatField) -> Option<StatValue> {
        match field {
            StatField::TotalGames => Some(StatValue::Count(self.total_games)),
            StatField::Percentage(field) => self.percentage(*field).map(StatValue::Percentage),
            StatField::Average(field) => self.average(*field).map(StatValue::Average),
        }
    }

    pub fn is_pair(&self, home_team: &str, away_team: &str) -> bool {
        self.home_team == home_team && self.away_team == away_team
    }

    /// Clears any statistic whose column is absent from `schema`.
    fn retain_columns(&mut self, schema: &Schema) {
        for field in PercentageField::iter() {
            if !schema.contains(&Column::Percentage(field)) {
                self.set_percentage(field, None);
            }
        }
        for field in AverageField::iter() {
            if !schema.contains(&Column::Average(field)) {
                self.set_average(field, None);
            }
        }
    }
}

impl AsRef<MatchStatRow> for MatchStatRow {
    fn as_ref(&self) -> &MatchStatRow {
        self
    }
}

/// A scheduled match from the daily feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureRow {
    pub home_team: String,
    pub away_team: String,
}
impl FixtureRow {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
        }
    }
}

/// A fixture joined with its historical statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedMatchRow {
    /// Catalog country whose table supplied the statistics.
    pub country: String,
    pub stats: MatchStatRow,
}

impl AsRef<MatchStatRow> for MergedMatchRow {
    fn as_ref(&self) -> &MatchStatRow {
        &self.stats
    }
}

/// A single statistic reduced to its team pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct PairStat {
    pub home_team: String,
    pub away_team: String,
    pub value: Option<StatValue>,
}
impl PairStat {
    pub fn of(row: &MatchStatRow, field: &StatField) -> Self {
        Self {
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
            value: row.stat(field),
        }
    }
}

/// The ordered set of columns a table carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}
impl Schema {
    /// Builds a schema from `columns`, dropping repeats after their first occurrence.
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        let mut unique = vec![];
        for column in columns {
            if !unique.contains(&column) {
                unique.push(column);
            }
        }
        Self { columns: unique }
    }

    /// Every known column in canonical order.
    pub fn full() -> Self {
        Self::new(Column::all())
    }

    /// Only the columns every statistics table carries.
    pub fn required() -> Self {
        Self::new(Column::REQUIRED)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn contains(&self, column: &Column) -> bool {
        self.columns.contains(column)
    }

    pub fn percentages(&self) -> impl Iterator<Item = PercentageField> + '_ {
        self.columns.iter().filter_map(|column| match column {
            Column::Percentage(field) => Some(*field),
            _ => None,
        })
    }

    pub fn averages(&self) -> impl Iterator<Item = AverageField> + '_ {
        self.columns.iter().filter_map(|column| match column {
            Column::Average(field) => Some(*field),
            _ => None,
        })
    }

    /// Checks that every column in `required` is present.
    pub fn require(&self, required: &[Column]) -> Result<(), SchemaMismatch> {
        let missing: Vec<_> = required
            .iter()
            .filter(|column| !self.contains(column))
            .map(ToString::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaMismatch { missing })
        }
    }

    /// Columns of `self` followed by those of `other` not already present.
    pub fn union(&self, other: &Schema) -> Schema {
        Schema::new(self.columns.iter().chain(other.columns.iter()).copied())
    }
}

/// A statistics table: a validated schema and its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    schema: Schema,
    rows: Vec<MatchStatRow>,
}
impl StatTable {
    /// Statistics for columns outside `schema` are cleared from `rows`.
    pub fn new(schema: Schema, mut rows: Vec<MatchStatRow>) -> Result<Self, SchemaMismatch> {
        schema.require(&Column::REQUIRED)?;
        for row in &mut rows {
            row.retain_columns(&schema);
        }
        Ok(Self { schema, rows })
    }

    /// A table sharing this table's schema.
    pub(crate) fn with_rows(&self, rows: Vec<MatchStatRow>) -> Self {
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[MatchStatRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<MatchStatRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Today's fixtures joined with statistics from every catalog table.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    pub schema: Schema,
    pub rows: Vec<MergedMatchRow>,
}
impl MergedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

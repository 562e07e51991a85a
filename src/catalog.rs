//! Countries, their league order and their head-to-head statistics tables.
//!
//! A [`LeagueCatalog`] is built once and only read afterwards, so it may be shared
//! between threads without locking.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::StatTable;
use crate::error::BttsError;
use crate::file::{open_buffered, ReadJsonFile};
use crate::table_io::read_stat_table;

/// Where each country's table lives and the order its leagues are presented in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub countries: Vec<CountryConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryConfig {
    pub name: String,
    pub leagues: Vec<String>,
    /// Path of the statistics CSV, relative to the data directory unless absolute.
    pub file: PathBuf,
}
impl CountryConfig {
    fn new(name: &str, leagues: &[&str]) -> Self {
        Self {
            name: name.into(),
            leagues: leagues.iter().map(ToString::to_string).collect(),
            file: format!("{name}.csv").into(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            countries: vec![
                CountryConfig::new("Belgium", &["Belgian Pro League"]),
                CountryConfig::new(
                    "England",
                    &["Premiership", "Championship", "League One", "League Two"],
                ),
                CountryConfig::new("France", &["France Ligue One", "France Ligue Two"]),
                CountryConfig::new("Germany", &["German Bundesliga", "German Bundesliga Two"]),
                CountryConfig::new("Holland", &["Netherlands Ersdvisle"]),
                CountryConfig::new("Italy", &["Italy Serie A", "Italy Serie B"]),
                CountryConfig::new("Portugal", &["Portugal Primerira Liga"]),
                CountryConfig::new(
                    "Scotland",
                    &["Scottish Premiership", "Scottish Division One", "Scottish Division Two"],
                ),
                CountryConfig::new("Spain", &["La Liga", "Spanish Secunda"]),
                CountryConfig::new("Turkey", &["Turkey Super Lig"]),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub name: String,
    pub leagues: Vec<String>,
    pub table: StatTable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueCatalog {
    countries: Vec<Country>,
}
impl LeagueCatalog {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// Loads every country in `config`, resolving relative paths against `data_dir`.
    pub fn load(config: &CatalogConfig, data_dir: impl AsRef<Path>) -> Result<Self, BttsError> {
        let data_dir = data_dir.as_ref();
        let mut countries = Vec::with_capacity(config.countries.len());
        for country in &config.countries {
            let path = data_dir.join(&country.file);
            debug!("loading {} from {}", country.name, path.display());
            let table = read_stat_table(open_buffered(&path)?)?;
            audit(country, &table);
            info!("{}: loaded {} rows", country.name, table.len());
            countries.push(Country {
                name: country.name.clone(),
                leagues: country.leagues.clone(),
                table,
            });
        }
        Ok(Self::new(countries))
    }

    /// Loads the catalog described by the JSON file at `config`, or the default catalog
    /// when no file is given.
    pub fn load_from(config: Option<&Path>, data_dir: impl AsRef<Path>) -> Result<Self, BttsError> {
        let config = match config {
            Some(path) => CatalogConfig::read_json_file(path)?,
            None => CatalogConfig::default(),
        };
        Self::load(&config, data_dir)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Looks up a country by name, ignoring ASCII case.
    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|country| country.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn leagues(&self, country: &str) -> Option<&[String]> {
        self.country(country).map(|country| country.leagues.as_slice())
    }

    pub fn table(&self, country: &str) -> Option<&StatTable> {
        self.country(country).map(|country| &country.table)
    }
}

/// Warns about rows that break the catalog's expectations without rejecting the table.
fn audit(config: &CountryConfig, table: &StatTable) {
    let mut seen = FxHashSet::default();
    let mut unlisted = FxHashSet::default();
    for row in table.rows() {
        if !seen.insert((&row.league, &row.home_team, &row.away_team)) {
            warn!(
                "{}: repeated pairing {} v {} in {}",
                config.name, row.home_team, row.away_team, row.league
            );
        }
        if !config.leagues.contains(&row.league) && unlisted.insert(&row.league) {
            warn!("{}: league '{}' is not in the league order", config.name, row.league);
        }
    }
}

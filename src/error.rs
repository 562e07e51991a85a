//! Error kinds raised by the statistics pipeline and the stake calculator.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BttsError {
    #[error("{0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("{0}")]
    InvalidField(#[from] InvalidField),

    #[error("{0}")]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error("{0}")]
    MalformedCell(#[from] MalformedCell),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// A scalar argument outside its permitted domain.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{argument} must be {constraint}, got {value}")]
pub struct InvalidInput {
    pub argument: &'static str,
    pub constraint: &'static str,
    pub value: f64,
}

/// A statistic name that is unknown, or absent from the table it was requested from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown or absent statistic '{0}'")]
pub struct InvalidField(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("table is missing required columns {missing:?}")]
pub struct SchemaMismatch {
    pub missing: Vec<String>,
}

/// A cell whose text could not be read as the column's type. Lines are 1-based and
/// include the header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed value '{value}' in column '{column}' on line {line}")]
pub struct MalformedCell {
    pub line: usize,
    pub column: String,
    pub value: String,
}

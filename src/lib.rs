//! Head-to-head football statistics across national leagues.
//! Filters league and team views, joins today's fixtures with their historical record,
//! ranks the fixtures by any statistic and sizes stakes by a capped Kelly criterion.

pub mod catalog;
pub mod csv;
pub mod domain;
pub mod error;
pub mod file;
pub mod filter;
pub mod format;
pub mod merge;
pub mod print;
pub mod rank;
pub mod stake;
pub mod table_io;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}

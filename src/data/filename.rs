//! Year-based file naming and textual year/state parsing.

use crate::error::{FarsError, Result};

/// Build the file name of one year's accident file, e.g. `accident_2013.csv.bz2`.
pub fn make_filename(year: i32) -> String {
    format!("accident_{}.csv.bz2", year)
}

/// Parse a year given as text (CLI arguments, config values).
pub fn parse_year(value: &str) -> Result<i32> {
    parse_integer("year", value)
}

/// Parse a STATE code given as text.
pub fn parse_state_code(value: &str) -> Result<i32> {
    parse_integer("STATE", value)
}

fn parse_integer(field: &'static str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| FarsError::TypeConversion {
            field,
            value: value.to_string(),
        })
}

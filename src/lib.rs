//! FARS accident records: monthly summaries and state scatter maps.
//!
//! Yearly files named `accident_<YEAR>.csv.bz2` are read from an explicit
//! data directory, counted by month across years, or plotted per state.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;

#[cfg(test)]
mod test_support;

pub use charts::{MapOutcome, MapPlotter, MapStyle};
pub use config::FarsConfig;
pub use data::{
    make_filename, parse_state_code, parse_year, read_records, DataLoader, Summarizer, YearLoad,
    YearSlice,
};
pub use error::{FarsError, Result};

//! Data module - accident file loading and monthly summaries

mod filename;
mod loader;
mod processor;

pub use filename::{make_filename, parse_state_code, parse_year};
pub use loader::{read_records, DataLoader, YearLoad, YearSlice};
pub use processor::Summarizer;

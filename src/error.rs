//! Error types shared by the loaders, the summarizer and the map plotter.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarsError {
    #[error("file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },
    #[error("cannot convert {field} value '{value}' to an integer")]
    TypeConversion { field: &'static str, value: String },
    #[error("invalid STATE number: {0}")]
    InvalidState(i32),
    #[error("no year could be loaded")]
    EmptyResult,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to render map: {0}")]
    Render(String),
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl FarsError {
    /// True when the error is a missing input file.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, FarsError::FileNotFound { .. })
    }
}

pub type Result<T, E = FarsError> = std::result::Result<T, E>;

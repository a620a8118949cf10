//! Accident File Loader Module
//! Reads yearly accident CSV files (plain or bzip2-compressed) with Polars.

use crate::data::filename::make_filename;
use crate::error::{FarsError, Result};
use bzip2::read::MultiBzDecoder;
use polars::prelude::*;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Rows scanned by the CSV reader before it settles on a column type.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Leading bytes of every bzip2 stream.
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Read one accident file into a DataFrame.
///
/// The payload may be plain CSV or bzip2-compressed CSV; compression is
/// detected from the file contents, not the extension. Columns keep
/// whatever types the CSV reader infers.
pub fn read_records(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FarsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read(path)?;
    let bytes = if raw.starts_with(BZIP2_MAGIC) {
        let mut decoded = Vec::with_capacity(raw.len() * 8);
        MultiBzDecoder::new(raw.as_slice()).read_to_end(&mut decoded)?;
        decoded
    } else {
        raw
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    debug!(path = %path.display(), rows = df.height(), "loaded accident file");
    Ok(df)
}

/// One year's records projected to `MONTH` and `year`.
#[derive(Debug, Clone)]
pub struct YearSlice {
    pub year: i32,
    pub frame: DataFrame,
}

/// Outcome of loading a single year inside a batch.
#[derive(Debug)]
pub enum YearLoad {
    Loaded(YearSlice),
    Failed { year: i32, error: FarsError },
}

impl YearLoad {
    pub fn year(&self) -> i32 {
        match self {
            YearLoad::Loaded(slice) => slice.year,
            YearLoad::Failed { year, .. } => *year,
        }
    }

    pub fn slice(&self) -> Option<&YearSlice> {
        match self {
            YearLoad::Loaded(slice) => Some(slice),
            YearLoad::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&FarsError> {
        match self {
            YearLoad::Loaded(_) => None,
            YearLoad::Failed { error, .. } => Some(error),
        }
    }
}

/// Resolves yearly accident files inside an explicit data directory.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_dir: PathBuf,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the file holding `year`.
    pub fn path_for(&self, year: i32) -> PathBuf {
        self.data_dir.join(make_filename(year))
    }

    /// Load every column of one year's file.
    pub fn read_year(&self, year: i32) -> Result<DataFrame> {
        read_records(self.path_for(year))
    }

    /// Load `year` and keep only `MONTH` plus a constant `year` column.
    pub fn read_year_slice(&self, year: i32) -> Result<YearSlice> {
        let df = self.read_year(year)?;
        let month = df.column("MONTH")?.cast(&DataType::Int32)?;
        let frame = DataFrame::new(vec![
            month,
            Column::new("year".into(), vec![year; df.height()]),
        ])?;
        Ok(YearSlice { year, frame })
    }

    /// Load each year in order. A year that fails is logged and reported
    /// as [`YearLoad::Failed`] at its position; the rest still load.
    #[instrument(skip(self))]
    pub fn read_years(&self, years: &[i32]) -> Vec<YearLoad> {
        years
            .iter()
            .map(|&year| match self.read_year_slice(year) {
                Ok(slice) => YearLoad::Loaded(slice),
                Err(error) => {
                    warn!(year, %error, "invalid year: {}", year);
                    YearLoad::Failed { year, error }
                }
            })
            .collect()
    }
}

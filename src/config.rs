//! Settings for where accident files live and how maps are drawn.

use crate::charts::MapStyle;
use crate::data::DataLoader;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarsConfig {
    /// Directory holding `accident_<YEAR>.csv.bz2` files.
    pub data_dir: PathBuf,
    /// Directory rendered maps are written to.
    pub output_dir: PathBuf,
    pub map: MapStyle,
}

impl Default for FarsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("maps"),
            map: MapStyle::default(),
        }
    }
}

impl FarsConfig {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn loader(&self) -> DataLoader {
        DataLoader::new(&self.data_dir)
    }
}

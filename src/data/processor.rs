//! Summary Module
//! Combines yearly slices and pivots accident counts into a month-by-year table.

use crate::data::loader::{DataLoader, YearLoad};
use crate::error::{FarsError, Result};
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Builds month-by-year accident count tables.
pub struct Summarizer;

impl Summarizer {
    /// Count accidents per month for each year.
    ///
    /// Output columns: ["MONTH", "<year>", ...] with years ascending. Years
    /// that fail to load are left out; if none load the call fails with
    /// [`FarsError::EmptyResult`].
    pub fn summarize_years(loader: &DataLoader, years: &[i32]) -> Result<DataFrame> {
        let loads = loader.read_years(years);
        let loaded: BTreeSet<i32> = loads
            .iter()
            .filter_map(YearLoad::slice)
            .map(|slice| slice.year)
            .collect();

        let combined = Self::concat_slices(&loads)?;
        let counts = Self::count_by_year_month(&combined)?;
        Self::pivot_counts(&counts, &loaded)
    }

    /// Stack every loaded slice row-wise, skipping failed years.
    pub fn concat_slices(loads: &[YearLoad]) -> Result<DataFrame> {
        let mut frames = loads
            .iter()
            .filter_map(YearLoad::slice)
            .map(|slice| &slice.frame);

        let mut combined = frames.next().ok_or(FarsError::EmptyResult)?.clone();
        for frame in frames {
            combined.vstack_mut(frame)?;
        }
        Ok(combined)
    }

    /// Group by (year, MONTH) and count rows.
    ///
    /// Output columns: ["year", "MONTH", "n"]
    pub fn count_by_year_month(df: &DataFrame) -> Result<DataFrame> {
        let counts = df
            .clone()
            .lazy()
            .group_by([col("year"), col("MONTH")])
            .agg([len().alias("n")])
            .collect()?;
        Ok(counts)
    }

    /// Spread the long (year, MONTH, n) table so each year is a column.
    ///
    /// Every year in `years` gets a column even when it contributed no rows.
    /// Month/year combinations without accidents stay null.
    pub fn pivot_counts(counts: &DataFrame, years: &BTreeSet<i32>) -> Result<DataFrame> {
        let year_ca = counts.column("year")?.i32()?;
        let month_ca = counts.column("MONTH")?.i32()?;
        let n_col = counts.column("n")?.cast(&DataType::UInt32)?;
        let n_ca = n_col.u32()?;

        let mut by_year: BTreeMap<i32, BTreeMap<i32, u32>> = BTreeMap::new();
        let mut months: BTreeSet<i32> = BTreeSet::new();

        for ((year, month), n) in year_ca.into_iter().zip(month_ca).zip(n_ca) {
            match (year, month, n) {
                (Some(year), Some(month), Some(n)) => {
                    months.insert(month);
                    by_year.entry(year).or_default().insert(month, n);
                }
                (year, None, n) => {
                    debug!(?year, ?n, "skipping accidents without a MONTH");
                }
                _ => {}
            }
        }

        let month_list: Vec<i32> = months.into_iter().collect();
        let mut columns = vec![Column::new("MONTH".into(), month_list.clone())];

        for year in years {
            let per_month = by_year.get(year);
            let values: Vec<Option<u32>> = month_list
                .iter()
                .map(|month| per_month.and_then(|m| m.get(month).copied()))
                .collect();
            columns.push(Column::new(year.to_string().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }
}

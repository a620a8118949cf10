//! Coordinate cleanup and state filtering for map plots.

use crate::error::{FarsError, Result};
use polars::prelude::*;

/// Longitudes above this encode "not recorded" (e.g. 999.9999).
pub const LONGITUDE_SENTINEL: f64 = 900.0;
/// Latitudes above this encode "not recorded" (e.g. 99.9999).
pub const LATITUDE_SENTINEL: f64 = 90.0;

pub fn normalize_longitude(value: f64) -> Option<f64> {
    (!value.is_nan() && value <= LONGITUDE_SENTINEL).then_some(value)
}

pub fn normalize_latitude(value: f64) -> Option<f64> {
    (!value.is_nan() && value <= LATITUDE_SENTINEL).then_some(value)
}

/// A single accident location after sentinel cleanup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accident {
    pub state: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Accident {
    /// `(longitude, latitude)` when both are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

/// Keep the rows of `df` whose STATE equals `state` and clean their coordinates.
///
/// Fails with [`FarsError::InvalidState`] when `state` never appears in the
/// STATE column. The frame itself is left untouched.
pub fn select_state(df: &DataFrame, state: i32) -> Result<Vec<Accident>> {
    let state_col = df.column("STATE")?;
    let states = state_col
        .as_materialized_series()
        .strict_cast(&DataType::Int32)
        .map_err(|_| FarsError::TypeConversion {
            field: "STATE",
            value: state_col.dtype().to_string(),
        })?;
    let states = states.i32()?;

    if !states.into_iter().flatten().any(|s| s == state) {
        return Err(FarsError::InvalidState(state));
    }

    let latitude = df.column("LATITUDE")?.cast(&DataType::Float64)?;
    let longitude = df.column("LONGITUD")?.cast(&DataType::Float64)?;
    let latitude = latitude.f64()?;
    let longitude = longitude.f64()?;

    let accidents = states
        .into_iter()
        .zip(latitude)
        .zip(longitude)
        .filter(|((s, _), _)| *s == Some(state))
        .map(|((_, lat), lon)| Accident {
            state,
            latitude: lat.and_then(normalize_latitude),
            longitude: lon.and_then(normalize_longitude),
        })
        .collect();

    Ok(accidents)
}
